//! Geographic coordinates with great-circle distance math.

// self
use crate::_prelude::*;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationCoordinates {
	/// Latitude in decimal degrees.
	pub latitude: f64,
	/// Longitude in decimal degrees.
	pub longitude: f64,
}
impl LocationCoordinates {
	/// Creates a coordinate pair.
	pub const fn new(latitude: f64, longitude: f64) -> Self {
		Self { latitude, longitude }
	}

	/// Renders the coordinates as the `latitude,longitude` pair service URLs
	/// expect.
	pub fn url_pair(&self) -> String {
		format!("{},{}", self.latitude, self.longitude)
	}

	/// Floors both coordinates at the given decimal precision.
	pub fn truncate(&self, precision: u32) -> Self {
		let scale = 10_f64.powi(precision as i32);

		Self {
			latitude: (self.latitude * scale).floor() / scale,
			longitude: (self.longitude * scale).floor() / scale,
		}
	}

	/// Returns the approximate great-circle distance to `other`, in kilometers.
	pub fn distance_to(&self, other: &Self) -> f64 {
		let latitude1 = self.latitude.to_radians();
		let longitude1 = self.longitude.to_radians();
		let latitude2 = other.latitude.to_radians();
		let longitude2 = other.longitude.to_radians();
		let latitude_span = latitude1 - latitude2;
		let longitude_span = longitude1 - longitude2;
		let a = (latitude_span / 2.0).sin().powi(2);
		let b = latitude1.cos();
		let c = latitude2.cos();
		let d = (longitude_span / 2.0).sin().powi(2);

		(2.0 * EARTH_RADIUS_KM) * (a + b * c * d).sqrt().asin()
	}
}
impl Display for LocationCoordinates {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{{ latitude: {}, longitude: {} }}", self.latitude, self.longitude)
	}
}
