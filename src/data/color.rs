//! Device-independent RGBA color with CSS rendering.

// self
use crate::_prelude::*;

/// An RGBA color with unit-interval components.
///
/// Deserialization accepts partial payloads (missing components default to
/// zero, a missing alpha to fully opaque) and rejects components outside
/// `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorComponents")]
pub struct Color {
	/// Red component in `0.0..=1.0`.
	pub red: f64,
	/// Green component in `0.0..=1.0`.
	pub green: f64,
	/// Blue component in `0.0..=1.0`.
	pub blue: f64,
	/// Alpha component in `0.0..=1.0`.
	pub alpha: f64,
}
impl Color {
	/// Creates a fully opaque color.
	pub const fn new(red: f64, green: f64, blue: f64) -> Self {
		Self { red, green, blue, alpha: 1.0 }
	}

	/// Creates a color with an explicit alpha component.
	pub const fn with_alpha(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
		Self { red, green, blue, alpha }
	}

	/// Renders the color as a CSS `rgb()`/`rgba()` string.
	pub fn css_color(&self) -> String {
		let [red, green, blue] =
			[self.red, self.green, self.blue].map(|component| (component * 255.0).round() as u8);

		if self.alpha == 1.0 {
			format!("rgb({red}, {green}, {blue})")
		} else {
			format!("rgba({red}, {green}, {blue}, {})", self.alpha)
		}
	}
}
impl Display for Color {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.css_color())
	}
}
impl TryFrom<ColorComponents> for Color {
	type Error = ColorComponentError;

	fn try_from(components: ColorComponents) -> Result<Self, Self::Error> {
		let ColorComponents { red, green, blue, alpha } = components;

		for (component, value) in
			[("red", red), ("green", green), ("blue", blue), ("alpha", alpha)]
		{
			if !(0.0..=1.0).contains(&value) {
				return Err(ColorComponentError { component, value });
			}
		}

		Ok(Self { red, green, blue, alpha })
	}
}

/// Raised when a deserialized color component falls outside the unit interval.
#[derive(Clone, Copy, Debug, ThisError)]
#[error("Color component `{component}` is outside the unit interval: {value}.")]
pub struct ColorComponentError {
	/// Name of the offending component.
	pub component: &'static str,
	/// The rejected value.
	pub value: f64,
}

#[derive(Deserialize)]
struct ColorComponents {
	#[serde(default)]
	red: f64,
	#[serde(default)]
	green: f64,
	#[serde(default)]
	blue: f64,
	#[serde(default = "default_alpha")]
	alpha: f64,
}

fn default_alpha() -> f64 {
	1.0
}
