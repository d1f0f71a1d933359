//! Value objects shared by service models: colors and geographic coordinates.

pub mod color;
pub mod location;

pub use color::Color;
pub use location::LocationCoordinates;
