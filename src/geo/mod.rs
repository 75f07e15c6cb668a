mod error;
mod locate;
mod position;

pub use error::GeoError;
pub use locate::{acquire_position, FixedLocator, Geolocator};
pub use position::{GeoPosition, FALLBACK_POSITION};
