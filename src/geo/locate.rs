use super::error::GeoError;
use super::position::{GeoPosition, FALLBACK_POSITION};

/// Source of the observer's position.
pub trait Geolocator {
    fn locate(&self) -> Result<GeoPosition, GeoError>;
}

/// Reports a position supplied up front, or `Unavailable` when none was given.
pub struct FixedLocator {
    position: Option<GeoPosition>,
}

impl FixedLocator {
    pub fn new(position: Option<GeoPosition>) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedLocator {
    fn locate(&self) -> Result<GeoPosition, GeoError> {
        self.position.ok_or(GeoError::Unavailable)
    }
}

/// Never fails: any locator error is swallowed and the fallback used instead.
pub fn acquire_position(locator: &dyn Geolocator) -> GeoPosition {
    match locator.locate() {
        Ok(position) => position,
        Err(e) => {
            log::debug!("Geolocation failed ({}), using fallback {}", e, FALLBACK_POSITION);
            FALLBACK_POSITION
        }
    }
}
