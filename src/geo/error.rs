use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("{axis} out of range: {value}")]
    OutOfRange { axis: &'static str, value: f64 },
    #[error("malformed coordinates: {0}")]
    Malformed(String),
    #[error("position unavailable")]
    Unavailable,
}
