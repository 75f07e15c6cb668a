mod client;
mod error;
mod reshape;
mod types;

pub use client::{
    BackendClient, FeedSource, ASTEROID_SEARCH_RADIUS, DEFAULT_BACKEND, SATELLITE_SEARCH_RADIUS,
};
pub use error::FeedError;
pub use reshape::{reshape_asteroids, reshape_satellites};
pub use types::{AsteroidRecord, AsteroidsResponse, SatelliteRecord, SatellitesResponse};
