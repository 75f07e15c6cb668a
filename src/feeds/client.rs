use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::FeedError;
use super::types::{AsteroidsResponse, SatellitesResponse};
use crate::geo::GeoPosition;

pub const DEFAULT_BACKEND: &str = "http://localhost:8080";
pub const SATELLITE_SEARCH_RADIUS: u32 = 25;
pub const ASTEROID_SEARCH_RADIUS: u32 = 0;

/// Where scan data comes from. Calls block; run them off the async executor.
pub trait FeedSource: Send + Sync + 'static {
    fn satellites(&self, position: GeoPosition, radius: u32)
        -> Result<SatellitesResponse, FeedError>;
    fn asteroids(&self, position: GeoPosition, radius: u32) -> Result<AsteroidsResponse, FeedError>;
}

/// Talks to the backend proxy's `/api/*/nearby` endpoints.
pub struct BackendClient {
    base_url: String,
    agent: ureq::Agent,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    fn nearby<T: DeserializeOwned>(
        &self,
        kind: &str,
        position: GeoPosition,
        radius: u32,
    ) -> Result<T, FeedError> {
        let url = format!("{}/api/{}/nearby", self.base_url, kind);
        log::debug!("GET {} lat={} lng={} radius={}", url, position.latitude, position.longitude, radius);

        let response = self
            .agent
            .get(&url)
            .query("lat", &position.latitude.to_string())
            .query("lng", &position.longitude.to_string())
            .query("radius", &radius.to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => FeedError::Status {
                    url: url.clone(),
                    status,
                },
                ureq::Error::Transport(t) => FeedError::Request {
                    url: url.clone(),
                    message: t.to_string(),
                },
            })?;

        Ok(response.into_json()?)
    }
}

impl FeedSource for BackendClient {
    fn satellites(
        &self,
        position: GeoPosition,
        radius: u32,
    ) -> Result<SatellitesResponse, FeedError> {
        self.nearby("satellites", position, radius)
    }

    fn asteroids(&self, position: GeoPosition, radius: u32) -> Result<AsteroidsResponse, FeedError> {
        self.nearby("asteroids", position, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_backend_is_a_request_error() {
        // nothing listens on the discard port
        let client = BackendClient::new("http://127.0.0.1:9/", Duration::from_millis(500));
        let position = GeoPosition::new(0.0, 0.0).unwrap();
        match client.satellites(position, SATELLITE_SEARCH_RADIUS) {
            Err(FeedError::Request { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9/api/satellites/nearby")
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }
}
