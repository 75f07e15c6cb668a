use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;

use super::config::{NasaConfig, N2yoConfig};

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream answered HTTP {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid JSON body: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Error> for UpstreamError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, _) => UpstreamError::Status(status),
            ureq::Error::Transport(t) => UpstreamError::Transport(t.to_string()),
        }
    }
}

/// Third-party position feeds. Calls block.
pub trait Upstream: Send + Sync + 'static {
    fn satellites_above(
        &self,
        lat: f64,
        lng: f64,
        radius: u32,
    ) -> Result<serde_json::Value, UpstreamError>;

    fn neo_feed(&self, start: NaiveDate, end: NaiveDate)
        -> Result<serde_json::Value, UpstreamError>;
}

/// N2YO for satellites, NASA NeoWs for near-earth objects.
pub struct HttpUpstream {
    agent: ureq::Agent,
    n2yo: N2yoConfig,
    nasa: NasaConfig,
}

impl HttpUpstream {
    pub fn new(n2yo: N2yoConfig, nasa: NasaConfig, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            n2yo,
            nasa,
        }
    }
}

pub fn satellites_above_url(n2yo: &N2yoConfig, lat: f64, lng: f64, radius: u32) -> String {
    format!(
        "{}/satellite/above/{:.6}/{:.6}/0/{}/{}?apiKey={}",
        n2yo.base_url.trim_end_matches('/'),
        lat,
        lng,
        radius,
        n2yo.category,
        n2yo.api_key
    )
}

pub fn neo_feed_url(nasa: &NasaConfig, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}/feed?start_date={}&end_date={}&api_key={}",
        nasa.base_url.trim_end_matches('/'),
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d"),
        nasa.api_key
    )
}

impl Upstream for HttpUpstream {
    fn satellites_above(
        &self,
        lat: f64,
        lng: f64,
        radius: u32,
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = satellites_above_url(&self.n2yo, lat, lng, radius);
        log::info!(
            "Requesting N2YO above lat={:.6} lng={:.6} radius={} category={}",
            lat,
            lng,
            radius,
            self.n2yo.category
        );
        Ok(self.agent.get(&url).call()?.into_json()?)
    }

    fn neo_feed(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<serde_json::Value, UpstreamError> {
        let url = neo_feed_url(&self.nasa, start, end);
        log::info!("Requesting NeoWs feed {} .. {}", start, end);
        Ok(self.agent.get(&url).call()?.into_json()?)
    }
}
