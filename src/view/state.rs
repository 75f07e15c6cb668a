use std::fmt;

use thiserror::Error;

use crate::feeds::{AsteroidRecord, FeedError, SatelliteRecord};
use crate::geo::GeoPosition;

/// Shown for every fetch or reshape failure.
pub const UNREACHABLE: &str = "ORBITAL COMMAND UNREACHABLE";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("no position acquired yet")]
    NoPosition,
}

#[derive(Debug, Clone, Default)]
pub struct ScanData {
    pub satellites: Vec<SatelliteRecord>,
    pub asteroids: Vec<AsteroidRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Scanning,
    Error(String),
    LocationLocked,
    Online,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Scanning => f.write_str("SCANNING SECTOR..."),
            StatusLine::Error(message) => f.write_str(message),
            StatusLine::LocationLocked => f.write_str("LOCATION LOCKED"),
            StatusLine::Online => f.write_str("SYSTEM ONLINE"),
        }
    }
}

/// Top-level view state. Everything else reads it; only the transitions
/// below change it.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    position: Option<GeoPosition>,
    satellites: Vec<SatelliteRecord>,
    asteroids: Vec<AsteroidRecord>,
    loading: bool,
    error: Option<String>,
    focus: bool,
    generation: u64,
}

impl ViewState {
    pub fn with_position(position: GeoPosition) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Option<GeoPosition> {
        self.position
    }

    pub fn satellites(&self) -> &[SatelliteRecord] {
        &self.satellites
    }

    pub fn asteroids(&self) -> &[AsteroidRecord] {
        &self.asteroids
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn focus(&self) -> bool {
        self.focus
    }

    /// Bumped by every scan; a focus release carries the value it was armed with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enters the loading state and engages focus before any data arrives.
    pub fn begin_scan(&mut self) -> Result<GeoPosition, ViewError> {
        let position = self.position.ok_or(ViewError::NoPosition)?;
        self.loading = true;
        self.error = None;
        self.focus = true;
        self.generation = self.generation.wrapping_add(1);
        Ok(position)
    }

    /// Satellites land before the asteroid feed is reshaped, so a bad
    /// asteroid row does not hold them back.
    pub fn replace_satellites(&mut self, satellites: Vec<SatelliteRecord>) {
        self.satellites = satellites;
    }

    /// Replaces both lists on success; on failure the previous lists stay.
    pub fn complete_scan(&mut self, outcome: Result<ScanData, FeedError>) {
        match outcome {
            Ok(data) => {
                self.satellites = data.satellites;
                self.asteroids = data.asteroids;
            }
            Err(e) => {
                log::error!("Failed to fetch data: {}", e);
                self.error = Some(UNREACHABLE.to_string());
            }
        }
        self.loading = false;
    }

    /// Drops focus unless a newer scan has started since the release was armed.
    pub fn release_focus(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            log::debug!(
                "Ignoring focus release from scan {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.focus = false;
        true
    }

    pub fn status(&self) -> StatusLine {
        if self.loading {
            StatusLine::Scanning
        } else if let Some(error) = &self.error {
            StatusLine::Error(error.clone())
        } else if self.focus {
            StatusLine::LocationLocked
        } else {
            StatusLine::Online
        }
    }

    pub fn can_scan(&self) -> bool {
        !self.loading && self.position.is_some()
    }

    pub fn scan_button_label(&self) -> &'static str {
        if self.loading {
            "Acquiring..."
        } else if self.focus {
            "Scanning..."
        } else {
            "Init Scan"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located() -> ViewState {
        ViewState::with_position(GeoPosition::new(48.85, 2.35).unwrap())
    }

    #[test]
    fn scan_requires_position() {
        let mut view = ViewState::default();
        assert!(!view.can_scan());
        assert!(matches!(view.begin_scan(), Err(ViewError::NoPosition)));
        assert!(!view.focus());
        assert!(!view.loading());
    }

    #[test]
    fn begin_scan_sets_focus_and_loading() {
        let mut view = located();
        view.begin_scan().unwrap();
        assert!(view.focus());
        assert!(view.loading());
        assert!(!view.can_scan());
        assert_eq!(view.status(), StatusLine::Scanning);
        assert_eq!(view.scan_button_label(), "Acquiring...");
    }

    #[test]
    fn status_walks_through_scan_lifecycle() {
        let mut view = located();
        assert_eq!(view.status().to_string(), "SYSTEM ONLINE");
        assert_eq!(view.scan_button_label(), "Init Scan");

        view.begin_scan().unwrap();
        view.complete_scan(Ok(ScanData::default()));
        assert_eq!(view.status().to_string(), "LOCATION LOCKED");
        assert_eq!(view.scan_button_label(), "Scanning...");

        assert!(view.release_focus(view.generation()));
        assert_eq!(view.status(), StatusLine::Online);
    }

    #[test]
    fn failure_keeps_previous_lists() {
        let mut view = located();
        view.begin_scan().unwrap();
        view.complete_scan(Ok(ScanData {
            satellites: vec![SatelliteRecord {
                name: "NOAA 19".into(),
                latitude: 1.0,
                longitude: 2.0,
                altitude_km: 850.0,
                launch_date: None,
            }],
            asteroids: vec![],
        }));

        view.begin_scan().unwrap();
        view.complete_scan(Err(FeedError::Status {
            url: "http://localhost:8080/api/satellites/nearby".into(),
            status: 502,
        }));
        assert_eq!(view.satellites().len(), 1);
        assert_eq!(view.error(), Some(UNREACHABLE));
        assert_eq!(view.status().to_string(), UNREACHABLE);
        assert!(!view.loading());

        view.begin_scan().unwrap();
        assert_eq!(view.error(), None);
    }

    #[test]
    fn stale_release_keeps_focus() {
        let mut view = located();
        view.begin_scan().unwrap();
        view.complete_scan(Ok(ScanData::default()));
        let first = view.generation();

        view.begin_scan().unwrap();
        assert!(!view.release_focus(first));
        assert!(view.focus());

        view.complete_scan(Ok(ScanData::default()));
        assert!(view.release_focus(view.generation()));
        assert!(!view.focus());
    }
}
