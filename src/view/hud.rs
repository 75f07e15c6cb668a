//! Text rendering of the heads-up display panels.

use std::fmt;

use super::state::ViewState;
use crate::feeds::{AsteroidRecord, SatelliteRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: &'static str,
    pub count: usize,
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub status: String,
    pub coordinates: Option<String>,
    pub scan_button: &'static str,
    pub scan_enabled: bool,
    pub satellites: Panel,
    pub asteroids: Panel,
}

impl Hud {
    pub fn from_view(view: &ViewState) -> Self {
        let satellite_rows = if view.satellites().is_empty() {
            vec![if view.loading() {
                "SCANNING...".to_string()
            } else {
                "NO TARGETS LOCKED".to_string()
            }]
        } else {
            view.satellites().iter().map(satellite_row).collect()
        };

        let asteroid_rows = if view.asteroids().is_empty() {
            vec!["SECTOR CLEAR".to_string()]
        } else {
            view.asteroids().iter().map(asteroid_row).collect()
        };

        Hud {
            status: view.status().to_string(),
            coordinates: view.position().map(|p| p.to_string()),
            scan_button: view.scan_button_label(),
            scan_enabled: view.can_scan(),
            satellites: Panel {
                title: "ACTIVE SATELLITES",
                count: view.satellites().len(),
                rows: satellite_rows,
            },
            asteroids: Panel {
                title: "NEAR EARTH OBJECTS",
                count: view.asteroids().len(),
                rows: asteroid_rows,
            },
        }
    }
}

fn satellite_row(sat: &SatelliteRecord) -> String {
    format!(
        "{}  ALT: {}km  LAT: {}°",
        sat.name,
        fixed(sat.altitude_km, 0),
        fixed(sat.latitude, 2)
    )
}

fn asteroid_row(neo: &AsteroidRecord) -> String {
    let tag = if neo.hazardous { " [HAZARD]" } else { "" };
    format!(
        "{}{}  MISS: {} km  Ø {} km",
        neo.name,
        tag,
        group_thousands(neo.miss_distance_km),
        fixed(neo.diameter_km, 2)
    )
}

/// Fixed-point text with ties rounded away from zero; `{:.N}` alone rounds
/// them to even.
fn fixed(value: f64, digits: u32) -> String {
    let scale = 10f64.powi(digits as i32);
    format!("{:.*}", digits as usize, (value * scale).round() / scale)
}

fn group_thousands(value: f64) -> String {
    let digits = fixed(value.abs(), 0);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.count)?;
        for row in &self.rows {
            writeln!(f, "  {}", row)?;
        }
        Ok(())
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "● {}", self.status)?;
        if let Some(coordinates) = &self.coordinates {
            write!(f, "  |  {}", coordinates)?;
        }
        let button = if self.scan_enabled { "" } else { " (disabled)" };
        writeln!(f, "  |  [{}]{}", self.scan_button, button)?;
        write!(f, "{}{}", self.satellites, self.asteroids)
    }
}
