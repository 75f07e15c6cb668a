use glam::{DQuat, DVec3};

use super::camera::{Camera, CameraController};
use super::projection::{asteroid_placeholder, project, project_user, Category};
use crate::feeds::{AsteroidRecord, SatelliteRecord};
use crate::view::ViewState;

/// Globe yaw in radians per second while idle.
pub const AUTO_ROTATION_RATE: f64 = 0.02;

const SATELLITE_COLOR: &str = "#00ff88";
const HAZARDOUS_COLOR: &str = "#ff2a2a";
const ASTEROID_COLOR: &str = "#ffaa00";
const USER_PIN_COLOR: &str = "#0099ff";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub category: Category,
    /// Position inside the rotating globe group.
    pub local_position: DVec3,
    pub color: &'static str,
    pub size: f64,
    pub label: String,
    pub details: Option<String>,
}

impl Marker {
    pub fn world_position(&self, globe_yaw: f64) -> DVec3 {
        rotate_into_world(globe_yaw, self.local_position)
    }
}

/// Maps a point inside the globe group to world space.
pub fn rotate_into_world(globe_yaw: f64, local: DVec3) -> DVec3 {
    DQuat::from_rotation_y(globe_yaw) * local
}

pub fn satellite_marker(record: &SatelliteRecord) -> Marker {
    Marker {
        category: Category::Satellite,
        local_position: project(
            record.latitude,
            record.longitude,
            record.altitude_km,
            Category::Satellite,
        ),
        color: SATELLITE_COLOR,
        size: 0.02,
        label: record.name.clone(),
        details: None,
    }
}

pub fn asteroid_marker(index: usize, record: &AsteroidRecord) -> Marker {
    let (latitude, longitude) = asteroid_placeholder(index);
    let (color, size) = if record.hazardous {
        (HAZARDOUS_COLOR, 0.05)
    } else {
        (ASTEROID_COLOR, 0.03)
    };
    Marker {
        category: Category::Asteroid,
        local_position: project(latitude, longitude, record.miss_distance_km, Category::Asteroid),
        color,
        size,
        label: record.name.clone(),
        details: Some(format!(
            "Miss Dist: {:.1}M km",
            record.miss_distance_km / 1_000_000.0
        )),
    }
}

/// Pulsing ring drawn around the user pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinPulse {
    pub ring_scale: f64,
    pub ring_opacity: f64,
}

impl PinPulse {
    pub fn at(elapsed_seconds: f64) -> Self {
        let wave = (elapsed_seconds * 2.0).sin();
        Self {
            ring_scale: 1.0 + wave * 0.2,
            ring_opacity: 0.6 - wave * 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserPin {
    pub local_position: DVec3,
    pub color: &'static str,
    pub pulse: PinPulse,
}

/// Retained render state advanced once per frame by the animation driver.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    pub camera: Camera,
    pub controller: CameraController,
    pub globe_yaw: f64,
    pub elapsed: f64,
    pub markers: Vec<Marker>,
    pub user_pin: Option<UserPin>,
}

impl SceneState {
    pub fn tick(&mut self, delta_seconds: f64, view: &ViewState) {
        self.elapsed += delta_seconds;
        if !view.focus() {
            self.globe_yaw += AUTO_ROTATION_RATE * delta_seconds;
        }

        self.markers = view
            .satellites()
            .iter()
            .map(satellite_marker)
            .chain(
                view.asteroids()
                    .iter()
                    .enumerate()
                    .map(|(i, a)| asteroid_marker(i, a)),
            )
            .collect();

        self.user_pin = view.position().map(|p| UserPin {
            local_position: project_user(&p),
            color: USER_PIN_COLOR,
            pulse: PinPulse::at(self.elapsed),
        });

        let focus_point = self
            .user_pin
            .as_ref()
            .map(|pin| rotate_into_world(self.globe_yaw, pin.local_position));
        self.controller
            .frame(&mut self.camera, view.focus(), focus_point);
    }

    /// Marker closest to the camera, with its distance.
    pub fn nearest_marker(&self) -> Option<(&Marker, f64)> {
        self.markers
            .iter()
            .map(|m| (m, m.world_position(self.globe_yaw).distance(self.camera.position)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn count(&self, category: Category) -> usize {
        self.markers
            .iter()
            .filter(|m| m.category == category)
            .count()
    }
}
