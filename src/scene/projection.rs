//! Geographic to scene-space projection.
//!
//! Everything is placed on or around a reference sphere of radius
//! [`GLOBE_RADIUS`]. The longitude offset lines the seam up with the
//! equirectangular day map.

use glam::DVec3;
use std::f64::consts::PI;

use crate::geo::GeoPosition;

pub const GLOBE_RADIUS: f64 = 1.5;

const SATELLITE_KM_SCALE: f64 = 0.5 / 1000.0;
const SATELLITE_CLEARANCE: f64 = 0.05;

const ASTEROID_BASE_RADIUS: f64 = 2.5;
const ASTEROID_LOG_SCALE: f64 = 1.2;
/// Miss distances below this collapse onto the innermost asteroid shell.
pub const ASTEROID_FLOOR_KM: f64 = 10_000.0;

const USER_PIN_OFFSET: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Satellite,
    Asteroid,
    User,
    /// Anything unrecognised sits on the bare globe surface.
    Surface,
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label {
            "satellite" => Category::Satellite,
            "asteroid" => Category::Asteroid,
            "user" => Category::User,
            _ => Category::Surface,
        }
    }
}

/// `distance` is altitude in km for satellites and miss distance in km for
/// asteroids; other categories ignore it.
pub fn radius_for(category: Category, distance: f64) -> f64 {
    match category {
        Category::Satellite => GLOBE_RADIUS + distance * SATELLITE_KM_SCALE + SATELLITE_CLEARANCE,
        Category::Asteroid => {
            let log_distance = distance.max(ASTEROID_FLOOR_KM).log10();
            ASTEROID_BASE_RADIUS + (log_distance - 4.0) * ASTEROID_LOG_SCALE
        }
        Category::User => GLOBE_RADIUS + USER_PIN_OFFSET,
        Category::Surface => GLOBE_RADIUS,
    }
}

pub fn lat_lng_to_vector(latitude: f64, longitude: f64, radius: f64) -> DVec3 {
    let phi = (90.0 - latitude) * (PI / 180.0);
    let theta = (longitude + 180.0) * (PI / 180.0);

    DVec3::new(
        -(radius * phi.sin() * theta.cos()),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

pub fn project(latitude: f64, longitude: f64, distance: f64, category: Category) -> DVec3 {
    lat_lng_to_vector(latitude, longitude, radius_for(category, distance))
}

pub fn project_user(position: &GeoPosition) -> DVec3 {
    project(position.latitude, position.longitude, 0.0, Category::User)
}

/// Stand-in sky placement for the n-th near-earth object. Not an ephemeris.
pub fn asteroid_placeholder(index: usize) -> (f64, f64) {
    let index = index as u64;
    let latitude = (index.wrapping_mul(137) % 180) as f64 - 90.0;
    let longitude = (index.wrapping_mul(291) % 360) as f64 - 180.0;
    (latitude, longitude)
}
