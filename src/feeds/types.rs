use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `GET /api/satellites/nearby` (N2YO "above" payload).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SatellitesResponse {
    #[serde(default)]
    pub above: Option<Vec<SatelliteAbove>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteAbove {
    pub satname: String,
    pub satlat: f64,
    pub satlng: f64,
    pub satalt: f64,
    #[serde(rename = "launchDate", default)]
    pub launch_date: Option<String>,
}

/// Body of `GET /api/asteroids/nearby` (NASA NeoWs feed payload).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsteroidsResponse {
    #[serde(default)]
    pub near_earth_objects: Option<BTreeMap<String, Vec<NearEarthObject>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearEarthObject {
    pub name: String,
    pub is_potentially_hazardous_asteroid: bool,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloseApproach {
    pub miss_distance: MissDistance,
}

/// NeoWs sends distances as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatelliteRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub launch_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsteroidRecord {
    pub name: String,
    pub hazardous: bool,
    pub diameter_km: f64,
    /// Rounded to whole kilometres.
    pub miss_distance_km: f64,
}
