use super::error::FeedError;
use super::types::{
    AsteroidRecord, AsteroidsResponse, NearEarthObject, SatelliteRecord, SatellitesResponse,
};

pub fn reshape_satellites(response: SatellitesResponse) -> Vec<SatelliteRecord> {
    response
        .above
        .unwrap_or_default()
        .into_iter()
        .map(|sat| SatelliteRecord {
            name: sat.satname,
            latitude: sat.satlat,
            longitude: sat.satlng,
            altitude_km: sat.satalt,
            launch_date: sat.launch_date,
        })
        .collect()
}

/// Flattens the per-date feed in date order.
pub fn reshape_asteroids(response: AsteroidsResponse) -> Result<Vec<AsteroidRecord>, FeedError> {
    let Some(by_date) = response.near_earth_objects else {
        return Ok(Vec::new());
    };

    by_date
        .into_values()
        .flatten()
        .map(asteroid_record)
        .collect()
}

fn asteroid_record(neo: NearEarthObject) -> Result<AsteroidRecord, FeedError> {
    let approach = neo
        .close_approach_data
        .first()
        .ok_or_else(|| FeedError::Malformed {
            name: neo.name.clone(),
            message: "no close approach data".into(),
        })?;

    let miss_km: f64 = approach
        .miss_distance
        .kilometers
        .trim()
        .parse()
        .map_err(|_| FeedError::Malformed {
            name: neo.name.clone(),
            message: format!("bad miss distance {:?}", approach.miss_distance.kilometers),
        })?;

    Ok(AsteroidRecord {
        hazardous: neo.is_potentially_hazardous_asteroid,
        diameter_km: neo.estimated_diameter.kilometers.estimated_diameter_max,
        miss_distance_km: miss_km.round(),
        name: neo.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satellites_default_to_empty() {
        let response: SatellitesResponse =
            serde_json::from_str(r#"{"info": {"satcount": 0}}"#).unwrap();
        assert!(reshape_satellites(response).is_empty());

        let response: SatellitesResponse = serde_json::from_str(r#"{"above": []}"#).unwrap();
        assert!(reshape_satellites(response).is_empty());
    }

    #[test]
    fn satellites_keep_fields() {
        let response: SatellitesResponse = serde_json::from_str(
            r#"{"info": {"category": "ANY", "satcount": 1},
                "above": [{"satid": 25544, "satname": "SPACE STATION",
                           "intDesignator": "1998-067A", "launchDate": "1998-11-20",
                           "satlat": 27.9, "satlng": 75.1, "satalt": 418.6}]}"#,
        )
        .unwrap();
        let records = reshape_satellites(response);
        assert_eq!(
            records,
            vec![SatelliteRecord {
                name: "SPACE STATION".into(),
                latitude: 27.9,
                longitude: 75.1,
                altitude_km: 418.6,
                launch_date: Some("1998-11-20".into()),
            }]
        );
    }

    fn neo_json(name: &str, hazardous: bool, miss: &str) -> String {
        format!(
            r#"{{"name": "{name}", "is_potentially_hazardous_asteroid": {hazardous},
                "estimated_diameter": {{"kilometers": {{"estimated_diameter_min": 0.1,
                                                        "estimated_diameter_max": 0.25}}}},
                "close_approach_data": [{{"miss_distance": {{"kilometers": "{miss}"}}}}]}}"#
        )
    }

    #[test]
    fn asteroids_flatten_in_date_order() {
        let body = format!(
            r#"{{"element_count": 3, "near_earth_objects": {{
                 "2026-10-18": [{}],
                 "2026-10-16": [{}, {}]}}}}"#,
            neo_json("C", false, "1000.4"),
            neo_json("A", true, "4512345.678"),
            neo_json("B", false, "9000000.5"),
        );
        let response: AsteroidsResponse = serde_json::from_str(&body).unwrap();
        let records = reshape_asteroids(response).unwrap();

        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert!(records[0].hazardous);
        assert_eq!(records[0].miss_distance_km, 4_512_346.0);
        assert_eq!(records[0].diameter_km, 0.25);
        assert_eq!(records[2].miss_distance_km, 1000.0);
    }

    #[test]
    fn asteroids_absent_map_is_empty() {
        let response: AsteroidsResponse =
            serde_json::from_str(r#"{"error": "Failed to fetch asteroid data"}"#).unwrap();
        assert!(reshape_asteroids(response).unwrap().is_empty());
    }

    #[test]
    fn asteroid_without_approach_is_malformed() {
        let body = r#"{"near_earth_objects": {"2026-10-16": [
            {"name": "Lonely", "is_potentially_hazardous_asteroid": false,
             "estimated_diameter": {"kilometers": {"estimated_diameter_max": 1.0}},
             "close_approach_data": []}]}}"#;
        let response: AsteroidsResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            reshape_asteroids(response),
            Err(FeedError::Malformed { name, .. }) if name == "Lonely"
        ));
    }

    #[test]
    fn asteroid_with_bad_distance_is_malformed() {
        let body = format!(
            r#"{{"near_earth_objects": {{"2026-10-16": [{}]}}}}"#,
            neo_json("Odd", false, "far")
        );
        let response: AsteroidsResponse = serde_json::from_str(&body).unwrap();
        assert!(reshape_asteroids(response).is_err());
    }
}
