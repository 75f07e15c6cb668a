use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Duration, Local};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::geo::GeoPosition;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

/// N2YO rejects search radii above 90 degrees.
const MAX_RADIUS_DEG: u32 = 90;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius: u32,
}

impl NearbyQuery {
    fn position(&self) -> ApiResult<GeoPosition> {
        if self.radius > MAX_RADIUS_DEG {
            return Err(ApiError::Validation(format!(
                "radius must be at most {}",
                MAX_RADIUS_DEG
            )));
        }
        GeoPosition::new(self.lat, self.lng).map_err(|e| ApiError::Validation(e.to_string()))
    }
}

#[utoipa::path(
    get,
    path = "/api/satellites/nearby",
    tag = "feeds",
    params(
        ("lat" = f64, Query, description = "Observer latitude (degrees)"),
        ("lng" = f64, Query, description = "Observer longitude (degrees)"),
        ("radius" = u32, Query, description = "Search radius above the horizon (degrees)")
    ),
    responses(
        (status = 200, description = "N2YO 'above' payload, passed through"),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 502, description = "N2YO unreachable", body = ErrorResponse)
    )
)]
pub async fn nearby_satellites(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let position = query.position()?;
    let upstream = state.upstream.clone();
    let radius = query.radius;

    let result = tokio::task::spawn_blocking(move || {
        upstream.satellites_above(position.latitude, position.longitude, radius)
    })
    .await;

    match result {
        Ok(Ok(body)) => Ok(Json(body)),
        Ok(Err(e)) => {
            log::error!("Error calling N2YO API: {}", e);
            Err(ApiError::Upstream("Failed to fetch satellite data"))
        }
        Err(e) => {
            log::error!("N2YO request task failed: {}", e);
            Err(ApiError::Upstream("Failed to fetch satellite data"))
        }
    }
}

/// Coordinates are validated but not used: NeoWs has no observer filter.
#[utoipa::path(
    get,
    path = "/api/asteroids/nearby",
    tag = "feeds",
    params(
        ("lat" = f64, Query, description = "Observer latitude (degrees)"),
        ("lng" = f64, Query, description = "Observer longitude (degrees)"),
        ("radius" = u32, Query, description = "Ignored")
    ),
    responses(
        (status = 200, description = "NeoWs feed for the coming week, passed through"),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 502, description = "NeoWs unreachable", body = ErrorResponse)
    )
)]
pub async fn nearby_asteroids(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    query.position()?;
    let start = Local::now().date_naive();
    let end = start + Duration::days(state.config.nasa.window_days);
    let upstream = state.upstream.clone();

    let result = tokio::task::spawn_blocking(move || upstream.neo_feed(start, end)).await;

    match result {
        Ok(Ok(body)) => Ok(Json(body)),
        Ok(Err(e)) => {
            log::error!("Error calling NASA API: {}", e);
            Err(ApiError::Upstream("Failed to fetch asteroid data"))
        }
        Err(e) => {
            log::error!("NeoWs request task failed: {}", e);
            Err(ApiError::Upstream("Failed to fetch asteroid data"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    use crate::web::config::Config;
    use crate::web::upstream::{Upstream, UpstreamError};

    #[derive(Default)]
    struct FakeUpstream {
        fail: bool,
        seen_window: Mutex<Option<(NaiveDate, NaiveDate)>>,
    }

    impl Upstream for FakeUpstream {
        fn satellites_above(
            &self,
            lat: f64,
            lng: f64,
            radius: u32,
        ) -> Result<serde_json::Value, UpstreamError> {
            if self.fail {
                return Err(UpstreamError::Status(401));
            }
            Ok(json!({"info": {"satcount": 1}, "above": [{
                "satname": "ISS", "satlat": lat, "satlng": lng, "satalt": radius as f64
            }]}))
        }

        fn neo_feed(
            &self,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<serde_json::Value, UpstreamError> {
            if self.fail {
                return Err(UpstreamError::Transport("dns".into()));
            }
            *self.seen_window.lock().unwrap() = Some((start, end));
            Ok(json!({"element_count": 0, "near_earth_objects": {}}))
        }
    }

    fn state(upstream: Arc<FakeUpstream>) -> AppState {
        let config = Config::from_yaml("n2yo:\n  api_key: a\nnasa:\n  api_key: b\n").unwrap();
        AppState {
            config: Arc::new(config),
            upstream,
        }
    }

    fn query(lat: f64, lng: f64, radius: u32) -> Query<NearbyQuery> {
        Query(NearbyQuery { lat, lng, radius })
    }

    #[tokio::test]
    async fn satellites_pass_through() {
        let app = state(Arc::new(FakeUpstream::default()));
        let Json(body) = nearby_satellites(State(app), query(28.6, 77.2, 25))
            .await
            .unwrap();
        assert_eq!(body["above"][0]["satname"], "ISS");
        assert_eq!(body["above"][0]["satalt"], 25.0);
    }

    #[tokio::test]
    async fn satellites_upstream_failure_is_bad_gateway() {
        let app = state(Arc::new(FakeUpstream {
            fail: true,
            ..Default::default()
        }));
        let err = nearby_satellites(State(app), query(0.0, 0.0, 25))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upstream("Failed to fetch satellite data")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn out_of_range_is_rejected() {
        let app = state(Arc::new(FakeUpstream::default()));
        let err = nearby_satellites(State(app.clone()), query(95.0, 0.0, 25))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = nearby_asteroids(State(app), query(0.0, 0.0, 120))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn asteroids_request_a_week() {
        let upstream = Arc::new(FakeUpstream::default());
        let app = state(upstream.clone());
        let Json(body) = nearby_asteroids(State(app), query(0.0, 0.0, 0))
            .await
            .unwrap();
        assert_eq!(body["element_count"], 0);

        let (start, end) = upstream.seen_window.lock().unwrap().unwrap();
        assert_eq!((end - start).num_days(), 7);
    }

    #[tokio::test]
    async fn asteroids_upstream_failure_is_bad_gateway() {
        let app = state(Arc::new(FakeUpstream {
            fail: true,
            ..Default::default()
        }));
        let err = nearby_asteroids(State(app), query(0.0, 0.0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Upstream("Failed to fetch asteroid data")));
    }
}
