use axum::http::{HeaderValue, Method};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::nearby as nearby_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::upstream::{HttpUpstream, Upstream};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn Upstream>,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(methods)
        .allow_headers(Any)
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.web.allowed_origins);

    Router::new()
        .route(
            "/api/satellites/nearby",
            get(nearby_handlers::nearby_satellites),
        )
        .route(
            "/api/asteroids/nearby",
            get(nearby_handlers::nearby_asteroids),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let upstream = HttpUpstream::new(
        config.n2yo.clone(),
        config.nasa.clone(),
        config.web.upstream_timeout,
    );

    let state = AppState {
        config: Arc::new(config),
        upstream: Arc::new(upstream),
    };
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::upstream::UpstreamError;
    use chrono::NaiveDate;

    struct Offline;

    impl Upstream for Offline {
        fn satellites_above(
            &self,
            _lat: f64,
            _lng: f64,
            _radius: u32,
        ) -> Result<serde_json::Value, UpstreamError> {
            Err(UpstreamError::Transport("offline".into()))
        }

        fn neo_feed(
            &self,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> Result<serde_json::Value, UpstreamError> {
            Err(UpstreamError::Transport("offline".into()))
        }
    }

    #[test]
    fn router_builds_with_default_and_wildcard_origins() {
        for origins in ["", "web:\n  allowed_origins: [\"*\"]\n"] {
            let yaml = format!("{origins}n2yo:\n  api_key: a\nnasa:\n  api_key: b\n");
            let state = AppState {
                config: Arc::new(Config::from_yaml(&yaml).unwrap()),
                upstream: Arc::new(Offline),
            };
            let _ = router(state);
        }
    }
}
