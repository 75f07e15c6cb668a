use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::nearby::NearbyQuery;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::nearby::nearby_satellites,
        super::api::nearby::nearby_asteroids,
    ),
    components(schemas(ErrorResponse, NearbyQuery)),
    info(
        title = "Sat-Globe Feed Proxy",
        description = "Proxies satellite and near-earth-object feeds for the globe client",
        version = "0.1.0"
    ),
    tags(
        (name = "feeds", description = "Nearby satellites and near-earth objects")
    )
)]
pub struct ApiDoc;
