use axum::Router;
use axum::http::HeaderValue;
use cfm_convert::ConvertState;
use cfm_domain::config::CorsConfig;
use cfm_kernel::prelude::ApiState;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState, convert: ConvertState) -> Router {
    let cors = cors_layer(&state.config.cors);
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(cfm_kernel::server::system_router().with_state(state))
        .merge(cfm_convert::convert_router().with_state(convert))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Merge all routes into the final router
    Router::new().merge(openapi_routes).merge(scalar_routes)
}

/// CORS for the web editor: explicit origins when configured, permissive in
/// development when the list is empty.
fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    if cfg.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin, "Skipping unparsable CORS origin: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
}
