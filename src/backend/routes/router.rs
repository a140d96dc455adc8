/**
 * Router Configuration
 *
 * Assembles every route group, then wraps the result in the request
 * tracing and CORS layers.
 *
 * # Layers
 *
 * - `TraceLayer` - one tracing span per request
 * - `CorsLayer` - the configured origins, with credentials so the browser
 *   sends the session cookie cross-origin
 */

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::Json,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::order_routes::configure_order_routes;
use crate::backend::routes::site_routes::configure_site_routes;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, ApiStatus};

/// Create the application router
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_api_routes(router, &app_state);
    let router = configure_site_routes(router, &app_state);
    let router = configure_order_routes(router, &app_state);

    let cors = cors_layer(&app_state.config.cors_origins);

    router
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::message(ApiStatus::Failed, "Route not found")),
            )
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// CORS policy for the configured origins
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}
