/**
 * Site Routes
 *
 * Listing and proximity search are public. Creating, listing and updating
 * one's own sites require a session.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::sites::{get_my_sites, get_nearest_sites, get_sites, register_site, update_my_site};

/// Add site routes to `router`
pub fn configure_site_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/registerSite", post(register_site))
        .route("/addMySite", post(register_site))
        .route("/getMySites", get(get_my_sites))
        .route("/updateMySite", post(update_my_site))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    router
        .route("/getSites", get(get_sites))
        .route("/getNearestSites", post(get_nearest_sites))
        .merge(protected)
}
