/**
 * Site Handlers
 *
 * HTTP handlers for listing, searching, creating and updating sites.
 *
 * # Endpoints
 *
 * - `GET /getSites` - all sites (public)
 * - `POST /getNearestSites` - proximity search (public)
 * - `POST /registerSite`, `POST /addMySite` - create a site (authenticated)
 * - `GET /getMySites` - caller's sites (authenticated)
 * - `POST /updateMySite` - partial update of a caller's site (authenticated)
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::backend::server::state::AppState;
use crate::backend::sites::db;
use crate::shared::geo::validate_coordinates;
use crate::shared::site::{parse_id, NearbySite, NearbySitesRequest, Site, SiteRequest, UpdateSiteRequest};
use crate::shared::{ApiResponse, ServerConfig, SharedError};

/// List every site
pub async fn get_sites(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Site>>>, BackendError> {
    let sites = db::list_sites(&state.db).await?;
    tracing::debug!("Listing {} sites", sites.len());
    Ok(Json(ApiResponse::success(sites)))
}

/// Resolve the radius of a proximity search
///
/// A missing radius uses the configured default; a given one must be a
/// positive number and is capped at the configured maximum.
pub fn effective_radius(config: &ServerConfig, requested: Option<f64>) -> Result<f64, SharedError> {
    match requested {
        None => Ok(config.default_search_radius_km),
        Some(radius) if radius.is_finite() && radius > 0.0 => Ok(radius.min(config.max_search_radius_km)),
        Some(_) => Err(SharedError::validation("radius", "Radius must be a positive number")),
    }
}

/// Active sites near a point
///
/// `userCords` is `[latitude, longitude]`. Each result carries its
/// `distanceKm` from the point.
///
/// # Errors
///
/// * `400 Bad Request` - Coordinates out of range or a non-positive radius
pub async fn get_nearest_sites(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NearbySitesRequest>,
) -> Result<Json<ApiResponse<Vec<NearbySite>>>, BackendError> {
    let [latitude, longitude] = request.user_cords;
    validate_coordinates(latitude, longitude)?;
    let radius_km = effective_radius(&state.config, request.radius)?;

    let hits = db::find_nearby_sites(
        &state.db,
        latitude,
        longitude,
        radius_km,
        state.config.max_search_results,
    )
    .await?;

    tracing::info!(
        "Proximity search at ({}, {}) within {} km: {} sites",
        latitude,
        longitude,
        radius_km,
        hits.len()
    );
    Ok(Json(ApiResponse::success(hits)))
}

/// Create a site owned by the caller
///
/// Serves both `/registerSite` and `/addMySite`. The owner email always
/// comes from the session, never from the body.
pub async fn register_site(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<SiteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Site>>), BackendError> {
    request.validate().map_err(|e| {
        tracing::warn!("Invalid site from {} ({}): {}", user.email, e.field(), e);
        e
    })?;

    let site = db::create_site(&state.db, &user.email, &request).await?;
    tracing::info!("Site created: {} ({}) by {}", site.name, site.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(site, "Site registered successfully")),
    ))
}

/// List the caller's sites
pub async fn get_my_sites(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Site>>>, BackendError> {
    let sites = db::list_sites_by_owner(&state.db, &user.email).await?;
    Ok(Json(ApiResponse::success(sites)))
}

/// Update one of the caller's sites
///
/// # Errors
///
/// * `400 Bad Request` - Malformed ID or an empty/invalid patch
/// * `404 Not Found` - No such site, or it belongs to someone else
pub async fn update_my_site(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateSiteRequest>,
) -> Result<Json<ApiResponse<Site>>, BackendError> {
    let site_id = parse_id("siteId", &request.site_id)?;
    request.update.validate()?;

    let site = db::update_owned_site(&state.db, site_id, &user.email, &request.update)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Site {} not found for owner {}", site_id, user.email);
            BackendError::not_found("Invalid ID")
        })?;

    tracing::info!("Site updated: {} by {}", site.id, user.email);
    Ok(Json(ApiResponse::success_with_message(site, "Site updated successfully")))
}
