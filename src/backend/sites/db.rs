/**
 * Site Database Operations
 *
 * Sites keep their location in two REAL columns (`latitude`, `longitude`)
 * covered by a composite index. Proximity search narrows candidates with a
 * bounding box in SQL and then filters and sorts by exact great-circle
 * distance.
 */

use chrono::{DateTime, Utc};
use sqlx::{types::Json, SqlitePool};
use uuid::Uuid;

use crate::shared::geo::{haversine_km, BoundingBox, GeoPoint};
use crate::shared::site::{MaterialMap, NearbySite, Site, SitePatch, SiteRequest};

const SITE_COLUMNS: &str =
    "id, name, email, phone, is_active, materials, longitude, latitude, created_at, updated_at";

/// Row of the `sites` table
#[derive(Debug, sqlx::FromRow)]
struct SiteRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    is_active: bool,
    materials: Json<MaterialMap>,
    longitude: f64,
    latitude: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Site {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            is_active: row.is_active,
            materials: row.materials.0,
            location: GeoPoint::new(row.latitude, row.longitude),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Create a site owned by `owner_email`
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `owner_email` - Email of the authenticated owner
/// * `request` - Validated site fields
///
/// # Returns
/// The stored site
pub async fn create_site(pool: &SqlitePool, owner_email: &str, request: &SiteRequest) -> Result<Site, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, SiteRow>(&format!(
        r#"
        INSERT INTO sites (id, name, email, phone, is_active, materials, longitude, latitude, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {SITE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.name.trim())
    .bind(owner_email)
    .bind(request.phone.trim())
    .bind(request.is_active.unwrap_or(true))
    .bind(Json(&request.materials))
    .bind(request.location.longitude())
    .bind(request.location.latitude())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// All sites, newest first
pub async fn list_sites(pool: &SqlitePool) -> Result<Vec<Site>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SiteRow>(&format!(
        "SELECT {SITE_COLUMNS} FROM sites ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Site::from).collect())
}

/// Sites owned by `owner_email`, newest first
pub async fn list_sites_by_owner(pool: &SqlitePool, owner_email: &str) -> Result<Vec<Site>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SiteRow>(&format!(
        "SELECT {SITE_COLUMNS} FROM sites WHERE email = ? ORDER BY created_at DESC"
    ))
    .bind(owner_email)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Site::from).collect())
}

/// Get site by ID
pub async fn get_site(pool: &SqlitePool, id: Uuid) -> Result<Option<Site>, sqlx::Error> {
    let row = sqlx::query_as::<_, SiteRow>(&format!("SELECT {SITE_COLUMNS} FROM sites WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Site::from))
}

/// Apply a partial update to a site the caller owns
///
/// Ownership and existence are checked by the same statement that writes,
/// so there is no window between check and update.
///
/// # Returns
/// The updated site, or `None` when no site with this ID belongs to
/// `owner_email`
pub async fn update_owned_site(
    pool: &SqlitePool,
    id: Uuid,
    owner_email: &str,
    patch: &SitePatch,
) -> Result<Option<Site>, sqlx::Error> {
    let row = sqlx::query_as::<_, SiteRow>(&format!(
        r#"
        UPDATE sites SET
            name = COALESCE(?, name),
            phone = COALESCE(?, phone),
            is_active = COALESCE(?, is_active),
            materials = COALESCE(?, materials),
            longitude = COALESCE(?, longitude),
            latitude = COALESCE(?, latitude),
            updated_at = ?
        WHERE id = ? AND email = ?
        RETURNING {SITE_COLUMNS}
        "#
    ))
    .bind(patch.name.as_deref().map(str::trim))
    .bind(patch.phone.as_deref().map(str::trim))
    .bind(patch.is_active)
    .bind(patch.materials.as_ref().map(Json))
    .bind(patch.location.as_ref().map(GeoPoint::longitude))
    .bind(patch.location.as_ref().map(GeoPoint::latitude))
    .bind(Utc::now())
    .bind(id)
    .bind(owner_email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Site::from))
}

/// Active sites within `radius_km` of a point, nearest first
///
/// # Arguments
/// * `latitude`, `longitude` - Search centre
/// * `radius_km` - Inclusive search radius, already validated and clamped
/// * `limit` - Maximum number of sites returned
pub async fn find_nearby_sites(
    pool: &SqlitePool,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    limit: usize,
) -> Result<Vec<NearbySite>, sqlx::Error> {
    let bbox = BoundingBox::around(latitude, longitude, radius_km);

    let rows = match bbox.longitude {
        Some((min_lng, max_lng)) => {
            sqlx::query_as::<_, SiteRow>(&format!(
                r#"
                SELECT {SITE_COLUMNS} FROM sites
                WHERE is_active = 1
                  AND latitude BETWEEN ? AND ?
                  AND longitude BETWEEN ? AND ?
                "#
            ))
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(min_lng)
            .bind(max_lng)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, SiteRow>(&format!(
                r#"
                SELECT {SITE_COLUMNS} FROM sites
                WHERE is_active = 1
                  AND latitude BETWEEN ? AND ?
                "#
            ))
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .fetch_all(pool)
            .await?
        }
    };

    let mut hits: Vec<NearbySite> = rows
        .into_iter()
        .map(Site::from)
        .filter_map(|site| {
            let distance_km = haversine_km(
                latitude,
                longitude,
                site.location.latitude(),
                site.location.longitude(),
            );
            (distance_km <= radius_km).then_some(NearbySite { site, distance_km })
        })
        .collect();

    hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    hits.truncate(limit);
    Ok(hits)
}
