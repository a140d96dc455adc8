//! Site types
//!
//! A site is a construction site listing surplus materials. These are the
//! wire types for site endpoints; field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::shared::geo::GeoPoint;
use crate::shared::SharedError;

/// Stock and unit price of one material at a site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub stock: f64,
    pub price: f64,
}

/// Materials keyed by name
pub type MaterialMap = BTreeMap<String, Material>;

/// A registered site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Uuid,
    pub name: String,
    /// Owner email
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub materials: MaterialMap,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Proximity search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySite {
    #[serde(flatten)]
    pub site: Site,
    pub distance_km: f64,
}

/// Body of `POST /registerSite` and `POST /addMySite`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub materials: MaterialMap,
    pub location: GeoPoint,
}

impl SiteRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)?;
        validate_materials(&self.materials)?;
        self.location.validate()
    }
}

/// Fields of a site that an owner may change
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
    pub materials: Option<MaterialMap>,
    pub location: Option<GeoPoint>,
}

impl SitePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.is_active.is_none()
            && self.materials.is_none()
            && self.location.is_none()
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        if self.is_empty() {
            return Err(SharedError::validation("update", "Nothing to update"));
        }
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(phone) = &self.phone {
            require_text("phone", phone)?;
        }
        if let Some(materials) = &self.materials {
            validate_materials(materials)?;
        }
        if let Some(location) = &self.location {
            location.validate()?;
        }
        Ok(())
    }
}

/// Body of `POST /updateMySite`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteRequest {
    pub site_id: String,
    pub update: SitePatch,
}

/// Body of `POST /getNearestSites`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySitesRequest {
    /// `[latitude, longitude]` of the searcher
    pub user_cords: [f64; 2],
    /// Search radius in kilometres
    #[serde(default)]
    pub radius: Option<f64>,
}

fn require_text(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

fn validate_materials(materials: &MaterialMap) -> Result<(), SharedError> {
    for (name, material) in materials {
        if name.trim().is_empty() {
            return Err(SharedError::validation("materials", "Material name is required"));
        }
        if !material.stock.is_finite() || material.stock < 0.0 {
            return Err(SharedError::validation(
                "materials",
                format!("Stock for {} must be zero or more", name),
            ));
        }
        if !material.price.is_finite() || material.price < 0.0 {
            return Err(SharedError::validation(
                "materials",
                format!("Price for {} must be zero or more", name),
            ));
        }
    }
    Ok(())
}

/// Parse an identifier supplied as a string in a request
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, SharedError> {
    Uuid::parse_str(raw.trim()).map_err(|_| SharedError::validation(field, "Invalid ID"))
}
