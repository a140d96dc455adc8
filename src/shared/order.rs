//! Order types
//!
//! An order snapshots the buyer's details and the site's material prices at
//! the moment it is placed, so later edits to the site or the user never
//! change what was agreed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::site::MaterialMap;
use crate::shared::SharedError;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Shipping,
    Delivered,
    Cancelled,
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        Self::Pending,
        Self::Approved,
        Self::Shipping,
        Self::Delivered,
        Self::Cancelled,
        Self::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Statuses a seller may move an order into. New orders are always
    /// `pending`, so it is never a valid target.
    pub fn is_seller_target(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Parse a status a seller is asking for
    pub fn parse_seller_target(raw: &str) -> Result<Self, SharedError> {
        raw.parse::<Self>()
            .ok()
            .filter(Self::is_seller_target)
            .ok_or_else(|| SharedError::validation("status", "Invalid status"))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SharedError::validation("status", "Invalid status"))
    }
}

/// Quantity ordered and the unit price captured at placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderMaterial {
    pub quantity: f64,
    pub price: f64,
}

/// Buyer contact details captured at placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Delivery address; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<[f64; 2]>,
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub buyer_email: String,
    pub seller_email: String,
    pub site_id: Uuid,
    pub site_name: String,
    pub materials: BTreeMap<String, OrderMaterial>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub buyer_details: BuyerDetails,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested line of a new order. A client-sent price is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub quantity: f64,
}

/// Body of `POST /placeOrder`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub site_id: String,
    pub materials: BTreeMap<String, OrderLineRequest>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

/// Body of `POST /updateOrderStatus`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_id: String,
    pub status: String,
}

/// Body of `POST /acceptOrder` and `POST /rejectOrder`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderActionRequest {
    pub order_id: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Price requested lines against a site's current materials
///
/// Returns the material snapshot and the order total. Every requested
/// material must be listed on the site, with a positive quantity that does
/// not exceed current stock.
pub fn price_order(
    site_materials: &MaterialMap,
    requested: &BTreeMap<String, OrderLineRequest>,
) -> Result<(BTreeMap<String, OrderMaterial>, f64), SharedError> {
    if requested.is_empty() {
        return Err(SharedError::validation("materials", "At least one material is required"));
    }

    let mut snapshot = BTreeMap::new();
    let mut total = 0.0;

    for (name, line) in requested {
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(SharedError::validation(
                "materials",
                format!("Quantity for {} must be greater than zero", name),
            ));
        }
        let material = site_materials.get(name).ok_or_else(|| {
            SharedError::validation("materials", format!("{} is not sold at this site", name))
        })?;
        if line.quantity > material.stock {
            return Err(SharedError::validation(
                "materials",
                format!("Insufficient stock for {}", name),
            ));
        }

        total += line.quantity * material.price;
        snapshot.insert(
            name.clone(),
            OrderMaterial {
                quantity: line.quantity,
                price: material.price,
            },
        );
    }

    Ok((snapshot, total))
}
