/**
 * Order Database Operations
 *
 * Orders are written once at placement and afterwards only change status.
 * Every read and write is scoped by the caller's email: buyers see their
 * own orders, sellers see orders placed at their sites.
 */

use chrono::{DateTime, Utc};
use sqlx::{types::Json, SqlitePool};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::shared::order::{BuyerDetails, Order, OrderMaterial, OrderStatus, ShippingAddress};

const ORDER_COLUMNS: &str = "id, buyer_email, seller_email, site_id, site_name, materials, total_amount, status, \
     buyer_first_name, buyer_last_name, buyer_phone, shipping_address, created_at, updated_at";

/// Row of the `orders` table
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    buyer_email: String,
    seller_email: String,
    site_id: Uuid,
    site_name: String,
    materials: Json<BTreeMap<String, OrderMaterial>>,
    total_amount: f64,
    status: String,
    buyer_first_name: String,
    buyer_last_name: String,
    buyer_phone: String,
    shipping_address: Json<ShippingAddress>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = sqlx::Error;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Order {
            id: row.id,
            buyer_email: row.buyer_email,
            seller_email: row.seller_email,
            site_id: row.site_id,
            site_name: row.site_name,
            materials: row.materials.0,
            total_amount: row.total_amount,
            status,
            buyer_details: BuyerDetails {
                first_name: row.buyer_first_name,
                last_name: row.buyer_last_name,
                phone: row.buyer_phone,
            },
            shipping_address: row.shipping_address.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_orders(rows: Vec<OrderRow>) -> Result<Vec<Order>, sqlx::Error> {
    rows.into_iter().map(Order::try_from).collect()
}

/// Snapshot written when an order is placed
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub buyer_email: String,
    pub seller_email: String,
    pub site_id: Uuid,
    pub site_name: String,
    pub materials: BTreeMap<String, OrderMaterial>,
    pub total_amount: f64,
    pub buyer_details: BuyerDetails,
    pub shipping_address: ShippingAddress,
}

/// Insert a new `pending` order
pub async fn create_order(pool: &SqlitePool, order: &NewOrder) -> Result<Order, sqlx::Error> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, OrderRow>(&format!(
        r#"
        INSERT INTO orders (id, buyer_email, seller_email, site_id, site_name, materials, total_amount, status,
                            buyer_first_name, buyer_last_name, buyer_phone, shipping_address, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&order.buyer_email)
    .bind(&order.seller_email)
    .bind(order.site_id)
    .bind(&order.site_name)
    .bind(Json(&order.materials))
    .bind(order.total_amount)
    .bind(OrderStatus::Pending.as_str())
    .bind(&order.buyer_details.first_name)
    .bind(&order.buyer_details.last_name)
    .bind(&order.buyer_details.phone)
    .bind(Json(&order.shipping_address))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

/// Orders placed by `buyer_email`, newest first
pub async fn list_orders_by_buyer(pool: &SqlitePool, buyer_email: &str) -> Result<Vec<Order>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE buyer_email = ? ORDER BY created_at DESC"
    ))
    .bind(buyer_email)
    .fetch_all(pool)
    .await?;

    into_orders(rows)
}

/// Orders received by `seller_email`, newest first, optionally only those
/// in one status
pub async fn list_orders_by_seller(
    pool: &SqlitePool,
    seller_email: &str,
    status: Option<OrderStatus>,
) -> Result<Vec<Order>, sqlx::Error> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        r#"
        SELECT {ORDER_COLUMNS} FROM orders
        WHERE seller_email = ? AND (? IS NULL OR status = ?)
        ORDER BY created_at DESC
        "#
    ))
    .bind(seller_email)
    .bind(status.map(|s| s.as_str()))
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;

    into_orders(rows)
}

/// Set the status of an order received by `seller_email`
///
/// # Returns
/// The updated order, or `None` when no order with this ID was placed at
/// one of the seller's sites
pub async fn update_status_for_seller(
    pool: &SqlitePool,
    id: Uuid,
    seller_email: &str,
    status: OrderStatus,
) -> Result<Option<Order>, sqlx::Error> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        r#"
        UPDATE orders SET status = ?, updated_at = ?
        WHERE id = ? AND seller_email = ?
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(status.as_str())
    .bind(Utc::now())
    .bind(id)
    .bind(seller_email)
    .fetch_optional(pool)
    .await?;

    row.map(Order::try_from).transpose()
}

/// Fetch an order if `email` is its buyer or seller
pub async fn get_order_for_participant(
    pool: &SqlitePool,
    id: Uuid,
    email: &str,
) -> Result<Option<Order>, sqlx::Error> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND (buyer_email = ? OR seller_email = ?)"
    ))
    .bind(id)
    .bind(email)
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(Order::try_from).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::memory_pool;
    use crate::backend::sites::db::create_site;
    use crate::shared::geo::GeoPoint;
    use crate::shared::site::{MaterialMap, SiteRequest};

    async fn seeded() -> (SqlitePool, NewOrder) {
        let pool = memory_pool().await.unwrap();
        let site = create_site(
            &pool,
            "seller@example.com",
            &SiteRequest {
                name: "Yard".to_string(),
                phone: "1".to_string(),
                is_active: None,
                materials: MaterialMap::new(),
                location: GeoPoint::new(12.97, 77.59),
            },
        )
        .await
        .unwrap();

        let mut materials = BTreeMap::new();
        materials.insert("sand".to_string(), OrderMaterial { quantity: 2.0, price: 50.0 });
        let order = NewOrder {
            buyer_email: "buyer@example.com".to_string(),
            seller_email: site.email.clone(),
            site_id: site.id,
            site_name: site.name,
            materials,
            total_amount: 100.0,
            buyer_details: BuyerDetails {
                first_name: "B".to_string(),
                last_name: "Uyer".to_string(),
                phone: "2".to_string(),
            },
            shipping_address: ShippingAddress {
                city: Some("Bengaluru".to_string()),
                ..Default::default()
            },
        };
        (pool, order)
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let (pool, new_order) = seeded().await;
        let order = create_order(&pool, &new_order).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 100.0);
        assert_eq!(order.shipping_address.city.as_deref(), Some("Bengaluru"));
    }

    #[tokio::test]
    async fn test_lists_are_scoped() {
        let (pool, new_order) = seeded().await;
        create_order(&pool, &new_order).await.unwrap();

        assert_eq!(list_orders_by_buyer(&pool, "buyer@example.com").await.unwrap().len(), 1);
        assert!(list_orders_by_buyer(&pool, "seller@example.com").await.unwrap().is_empty());
        assert_eq!(list_orders_by_seller(&pool, "seller@example.com", None).await.unwrap().len(), 1);
        assert_eq!(
            list_orders_by_seller(&pool, "seller@example.com", Some(OrderStatus::Pending))
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(list_orders_by_seller(&pool, "seller@example.com", Some(OrderStatus::Approved))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_status_update_requires_seller() {
        let (pool, new_order) = seeded().await;
        let order = create_order(&pool, &new_order).await.unwrap();

        let by_buyer = update_status_for_seller(&pool, order.id, "buyer@example.com", OrderStatus::Completed)
            .await
            .unwrap();
        assert!(by_buyer.is_none());

        let updated = update_status_for_seller(&pool, order.id, "seller@example.com", OrderStatus::Shipping)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipping);
        assert!(updated.updated_at >= order.updated_at);
    }

    #[tokio::test]
    async fn test_participant_fetch() {
        let (pool, new_order) = seeded().await;
        let order = create_order(&pool, &new_order).await.unwrap();

        assert!(get_order_for_participant(&pool, order.id, "buyer@example.com").await.unwrap().is_some());
        assert!(get_order_for_participant(&pool, order.id, "seller@example.com").await.unwrap().is_some());
        assert!(get_order_for_participant(&pool, order.id, "other@example.com").await.unwrap().is_none());
    }
}
