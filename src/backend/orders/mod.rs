//! Orders Module
//!
//! Orders placed by buyers at sites, and the seller-side status workflow.
//!
//! - **`db`** - Order storage, scoped by buyer or seller email
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;

pub use handlers::{
    accept_order, get_order, my_orders, place_order, reject_order, seller_orders, seller_pending_orders,
    update_order_status,
};
