//! Sites Module
//!
//! Construction sites and the surplus materials they list.
//!
//! - **`db`** - Site storage and proximity search
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;

pub use handlers::{get_my_sites, get_nearest_sites, get_sites, register_site, update_my_site};
