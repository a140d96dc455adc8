//! Common test utilities and helpers
//!
//! This module provides shared utilities for the HTTP tests:
//! - A test server over a fresh in-memory database
//! - Helpers to register users and create sites through the API
//! - Envelope assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
