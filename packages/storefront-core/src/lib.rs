//! Core storage layer for the storefront service.
//!
//! Provides the in-memory book list, the SQLite-backed user/item and
//! product stores, configuration and error types.

pub mod books;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod products;
pub mod users;

pub use database::{Database, Page};
pub use error::StoreError;
