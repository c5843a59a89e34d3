//! REST API server for the storefront service.
//!
//! Provides HTTP endpoints for the book list, users with their items,
//! and the product catalog, plus request routing.

pub mod handlers;
pub mod router;
pub mod server;
