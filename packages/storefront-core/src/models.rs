//! Records exchanged with the stores and over the wire.

use serde::{Deserialize, Serialize};

/// Book payload as submitted by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub read: bool,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, read: bool) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            read,
        }
    }
}

/// Book held by the [`BookStore`](crate::books::BookStore) with its stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBook {
    /// Assigned at creation, never reused while the store lives
    pub id: u64,
    #[serde(flatten)]
    pub book: Book,
}

/// Request to register a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

/// Persisted user together with the items it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    /// Never leaves the process
    #[serde(skip)]
    pub hashed_password: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Request to create an item for a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Persisted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub owner_id: u64,
}

/// Request to create or replace a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
}

/// Persisted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
}
