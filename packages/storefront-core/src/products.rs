//! Product catalog persistence.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::database::{rowid, Page};
use crate::error::StoreError;
use crate::models::{NewProduct, Product};

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
    })
}

/// Product queries over one session.
pub struct ProductStore<'c> {
    conn: &'c Connection,
}

impl<'c> ProductStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn create_product(&self, product: &NewProduct) -> Result<Product, StoreError> {
        self.conn.execute(
            "INSERT INTO products (title, description, price) VALUES (?1, ?2, ?3)",
            params![product.title, product.description, product.price],
        )?;
        let id = self.conn.last_insert_rowid() as u64;
        tracing::info!("Created product {}", id);

        Ok(Product {
            id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
        })
    }

    /// Returns `None` when no product has this id.
    pub fn get_product(&self, id: u64) -> Result<Option<Product>, StoreError> {
        let Some(id) = rowid(id) else {
            return Ok(None);
        };
        Ok(self
            .conn
            .query_row(
                "SELECT id, title, description, price FROM products WHERE id = ?1",
                params![id],
                product_from_row,
            )
            .optional()?)
    }

    /// Returns one page of products in insertion order.
    pub fn list_products(&self, page: Page) -> Result<Vec<Product>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, price FROM products ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![page.limit, page.skip], product_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Replaces every field of an existing product.
    pub fn update_product(&self, id: u64, product: &NewProduct) -> Result<Product, StoreError> {
        let mut current = self
            .get_product(id)?
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        current.title = product.title.clone();
        current.description = product.description.clone();
        current.price = product.price;

        self.conn.execute(
            "UPDATE products SET title = ?1, description = ?2, price = ?3 WHERE id = ?4",
            params![current.title, current.description, current.price, current.id],
        )?;
        tracing::info!("Updated product {}", id);

        Ok(current)
    }
}
