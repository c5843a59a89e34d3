//! User and item persistence.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::database::{rowid, Page};
use crate::error::StoreError;
use crate::models::{Item, NewItem, NewUser, User};

/// Appended to the raw password in place of a real hash.
pub const PLACEHOLDER_HASH_SUFFIX: &str = "notreallyhashed";

/// Stand-in password transformation. Not a cryptographic hash.
pub fn placeholder_hash(password: &str) -> String {
    format!("{}{}", password, PLACEHOLDER_HASH_SUFFIX)
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        hashed_password: row.get(2)?,
        items: Vec::new(),
    })
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        owner_id: row.get(3)?,
    })
}

/// User/item queries over one session.
pub struct UserStore<'c> {
    conn: &'c Connection,
}

impl<'c> UserStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Looks up a user by id, with its items.
    pub fn get_user(&self, id: u64) -> Result<Option<User>, StoreError> {
        let Some(id) = rowid(id) else {
            return Ok(None);
        };
        let user = self
            .conn
            .query_row(
                "SELECT id, email, hashed_password FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )
            .optional()?;
        user.map(|u| self.with_items(u)).transpose()
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .conn
            .query_row(
                "SELECT id, email, hashed_password FROM users WHERE email = ?1",
                params![email],
                user_from_row,
            )
            .optional()?;
        user.map(|u| self.with_items(u)).transpose()
    }

    /// Returns one page of users in insertion order.
    pub fn list_users(&self, page: Page) -> Result<Vec<User>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, email, hashed_password FROM users ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![page.limit, page.skip], user_from_row)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(self.with_items(row?)?);
        }
        Ok(users)
    }

    /// Registers a user unless the email is already taken.
    pub fn create_user(&self, user: &NewUser) -> Result<User, StoreError> {
        if self.get_user_by_email(&user.email)?.is_some() {
            return Err(StoreError::Conflict("Email already registered".to_string()));
        }

        let hashed_password = placeholder_hash(&user.password);
        self.conn.execute(
            "INSERT INTO users (email, hashed_password) VALUES (?1, ?2)",
            params![user.email, hashed_password],
        )?;
        let id = self.conn.last_insert_rowid() as u64;
        tracing::info!("Created user {} ({})", id, user.email);

        Ok(User {
            id,
            email: user.email.clone(),
            hashed_password,
            items: Vec::new(),
        })
    }

    /// Creates an item owned by `user_id`. The owner must exist.
    pub fn create_item_for_user(&self, user_id: u64, item: &NewItem) -> Result<Item, StoreError> {
        let owner = rowid(user_id).ok_or_else(|| StoreError::not_found("User", user_id))?;
        let owner_exists = self
            .conn
            .query_row("SELECT 1 FROM users WHERE id = ?1", params![owner], |_| Ok(()))
            .optional()?
            .is_some();
        if !owner_exists {
            return Err(StoreError::not_found("User", user_id));
        }

        self.conn.execute(
            "INSERT INTO items (title, description, owner_id) VALUES (?1, ?2, ?3)",
            params![item.title, item.description, owner],
        )?;
        let id = self.conn.last_insert_rowid() as u64;
        tracing::info!("Created item {} for user {}", id, user_id);

        Ok(Item {
            id,
            title: item.title.clone(),
            description: item.description.clone(),
            owner_id: user_id,
        })
    }

    /// Returns one page of items across all owners.
    pub fn list_items(&self, page: Page) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, owner_id FROM items ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(params![page.limit, page.skip], item_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn items_for_owner(&self, owner_id: u64) -> Result<Vec<Item>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, owner_id FROM items WHERE owner_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![owner_id], item_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn count_users(&self) -> Result<u64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
    }

    fn with_items(&self, mut user: User) -> Result<User, StoreError> {
        user.items = self.items_for_owner(user.id)?;
        Ok(user)
    }
}
