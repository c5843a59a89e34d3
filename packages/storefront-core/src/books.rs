//! Process-local book list.
//!
//! Books live only in memory and are lost on restart. Each book receives a
//! stable id at creation so that updates and removals do not depend on its
//! current position in the list.

use std::sync::RwLock;

use crate::error::StoreError;
use crate::models::{Book, StoredBook};

/// Rows the store starts with and returns to on [`BookStore::reset`].
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new("Asus", "John Mejia", true),
        Book::new("Dell", "Johny Marin", false),
        Book::new("HP", "Cristian Agudelo", true),
    ]
}

#[derive(Debug)]
struct BookList {
    books: Vec<StoredBook>,
    next_id: u64,
}

impl BookList {
    fn seeded() -> Self {
        let mut list = Self {
            books: Vec::new(),
            next_id: 0,
        };
        for book in seed_books() {
            list.push(book);
        }
        list
    }

    fn push(&mut self, book: Book) -> StoredBook {
        let stored = StoredBook {
            id: self.next_id,
            book,
        };
        self.next_id += 1;
        self.books.push(stored.clone());
        stored
    }

    fn position(&self, id: u64) -> Result<usize, StoreError> {
        self.books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| StoreError::not_found("Book", id))
    }
}

/// Ordered in-memory book collection shared by request handlers.
#[derive(Debug)]
pub struct BookStore {
    inner: RwLock<BookList>,
}

impl BookStore {
    /// Creates a store holding the seed books.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BookList::seeded()),
        }
    }

    /// Creates a store with no books at all.
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(BookList {
                books: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Clears the store, reseeds it and restarts id assignment.
    pub fn reset(&self) -> Result<(), StoreError> {
        let mut list = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        *list = BookList::seeded();
        Ok(())
    }

    /// Returns every book in insertion order.
    pub fn list(&self) -> Result<Vec<StoredBook>, StoreError> {
        let list = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(list.books.clone())
    }

    /// Number of books currently held.
    pub fn len(&self) -> Result<usize, StoreError> {
        let list = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(list.books.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub fn get(&self, id: u64) -> Result<StoredBook, StoreError> {
        let list = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let index = list.position(id)?;
        Ok(list.books[index].clone())
    }

    /// Appends a book and returns it with its assigned id.
    pub fn create(&self, book: Book) -> Result<StoredBook, StoreError> {
        let mut list = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(list.push(book))
    }

    /// Replaces the book with `id` in place, keeping its position.
    pub fn update(&self, id: u64, book: Book) -> Result<StoredBook, StoreError> {
        let mut list = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let index = list.position(id)?;
        list.books[index].book = book;
        Ok(list.books[index].clone())
    }

    /// Removes the book with `id` and returns it.
    pub fn remove(&self, id: u64) -> Result<StoredBook, StoreError> {
        let mut list = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let index = list.position(id)?;
        Ok(list.books.remove(index))
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}
