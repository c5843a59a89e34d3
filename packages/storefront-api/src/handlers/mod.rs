//! HTTP endpoint implementations, one module per resource.

pub mod book_handlers;
pub mod product_handlers;
pub mod request_utils;
pub mod response;
pub mod service_handlers;
pub mod user_handlers;

pub use book_handlers::{create_book, delete_book, list_books, update_book};
pub use product_handlers::{create_product, list_products, read_product, update_product};
pub use response::{error_response, ok_response, success_response, ApiResponse, ErrorResponse};
pub use service_handlers::{index, ping};
pub use user_handlers::{create_item_for_user, create_user, list_items, list_users, read_user};
