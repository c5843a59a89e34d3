//! Request utilities for HTTP endpoints.

use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::Response;
use percent_encoding::percent_decode_str;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::time;

use crate::router::RouterError;
use storefront_core::config::ServerConfig;
use storefront_core::{Database, Page, StoreError};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout<B>(
    body: B,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, body.collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Deserializes a JSON request body.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, RouterError> {
    serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Parses the numeric `id` route parameter.
pub fn parse_id_param(params: &MatchitParams<'_, '_>) -> Result<u64, RouterError> {
    let raw = params.get("id").unwrap_or("");
    raw.parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid id '{}': {}", raw, e)))
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error(e: StoreError) -> RouterError {
    match e {
        StoreError::NotFound { .. } => RouterError::NotFound(e.to_string()),
        StoreError::Conflict(msg) => RouterError::BadRequest(msg),
        _ => RouterError::InternalError(format!("Store error: {}", e)),
    }
}

/// Runs `f` on a blocking thread with a session opened for this request.
///
/// The connection is dropped when `f` returns, whatever the outcome.
pub async fn with_session<T, F>(db: Arc<Database>, f: F) -> Result<T, RouterError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let conn = db.session()?;
        f(&conn)
    })
    .await
    .map_err(|e| RouterError::InternalError(format!("Blocking task failed: {}", e)))?
    .map_err(map_store_error)
}

/// Helper to serialize a body and build an HTTP response
pub fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(body)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Parse `skip` and `limit` from a URL query string.
///
/// Missing values fall back to 0 and the configured default page size.
/// Requested limits above the configured maximum are clamped.
pub fn parse_page(query_str: Option<&str>, config: &ServerConfig) -> Result<Page, RouterError> {
    let mut page = Page {
        skip: 0,
        limit: config.default_page_limit,
    };

    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            let parts: Vec<&str> = pair.split('=').collect();
            if parts.len() != 2 {
                continue;
            }
            let key = parts[0];
            let decoded_value = percent_decode_str(parts[1]).decode_utf8_lossy();

            match key {
                "skip" => {
                    page.skip = decoded_value.parse().map_err(|e| {
                        RouterError::BadRequest(format!(
                            "Invalid skip value '{}': {}",
                            decoded_value, e
                        ))
                    })?;
                }
                "limit" => {
                    page.limit = decoded_value.parse().map_err(|e| {
                        RouterError::BadRequest(format!(
                            "Invalid limit value '{}': {}",
                            decoded_value, e
                        ))
                    })?;
                }
                _ => {}
            }
        }
    }

    page.limit = page.limit.min(config.max_page_limit);
    Ok(page)
}
