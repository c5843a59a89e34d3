//! Service-level endpoints that touch no store.

use hyper::{body::Bytes, Request, Response};

use super::request_utils::{json_response, MatchitParams};
use super::response::ok_response;
use crate::router::{AppState, RouterError};

/// Welcome message.
///
/// # Endpoint
/// `GET /`
pub async fn index(
    _req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    _state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    json_response(
        200,
        &ok_response("Welcome, resources live under /books, /users, /items and /products"),
    )
}

/// Liveness probe.
///
/// # Endpoint
/// `GET /ping`
///
/// # Response
/// ```json
/// {"status": "ok", "code": 200, "messages": [], "data": "Pong!"}
/// ```
pub async fn ping(
    _req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    _state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    json_response(200, &ok_response("Pong!"))
}
