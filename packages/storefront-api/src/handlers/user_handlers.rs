//! Handlers for users and the items they own.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};

use storefront_core::models::{NewItem, NewUser};
use storefront_core::users::UserStore;

use super::request_utils::{
    json_response, parse_id_param, parse_json_body, parse_page, with_session, MatchitParams,
};
use super::response::{ok_response, success_response};
use crate::router::{AppState, RouterError};

/// Registers a user.
///
/// # Endpoint
/// `POST /users`
///
/// # Request Body
/// ```json
/// {"email": "a@example.com", "password": "secret"}
/// ```
///
/// # Response
/// - **201 Created**: `{id, email, items}`; the password hash is never returned
///
/// # Errors
/// - **400 Bad Request**: invalid body, or `Email already registered`
pub async fn create_user(
    req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new_user: NewUser = parse_json_body(req.body())?;
    let user = with_session(Arc::clone(&state.db), move |conn| {
        UserStore::new(conn).create_user(&new_user)
    })
    .await?;
    json_response(201, &success_response(201, "User created !", user))
}

/// Lists a page of users.
///
/// # Endpoint
/// `GET /users?skip=0&limit=100`
pub async fn list_users(
    req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let page = parse_page(req.uri().query(), &state.config)?;
    let users = with_session(Arc::clone(&state.db), move |conn| {
        UserStore::new(conn).list_users(page)
    })
    .await?;
    json_response(200, &ok_response(users))
}

/// Reads one user with its items.
///
/// # Endpoint
/// `GET /users/{id}`
///
/// # Errors
/// - **404 Not Found**: `User not found`
pub async fn read_user(
    _req: Request<Bytes>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id_param(&params)?;
    let user = with_session(Arc::clone(&state.db), move |conn| {
        UserStore::new(conn).get_user(id)
    })
    .await?
    .ok_or_else(|| RouterError::NotFound("User not found".to_string()))?;
    json_response(200, &ok_response(user))
}

/// Creates an item owned by a user.
///
/// # Endpoint
/// `POST /users/{id}/items`
///
/// # Request Body
/// ```json
/// {"title": "lamp", "description": "desk lamp"}
/// ```
///
/// # Errors
/// - **400 Bad Request**: invalid id or body
/// - **404 Not Found**: the owner does not exist
pub async fn create_item_for_user(
    req: Request<Bytes>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let user_id = parse_id_param(&params)?;
    let new_item: NewItem = parse_json_body(req.body())?;
    let item = with_session(Arc::clone(&state.db), move |conn| {
        UserStore::new(conn).create_item_for_user(user_id, &new_item)
    })
    .await?;
    json_response(201, &success_response(201, "Item created !", item))
}

/// Lists a page of items across all users.
///
/// # Endpoint
/// `GET /items?skip=0&limit=100`
pub async fn list_items(
    req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let page = parse_page(req.uri().query(), &state.config)?;
    let items = with_session(Arc::clone(&state.db), move |conn| {
        UserStore::new(conn).list_items(page)
    })
    .await?;
    json_response(200, &ok_response(items))
}
