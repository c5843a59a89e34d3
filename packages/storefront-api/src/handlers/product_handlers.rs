//! Handlers for the product catalog.

use std::sync::Arc;

use hyper::{body::Bytes, Request, Response};

use storefront_core::models::NewProduct;
use storefront_core::products::ProductStore;

use super::request_utils::{
    json_response, parse_id_param, parse_json_body, parse_page, with_session, MatchitParams,
};
use super::response::{ok_response, success_response};
use crate::router::{AppState, RouterError};

/// Creates a product.
///
/// # Endpoint
/// `POST /products`
///
/// # Request Body
/// ```json
/// {"title": "Mouse", "description": "Wireless", "price": 19.5}
/// ```
pub async fn create_product(
    req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let new_product: NewProduct = parse_json_body(req.body())?;
    let product = with_session(Arc::clone(&state.db), move |conn| {
        ProductStore::new(conn).create_product(&new_product)
    })
    .await?;
    json_response(201, &success_response(201, "Product created !", product))
}

/// Reads one product.
///
/// # Endpoint
/// `GET /products/{id}`
///
/// # Errors
/// - **404 Not Found**: `Product not found`
pub async fn read_product(
    _req: Request<Bytes>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id_param(&params)?;
    let product = with_session(Arc::clone(&state.db), move |conn| {
        ProductStore::new(conn).get_product(id)
    })
    .await?
    .ok_or_else(|| RouterError::NotFound("Product not found".to_string()))?;
    json_response(200, &ok_response(product))
}

/// Lists a page of products.
///
/// # Endpoint
/// `GET /products?skip=0&limit=100`
pub async fn list_products(
    req: Request<Bytes>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let page = parse_page(req.uri().query(), &state.config)?;
    let products = with_session(Arc::clone(&state.db), move |conn| {
        ProductStore::new(conn).list_products(page)
    })
    .await?;
    json_response(200, &ok_response(products))
}

/// Replaces every field of a product.
///
/// # Endpoint
/// `PUT /products/{id}`
///
/// # Errors
/// - **400 Bad Request**: invalid id or body
/// - **404 Not Found**: `Product not found`
pub async fn update_product(
    req: Request<Bytes>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id_param(&params)?;
    let fields: NewProduct = parse_json_body(req.body())?;
    let product = with_session(Arc::clone(&state.db), move |conn| {
        ProductStore::new(conn).update_product(id, &fields)
    })
    .await?;
    json_response(200, &success_response(200, "Product updated !", product))
}
