//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::handlers;
use crate::handlers::request_utils::read_request_body_with_timeout;
use storefront_core::books::BookStore;
use storefront_core::config::ServerConfig;
use storefront_core::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// In-memory book list
    pub books: Arc<BookStore>,
    /// SQLite database handle
    pub db: Arc<Database>,
    /// Service configuration
    pub config: Arc<ServerConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with default routes.
    pub fn new(books: Arc<BookStore>, db: Arc<Database>, config: Arc<ServerConfig>) -> Self {
        let routes = [
            ("/", RouteHandler::Index),
            ("/ping", RouteHandler::Ping),
            ("/books", RouteHandler::Book),
            ("/books/{id}", RouteHandler::Book),
            ("/users", RouteHandler::User),
            ("/users/{id}", RouteHandler::User),
            ("/users/{id}/items", RouteHandler::UserItem),
            ("/items", RouteHandler::Item),
            ("/products", RouteHandler::Product),
            ("/products/{id}", RouteHandler::Product),
        ];

        let mut router = MatchitRouter::new();
        for (path, handler) in routes {
            router
                .insert(path, handler)
                .unwrap_or_else(|e| panic!("Failed to insert {} route: {}", path, e));
        }

        Self {
            inner: router,
            state: AppState { books, db, config },
        }
    }

    /// Shared state handed to every handler.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// The request body is read in full, under the configured timeout,
    /// before the handler runs.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let path = normalize_path(req.uri().path());
        tracing::debug!("{} {}", req.method(), req.uri());

        // Match the route
        match self.inner.at(&path) {
            Ok(matched) => {
                let (parts, body) = req.into_parts();
                let body =
                    read_request_body_with_timeout(body, self.state.config.request_timeout_ms)
                        .await?;
                let req = Request::from_parts(parts, body);
                matched
                    .value
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => Err(RouterError::NotFound(format!("No route found for {}", path))),
        }
    }
}

/// Drops trailing slashes so `/users/` and `/users` reach the same route.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Route handler function.
enum RouteHandler {
    Index,
    Ping,
    Book,
    User,
    UserItem,
    Item,
    Product,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle(
        &self,
        req: Request<Bytes>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError> {
        let has_id_param = params.get("id").is_some();
        let method = req.method().clone();
        match self {
            RouteHandler::Index if method == Method::GET => handlers::index(req, params, state).await,
            RouteHandler::Ping if method == Method::GET => handlers::ping(req, params, state).await,
            RouteHandler::Book => match (method, has_id_param) {
                (Method::GET, false) => handlers::list_books(req, params, state).await,
                (Method::POST, false) => handlers::create_book(req, params, state).await,
                (Method::PUT, true) => handlers::update_book(req, params, state).await,
                (Method::DELETE, true) => handlers::delete_book(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::User => match (method, has_id_param) {
                (Method::GET, false) => handlers::list_users(req, params, state).await,
                (Method::POST, false) => handlers::create_user(req, params, state).await,
                (Method::GET, true) => handlers::read_user(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::UserItem if method == Method::POST => {
                handlers::create_item_for_user(req, params, state).await
            }
            RouteHandler::Item if method == Method::GET => {
                handlers::list_items(req, params, state).await
            }
            RouteHandler::Product => match (method, has_id_param) {
                (Method::GET, false) => handlers::list_products(req, params, state).await,
                (Method::POST, false) => handlers::create_product(req, params, state).await,
                (Method::GET, true) => handlers::read_product(req, params, state).await,
                (Method::PUT, true) => handlers::update_product(req, params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            _ => Err(RouterError::MethodNotAllowed),
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
}

impl RouterError {
    /// HTTP status code this error is reported with.
    pub fn status(&self) -> u16 {
        match self {
            RouterError::MethodNotAllowed => 405,
            RouterError::InternalError(_) => 500,
            RouterError::Timeout => 408,
            RouterError::BadRequest(_) => 400,
            RouterError::NotFound(_) => 404,
        }
    }
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let status = err.status();
        let detail = match &err {
            RouterError::MethodNotAllowed => "Method Not Allowed",
            // Internal details stay in the log
            RouterError::InternalError(_) => "Internal Server Error",
            RouterError::Timeout => "Request Timeout",
            RouterError::BadRequest(msg) => msg.as_str(),
            RouterError::NotFound(msg) => msg.as_str(),
        };

        let error_response = crate::handlers::error_response(status, detail.to_string());
        let body = serde_json::to_vec(&error_response).unwrap_or_else(|e| {
            format!(
                "{{\"status\":\"error\",\"code\":500,\"detail\":\"Failed to serialize error: {}\"}}",
                e
            )
            .into_bytes()
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
