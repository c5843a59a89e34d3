//! End-to-end tests driving the router with in-memory request bodies.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use anyhow::Result;
use http_body_util::Full;
use hyper::body::{Body, Bytes, Frame};
use hyper::{Method, Request};
use serde_json::{json, Value};
use tempfile::TempDir;

use storefront_api::router::{Router, RouterError};
use storefront_core::books::BookStore;
use storefront_core::config::ServerConfig;
use storefront_core::Database;

struct TestApp {
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Result<Self> {
        Self::with_config(ServerConfig::default())
    }

    /// Builds an app on a fresh database, overriding only the database path.
    fn with_config(config: ServerConfig) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = ServerConfig {
            database_path: dir.path().join("api.db"),
            ..config
        };
        let db = Database::new(config.database_path.clone());
        db.init()?;
        let router = Router::new(Arc::new(BookStore::new()), Arc::new(db), Arc::new(config));
        Ok(Self { router, _dir: dir })
    }

    /// Sends a request and returns the status with the parsed JSON body.
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (u16, Value) {
        let bytes = body
            .map(|b| Bytes::from(serde_json::to_vec(&b).unwrap()))
            .unwrap_or_default();
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Full::new(bytes))
            .unwrap();

        let response = match self.router.route(req).await {
            Ok(response) => response,
            Err(err) => err.into(),
        };
        let status = response.status().as_u16();
        let json = serde_json::from_slice(response.body()).unwrap_or(Value::Null);
        (status, json)
    }
}

#[tokio::test]
async fn test_index_and_ping() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.send(Method::GET, "/", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert!(body["data"].as_str().unwrap().starts_with("Welcome"));

    let (status, body) = app.send(Method::GET, "/ping", None).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"status": "ok", "code": 200, "messages": [], "data": "Pong!"})
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_and_method() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.send(Method::GET, "/nowhere", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["status"], "error");
    assert!(body["detail"].as_str().unwrap().contains("/nowhere"));

    let (status, _) = app.send(Method::DELETE, "/products/1", None).await;
    assert_eq!(status, 405);
    let (status, _) = app.send(Method::POST, "/ping", None).await;
    assert_eq!(status, 405);
    Ok(())
}

#[tokio::test]
async fn test_create_book_is_fourth_entry() -> Result<()> {
    let app = TestApp::new()?;

    let book = json!({"title": "T", "author": "A", "read": false});
    let (status, body) = app.send(Method::POST, "/books", Some(book)).await;
    assert_eq!(status, 201);
    assert_eq!(body["status"], "success");
    assert_eq!(body["code"], 201);
    assert_eq!(body["messages"], json!(["Book added !"]));
    assert_eq!(
        body["data"],
        json!({"id": 3, "title": "T", "author": "A", "read": false})
    );

    let (status, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(status, 200);
    let books = body["data"].as_array().unwrap();
    assert_eq!(books.len(), 4);
    assert_eq!(books[0]["title"], "Asus");
    assert_eq!(books[3]["title"], "T");
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_book() -> Result<()> {
    let app = TestApp::new()?;

    let replacement = json!({"title": "Lenovo", "author": "Ana", "read": true});
    let (status, body) = app.send(Method::PUT, "/books/1", Some(replacement)).await;
    assert_eq!(status, 200);
    assert_eq!(body["messages"], json!(["Book edited !"]));

    let (_, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(body["data"][1]["title"], "Lenovo");

    let (status, body) = app.send(Method::DELETE, "/books/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Lenovo");

    let (_, body) = app.send(Method::GET, "/books", None).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Asus", "HP"]);
    Ok(())
}

#[tokio::test]
async fn test_book_errors() -> Result<()> {
    let app = TestApp::new()?;

    // Id equal to the list length is out of range
    let book = json!({"title": "T", "author": "A", "read": false});
    let (status, body) = app.send(Method::PUT, "/books/3", Some(book)).await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Book not found");

    let (status, _) = app.send(Method::DELETE, "/books/-1", None).await;
    assert_eq!(status, 400);

    let (status, _) = app
        .send(Method::POST, "/books", Some(json!({"title": "T"})))
        .await;
    assert_eq!(status, 400);

    let (_, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_user_lifecycle() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.send(Method::GET, "/users/", None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], json!([]));

    let (status, body) = app
        .send(
            Method::POST,
            "/users/",
            Some(json!({"email": "a@example.com", "password": "pw"})),
        )
        .await;
    assert_eq!(status, 201);
    let user_id = body["data"]["id"].as_u64().unwrap();
    assert_eq!(body["data"]["email"], "a@example.com");
    assert!(body["data"].get("hashed_password").is_none());

    let (status, body) = app.send(Method::GET, &format!("/users/{}", user_id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["items"], json!([]));

    let (status, body) = app.send(Method::GET, "/users/999", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "User not found");
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_rejected() -> Result<()> {
    let app = TestApp::new()?;
    let user = json!({"email": "dup@example.com", "password": "pw"});

    let (status, _) = app.send(Method::POST, "/users", Some(user.clone())).await;
    assert_eq!(status, 201);

    let (status, body) = app.send(Method::POST, "/users", Some(user)).await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Email already registered");

    let (_, body) = app.send(Method::GET, "/users", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_users_paging_preserves_insertion_order() -> Result<()> {
    let app = TestApp::new()?;
    for i in 0..4 {
        let user = json!({"email": format!("u{}@example.com", i), "password": "pw"});
        app.send(Method::POST, "/users", Some(user)).await;
    }

    let (_, body) = app.send(Method::GET, "/users?skip=0&limit=100", None).await;
    let emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(
        emails,
        vec![
            "u0@example.com",
            "u1@example.com",
            "u2@example.com",
            "u3@example.com"
        ]
    );

    let (_, body) = app.send(Method::GET, "/users?skip=1&limit=2", None).await;
    assert_eq!(body["data"][0]["email"], "u1@example.com");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app.send(Method::GET, "/users?limit=lots", None).await;
    assert_eq!(status, 400);
    Ok(())
}

#[tokio::test]
async fn test_items_for_users() -> Result<()> {
    let app = TestApp::new()?;
    let (_, body) = app
        .send(
            Method::POST,
            "/users",
            Some(json!({"email": "owner@example.com", "password": "pw"})),
        )
        .await;
    let user_id = body["data"]["id"].as_u64().unwrap();

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/users/{}/items/", user_id),
            Some(json!({"title": "lamp", "description": "desk lamp"})),
        )
        .await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["owner_id"], user_id);
    assert_eq!(body["data"]["title"], "lamp");

    let (status, body) = app
        .send(
            Method::POST,
            "/users/999/items",
            Some(json!({"title": "orphan"})),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "User not found");

    let (_, body) = app.send(Method::GET, "/items/", None).await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["description"], "desk lamp");

    let (_, body) = app.send(Method::GET, &format!("/users/{}", user_id), None).await;
    assert_eq!(body["data"]["items"][0]["title"], "lamp");
    Ok(())
}

#[tokio::test]
async fn test_product_lifecycle() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app
        .send(
            Method::POST,
            "/products",
            Some(json!({"title": "Mouse", "description": "Wireless", "price": 19.5})),
        )
        .await;
    assert_eq!(status, 201);
    let id = body["data"]["id"].as_u64().unwrap();

    let (status, body) = app.send(Method::GET, &format!("/products/{}", id), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["price"], 19.5);

    let fields = json!({"title": "Trackball", "description": "Wired", "price": 42.0});
    let (status, body) = app
        .send(Method::PUT, &format!("/products/{}", id), Some(fields))
        .await;
    assert_eq!(status, 200);
    assert_eq!(
        body["data"],
        json!({"id": id, "title": "Trackball", "description": "Wired", "price": 42.0})
    );

    let (_, body) = app.send(Method::GET, &format!("/products/{}", id), None).await;
    assert_eq!(body["data"]["title"], "Trackball");

    let (_, body) = app.send(Method::GET, "/products?skip=0&limit=10", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_product() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.send(Method::GET, "/products/5", None).await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Product not found");

    let fields = json!({"title": "x", "description": "y", "price": 1.0});
    let (status, body) = app.send(Method::PUT, "/products/5", Some(fields)).await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Product not found");

    let (status, _) = app
        .send(
            Method::POST,
            "/products",
            Some(json!({"title": "x", "description": "y", "price": "cheap"})),
        )
        .await;
    assert_eq!(status, 400);
    Ok(())
}

#[tokio::test]
async fn test_book_store_reset_hook() -> Result<()> {
    let app = TestApp::new()?;
    app.send(Method::DELETE, "/books/0", None).await;
    app.send(Method::DELETE, "/books/1", None).await;

    app.router.state().books.reset()?;

    let (_, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"][0]["id"], 0);
    Ok(())
}

/// Request body that never yields a frame.
struct StalledBody;

impl Body for StalledBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Pending
    }
}

#[tokio::test]
async fn test_stalled_body_times_out() -> Result<()> {
    let app = TestApp::with_config(ServerConfig {
        request_timeout_ms: 10,
        ..Default::default()
    })?;

    let req = Request::builder()
        .method(Method::POST)
        .uri("/books")
        .header("Content-Type", "application/json")
        .body(StalledBody)?;
    let err = app
        .router
        .route(req)
        .await
        .expect_err("stalled body should time out");
    assert!(matches!(err, RouterError::Timeout));

    let response: hyper::Response<Bytes> = err.into();
    assert_eq!(response.status().as_u16(), 408);
    let body: Value = serde_json::from_slice(response.body())?;
    assert_eq!(body["detail"], "Request Timeout");

    let (_, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_ids_beyond_rowid_range_are_not_found() -> Result<()> {
    let app = TestApp::new()?;
    let id = i64::MAX as u64 + 1;

    let (status, body) = app.send(Method::GET, &format!("/users/{}", id), None).await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "User not found");

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/users/{}/items", id),
            Some(json!({"title": "lamp"})),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "User not found");

    let (status, body) = app.send(Method::GET, &format!("/products/{}", id), None).await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Product not found");

    let fields = json!({"title": "x", "description": "y", "price": 1.0});
    let (status, body) = app
        .send(Method::PUT, &format!("/products/{}", u64::MAX), Some(fields))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Product not found");

    // One past u64::MAX is not an id at all
    let (status, _) = app
        .send(Method::GET, "/products/18446744073709551616", None)
        .await;
    assert_eq!(status, 400);
    Ok(())
}
