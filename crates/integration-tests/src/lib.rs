//! Integration tests for the coffee shop widgets.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p coffee-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_widget` - Cart manager scenarios against file-backed storage
//! - `orders_widget` - Orders manager and checkout scenarios
//! - `storefront_routes` - In-process HTTP requests against the full router
//!
//! Every [`TestContext`] owns a fresh temporary data directory, so tests
//! never share persisted state and need no running server.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use coffee_shop_storefront::config::StorefrontConfig;
use coffee_shop_storefront::listing::Listing;
use coffee_shop_storefront::state::AppState;
use coffee_shop_storefront::storage::{FileStorage, Storage};
use coffee_shop_storefront::widgets::NotificationCenter;
use tempfile::TempDir;
use tower::ServiceExt;

/// Listing used by the route tests.
pub const TEST_LISTING: &str = r#"
products:
  - name: House Blend Beans
    price: "$14.00"
    image: /static/images/house-blend.jpg
menu:
  - class: hot-drinks
    title: Hot Drinks
    items:
      - name: Latte
        price: "$4.50"
      - name: Mocha
        price: "$5.00"
"#;

/// An isolated storefront backed by a temporary data directory.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Build a storefront over an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or listing cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = Self::mount(dir.path());
        Self { dir, state }
    }

    /// Mount a fresh [`AppState`] over `data_dir`, as a page reload would.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be opened.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn mount(data_dir: &Path) -> AppState {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(data_dir).unwrap());
        AppState::from_parts(
            StorefrontConfig::with_data_dir(data_dir),
            Listing::from_yaml_str(TEST_LISTING).unwrap(),
            storage,
            NotificationCenter::new(),
        )
    }

    /// Open a second handle on the same data directory.
    ///
    /// # Panics
    ///
    /// Panics if the data directory cannot be opened.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::new(FileStorage::open(self.dir.path()).unwrap())
    }

    /// Full application router over this context's state.
    #[must_use]
    pub fn router(&self) -> Router {
        coffee_shop_storefront::app(self.state.clone(), self.dir.path())
    }

    /// Send a GET request and return the status and body text.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::get(uri).body(Body::empty());
        self.send(request).await
    }

    /// Send a form-encoded POST request and return the status and body text.
    pub async fn post_form(&self, uri: &str, form: &str) -> (StatusCode, String) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()));
        self.send(request).await
    }

    /// Send a bodiless POST request and return the status and body text.
    pub async fn post(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::post(uri).body(Body::empty());
        self.send(request).await
    }

    /// Send a request and return the raw response.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or routed.
    #[allow(clippy::unwrap_used)]
    pub async fn send_raw(
        &self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> Response<Body> {
        self.router().oneshot(request.unwrap()).await.unwrap()
    }

    #[allow(clippy::unwrap_used)]
    async fn send(
        &self,
        request: Result<Request<Body>, axum::http::Error>,
    ) -> (StatusCode, String) {
        let response = self.send_raw(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
