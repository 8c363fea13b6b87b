//! Coffee Shop Storefront library.
//!
//! This crate hosts the shop page and its two widgets as a library, allowing
//! the widgets and routes to be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`widgets`] - Cart and orders managers, view projections, notifications
//! - [`storage`] - Key/value persistence for widget state
//! - [`listing`] - Static product and menu listing
//! - [`routes`] - HTMX route handlers
//! - [`state`] - Shared application state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod listing;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod widgets;

use std::path::Path;

use axum::{Router, extract::Request};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the full application router.
///
/// Static assets are served from `static_dir` under `/static`.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
