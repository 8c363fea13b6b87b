//! Notification board route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;
use crate::widgets::Toast;

/// Notification board fragment template (polled by HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/notifications.html")]
pub struct NotificationsTemplate {
    pub toasts: Vec<Toast>,
}

/// Current notification board (HTMX).
pub async fn board(State(state): State<AppState>) -> impl IntoResponse {
    NotificationsTemplate {
        toasts: state.notifications().snapshot(),
    }
}
