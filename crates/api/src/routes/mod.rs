pub mod enroll;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /enroll            submit enrollment (POST)
/// /enroll/options    batch and gender choices (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(enroll::router())
}
