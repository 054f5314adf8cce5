//! Route definitions for the `/enroll` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::enroll;
use crate::state::AppState;

/// Enrollment routes.
///
/// ```text
/// POST   /enroll           -> enroll
/// GET    /enroll/options   -> options
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enroll", post(enroll::enroll))
        .route("/enroll/options", get(enroll::options))
}
