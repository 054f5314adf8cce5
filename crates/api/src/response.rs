//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Used by lookup endpoints. `POST /api/enroll` keeps its own
/// `{ message, userData }` shape because existing form clients read it.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
