//! Handlers for the `/enroll` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use enroll_core::error::ValidationError;
use enroll_core::record::{Batch, EnrollmentRecord, Gender};
use enroll_core::rules;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Message sent back with every accepted enrollment.
pub const ENROLLED_MESSAGE: &str = "Successfully Enrolled!";

/// Response body for an accepted enrollment.
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub message: String,
    #[serde(rename = "userData")]
    pub user_data: EnrollmentRecord,
}

/// Choices a form offers for the enumerated fields.
#[derive(Debug, Serialize)]
pub struct EnrollmentOptions {
    pub batches: Vec<&'static str>,
    pub genders: Vec<&'static str>,
}

/// POST /api/enroll
///
/// Re-validates the submitted record and echoes it back on success. Any
/// failure, including an unreadable body, is a 400 with the generic message.
pub async fn enroll(
    State(state): State<AppState>,
    payload: Result<Json<EnrollmentRecord>, JsonRejection>,
) -> AppResult<Json<EnrollResponse>> {
    let Json(record) = payload.map_err(|rejection| AppError::MalformedBody(rejection.body_text()))?;

    let errors = rules::validate(&record, Utc::now().date_naive());
    if !errors.is_valid() {
        let fields: Vec<&str> = errors.fields().map(|f| f.as_str()).collect();
        tracing::info!(?fields, "Enrollment rejected");

        let err = ValidationError { errors };
        return Err(if state.config.expose_field_errors {
            AppError::DetailedValidation(err)
        } else {
            AppError::Validation(err)
        });
    }

    tracing::info!(batch = %record.batch, "Enrollment accepted");

    Ok(Json(EnrollResponse {
        message: ENROLLED_MESSAGE.to_string(),
        user_data: record,
    }))
}

/// GET /api/enroll/options
pub async fn options() -> Json<DataResponse<EnrollmentOptions>> {
    Json(DataResponse {
        data: EnrollmentOptions {
            batches: Batch::ALL.iter().map(|b| b.label()).collect(),
            genders: Gender::ALL.iter().map(|g| g.label()).collect(),
        },
    })
}
