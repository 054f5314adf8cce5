use crate::rules::ErrorMap;

/// Message returned to callers whenever a submission fails validation.
pub const INVALID_FORM_MESSAGE: &str = "Invalid form data. Please check your entries.";

/// The single domain error: one or more fields failed their rule.
///
/// Displays as the generic [`INVALID_FORM_MESSAGE`]; the per-field detail is
/// kept in `errors` for callers that want to surface it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid form data. Please check your entries.")]
pub struct ValidationError {
    pub errors: ErrorMap,
}
