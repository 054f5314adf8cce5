//! HTTP client for the enrollment API.
//!
//! A UI layer keeps an [`EnrollmentForm`] and calls [`submit_form`] when the
//! user presses submit: the form checks the record locally, and only a
//! locally valid record is sent to the server, whose verdict is fed back
//! into the form.

use chrono::NaiveDate;
use enroll_core::form::{EnrollmentForm, FormEffect, FormEvent};
use enroll_core::record::EnrollmentRecord;
use enroll_core::rules::ErrorMap;
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0} from enrollment API")]
    UnexpectedStatus(StatusCode),
}

/// Body of a 200 response to `POST /api/enroll`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnrollmentConfirmation {
    pub message: String,
    #[serde(rename = "userData")]
    pub user_data: EnrollmentRecord,
}

/// Outcome of one submission the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Accepted(EnrollmentConfirmation),
    /// `fields` is only present when the server exposes field detail.
    Rejected {
        message: String,
        fields: Option<ErrorMap>,
    },
}

/// Choices for the enumerated form fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnrollmentOptions {
    pub batches: Vec<String>,
    pub genders: Vec<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    fields: Option<ErrorMap>,
}

#[derive(Deserialize)]
struct DataBody<T> {
    data: T,
}

#[derive(Debug, Clone)]
pub struct EnrollClient {
    http: reqwest::Client,
    base_url: String,
}

impl EnrollClient {
    /// Client with a default `reqwest::Client`. `base_url` is the server root,
    /// e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        reqwest::Url::parse(base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST the record to `/api/enroll`.
    pub async fn submit(&self, record: &EnrollmentRecord) -> Result<Submission, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/enroll", self.base_url))
            .json(record)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(Submission::Accepted(response.json().await?)),
            StatusCode::BAD_REQUEST => {
                let body: ErrorBody = response.json().await?;
                Ok(Submission::Rejected {
                    message: body.error,
                    fields: body.fields,
                })
            }
            other => Err(ClientError::UnexpectedStatus(other)),
        }
    }

    /// GET `/api/enroll/options`.
    pub async fn options(&self) -> Result<EnrollmentOptions, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/enroll/options", self.base_url))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(response.status()));
        }

        let body: DataBody<EnrollmentOptions> = response.json().await?;
        Ok(body.data)
    }
}

/// Run one submit round for `form`.
///
/// Returns `Ok(None)` when local validation failed and nothing was sent (the
/// field errors are on the form). A transport failure still moves the form
/// to `Rejected` before the error is returned, so it never stays in
/// `Submitting`.
pub async fn submit_form(
    client: &EnrollClient,
    form: &mut EnrollmentForm,
    today: NaiveDate,
) -> Result<Option<Submission>, ClientError> {
    let record = match form.apply(FormEvent::Submit { today }) {
        FormEffect::Transmit(record) => record,
        FormEffect::None => {
            tracing::debug!(fields = form.errors().len(), "Form failed local validation");
            return Ok(None);
        }
    };

    match client.submit(&record).await {
        Ok(submission) => {
            let event = match &submission {
                Submission::Accepted(confirmation) => FormEvent::Accepted {
                    message: confirmation.message.clone(),
                },
                Submission::Rejected { message, .. } => FormEvent::Rejected {
                    message: message.clone(),
                },
            };
            form.apply(event);
            Ok(Some(submission))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Enrollment request failed");
            form.apply(FormEvent::Rejected {
                message: err.to_string(),
            });
            Err(err)
        }
    }
}
