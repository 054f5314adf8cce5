//! End-to-end tests: the client and form state machine against a live
//! in-process server bound to an ephemeral port.

use assert_matches::assert_matches;
use chrono::{NaiveDate, Utc};
use enroll_api::config::ServerConfig;
use enroll_api::router::build_app_router;
use enroll_api::state::AppState;
use enroll_client::{submit_form, ClientError, EnrollClient, Submission};
use enroll_core::form::{EnrollmentForm, FormEvent, SubmissionStatus};
use enroll_core::record::{EnrollmentRecord, Field};

/// Start the real router on `127.0.0.1:0` and return its base URL.
async fn spawn_server(config: ServerConfig) -> String {
    let app = build_app_router(AppState::new(config)).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn jane() -> EnrollmentRecord {
    EnrollmentRecord {
        name: "Jane Doe".into(),
        date_of_birth: "1990-05-01".into(),
        mobile: "9876543210".into(),
        batch: "6-7AM".into(),
        gender: "female".into(),
    }
}

fn fill(form: &mut EnrollmentForm, record: &EnrollmentRecord) {
    for field in Field::ALL {
        form.apply(FormEvent::Changed {
            field,
            value: record.get(field).to_string(),
        });
    }
}

#[tokio::test]
async fn submit_valid_record_is_accepted() {
    let client = EnrollClient::new(&spawn_server(ServerConfig::default()).await).unwrap();

    let submission = client.submit(&jane()).await.unwrap();

    assert_matches!(submission, Submission::Accepted(confirmation) => {
        assert_eq!(confirmation.message, "Successfully Enrolled!");
        assert_eq!(confirmation.user_data, jane());
    });
}

#[tokio::test]
async fn server_rejects_record_that_skipped_local_checks() {
    let client = EnrollClient::new(&spawn_server(ServerConfig::default()).await).unwrap();
    let record = EnrollmentRecord {
        name: "Jane123".into(),
        ..jane()
    };

    let submission = client.submit(&record).await.unwrap();

    assert_eq!(
        submission,
        Submission::Rejected {
            message: "Invalid form data. Please check your entries.".into(),
            fields: None,
        }
    );
}

#[tokio::test]
async fn rejected_submission_carries_fields_when_exposed() {
    let config = ServerConfig {
        expose_field_errors: true,
        ..ServerConfig::default()
    };
    let client = EnrollClient::new(&spawn_server(config).await).unwrap();
    let record = EnrollmentRecord {
        mobile: "98765".into(),
        ..jane()
    };

    let submission = client.submit(&record).await.unwrap();

    assert_matches!(submission, Submission::Rejected { fields: Some(fields), .. } => {
        assert_eq!(fields.fields().collect::<Vec<_>>(), vec![Field::Mobile]);
    });
}

#[tokio::test]
async fn options_are_fetched() {
    let client = EnrollClient::new(&spawn_server(ServerConfig::default()).await).unwrap();

    let options = client.options().await.unwrap();

    assert_eq!(options.batches, vec!["6-7AM", "7-8AM", "8-9AM", "5-6PM"]);
    assert_eq!(options.genders, vec!["male", "female", "other"]);
}

#[tokio::test]
async fn submit_form_round_trip_accepts_and_resets() {
    let client = EnrollClient::new(&spawn_server(ServerConfig::default()).await).unwrap();
    let mut form = EnrollmentForm::new();
    fill(&mut form, &jane());

    let outcome = submit_form(&client, &mut form, today()).await.unwrap();

    assert_matches!(outcome, Some(Submission::Accepted(_)));
    assert_matches!(form.status(), SubmissionStatus::Accepted { message } => {
        assert_eq!(message, "Successfully Enrolled!");
    });

    form.apply(FormEvent::Dismiss);
    assert_eq!(form, EnrollmentForm::new());
}

#[tokio::test]
async fn submit_form_with_local_errors_sends_nothing() {
    // No server at all: a request would fail, so Ok(None) proves nothing was sent.
    let client = EnrollClient::new("http://127.0.0.1:9").unwrap();
    let mut form = EnrollmentForm::new();
    fill(
        &mut form,
        &EnrollmentRecord {
            name: "Jane Doe".into(),
            date_of_birth: "2015-05-01".into(),
            mobile: "98765".into(),
            batch: String::new(),
            gender: String::new(),
        },
    );

    let outcome = submit_form(&client, &mut form, today()).await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(form.status(), &SubmissionStatus::Editing);
    assert_eq!(
        form.errors().fields().collect::<Vec<_>>(),
        vec![Field::DateOfBirth, Field::Mobile, Field::Batch, Field::Gender]
    );
}

#[tokio::test]
async fn transport_failure_moves_form_to_rejected() {
    // Bind then drop a listener to get a port nobody is serving.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = EnrollClient::new(&format!("http://{addr}")).unwrap();
    let mut form = EnrollmentForm::new();
    fill(&mut form, &jane());

    let result = submit_form(&client, &mut form, today()).await;

    assert_matches!(result, Err(ClientError::Http(_)));
    assert_matches!(form.status(), SubmissionStatus::Rejected { .. });
    assert_eq!(form.record(), &jane());
}
