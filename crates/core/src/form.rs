//! Sign-up form state machine.
//!
//! Holds the field values, the last set of field errors, and where the form
//! is in its submission lifecycle. Transitions are driven by [`FormEvent`]s
//! through [`EnrollmentForm::apply`]; the only effect a transition can ask
//! for is transmitting a locally valid record to the server.
//!
//! ```text
//! Editing --Submit(valid)--> Submitting --Accepted--> Accepted --Dismiss--> Editing (cleared)
//!    ^                          |
//!    |                          +--Rejected--> Rejected --Dismiss/Changed--> Editing
//!    +--Submit(invalid)--+
//! ```

use chrono::NaiveDate;

use crate::record::{EnrollmentRecord, Field};
use crate::rules::{self, ErrorMap};

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Collecting input. Field errors from the last local check may be shown.
    #[default]
    Editing,
    /// Waiting for the server; further edits and submits are ignored.
    Submitting,
    /// The server accepted the enrollment; `message` is shown in the modal.
    Accepted { message: String },
    /// The server (or the transport) refused the submission.
    Rejected { message: String },
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Changed { field: Field, value: String },
    Submit { today: NaiveDate },
    Accepted { message: String },
    Rejected { message: String },
    Dismiss,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    None,
    /// Send this record to the enrollment endpoint and feed the outcome back
    /// as [`FormEvent::Accepted`] or [`FormEvent::Rejected`].
    Transmit(EnrollmentRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollmentForm {
    record: EnrollmentRecord,
    errors: ErrorMap,
    status: SubmissionStatus,
}

impl EnrollmentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &EnrollmentRecord {
        &self.record
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Error message to display next to `field`, if any.
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    /// Apply one event and return the effect the caller has to carry out.
    pub fn apply(&mut self, event: FormEvent) -> FormEffect {
        match (std::mem::take(&mut self.status), event) {
            (
                SubmissionStatus::Editing | SubmissionStatus::Rejected { .. },
                FormEvent::Changed { field, value },
            ) => {
                self.record.set(field, value);
                self.status = SubmissionStatus::Editing;
                FormEffect::None
            }

            (
                SubmissionStatus::Editing | SubmissionStatus::Rejected { .. },
                FormEvent::Submit { today },
            ) => {
                self.errors = rules::validate(&self.record, today);
                if self.errors.is_valid() {
                    self.status = SubmissionStatus::Submitting;
                    FormEffect::Transmit(self.record.clone())
                } else {
                    self.status = SubmissionStatus::Editing;
                    FormEffect::None
                }
            }

            (SubmissionStatus::Submitting, FormEvent::Accepted { message }) => {
                self.status = SubmissionStatus::Accepted { message };
                FormEffect::None
            }

            (SubmissionStatus::Submitting, FormEvent::Rejected { message }) => {
                self.status = SubmissionStatus::Rejected { message };
                FormEffect::None
            }

            (SubmissionStatus::Accepted { .. }, FormEvent::Dismiss) => {
                *self = Self::default();
                FormEffect::None
            }

            (SubmissionStatus::Rejected { .. }, FormEvent::Dismiss) => {
                self.status = SubmissionStatus::Editing;
                FormEffect::None
            }

            (status, _) => {
                self.status = status;
                FormEffect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn change(form: &mut EnrollmentForm, field: Field, value: &str) -> FormEffect {
        form.apply(FormEvent::Changed {
            field,
            value: value.to_string(),
        })
    }

    fn filled_form() -> EnrollmentForm {
        let mut form = EnrollmentForm::new();
        change(&mut form, Field::Name, "Jane Doe");
        change(&mut form, Field::DateOfBirth, "1990-05-01");
        change(&mut form, Field::Mobile, "9876543210");
        change(&mut form, Field::Batch, "6-7AM");
        change(&mut form, Field::Gender, "female");
        form
    }

    #[test]
    fn new_form_is_empty_and_editing() {
        let form = EnrollmentForm::new();
        assert_eq!(form.status(), &SubmissionStatus::Editing);
        assert_eq!(form.record(), &EnrollmentRecord::default());
        assert!(form.errors().is_valid());
    }

    #[test]
    fn invalid_submit_stores_errors_and_stays_editing() {
        let mut form = EnrollmentForm::new();
        change(&mut form, Field::Name, "Jane123");

        let effect = form.apply(FormEvent::Submit { today: today() });

        assert_eq!(effect, FormEffect::None);
        assert_eq!(form.status(), &SubmissionStatus::Editing);
        assert_eq!(form.errors().len(), 5);
        assert_eq!(form.error_for(Field::Name), Some(rules::NAME_MESSAGE));
    }

    #[test]
    fn valid_submit_transmits_record() {
        let mut form = filled_form();

        let effect = form.apply(FormEvent::Submit { today: today() });

        assert_matches!(effect, FormEffect::Transmit(record) => {
            assert_eq!(record.name, "Jane Doe");
            assert_eq!(record.batch, "6-7AM");
        });
        assert_eq!(form.status(), &SubmissionStatus::Submitting);
        assert!(form.errors().is_valid());
    }

    #[test]
    fn fixing_fields_clears_errors_on_next_submit() {
        let mut form = filled_form();
        change(&mut form, Field::Mobile, "123");
        form.apply(FormEvent::Submit { today: today() });
        assert!(form.error_for(Field::Mobile).is_some());

        change(&mut form, Field::Mobile, "9876543210");
        let effect = form.apply(FormEvent::Submit { today: today() });

        assert_matches!(effect, FormEffect::Transmit(_));
        assert!(form.error_for(Field::Mobile).is_none());
    }

    #[test]
    fn submitting_ignores_edits_and_resubmits() {
        let mut form = filled_form();
        form.apply(FormEvent::Submit { today: today() });

        assert_eq!(change(&mut form, Field::Name, "Someone Else"), FormEffect::None);
        assert_eq!(form.apply(FormEvent::Submit { today: today() }), FormEffect::None);

        assert_eq!(form.record().name, "Jane Doe");
        assert_eq!(form.status(), &SubmissionStatus::Submitting);
    }

    #[test]
    fn accepted_then_dismiss_resets_form() {
        let mut form = filled_form();
        form.apply(FormEvent::Submit { today: today() });
        form.apply(FormEvent::Accepted {
            message: "Successfully Enrolled!".into(),
        });

        assert_matches!(form.status(), SubmissionStatus::Accepted { message } => {
            assert_eq!(message, "Successfully Enrolled!");
        });

        form.apply(FormEvent::Dismiss);
        assert_eq!(form, EnrollmentForm::new());
    }

    #[test]
    fn rejected_keeps_fields_and_allows_retry() {
        let mut form = filled_form();
        form.apply(FormEvent::Submit { today: today() });
        form.apply(FormEvent::Rejected {
            message: "Invalid form data. Please check your entries.".into(),
        });

        assert_matches!(form.status(), SubmissionStatus::Rejected { .. });
        assert_eq!(form.record().name, "Jane Doe");

        let effect = form.apply(FormEvent::Submit { today: today() });
        assert_matches!(effect, FormEffect::Transmit(_));
    }

    #[test]
    fn editing_after_rejection_returns_to_editing() {
        let mut form = filled_form();
        form.apply(FormEvent::Submit { today: today() });
        form.apply(FormEvent::Rejected {
            message: "nope".into(),
        });

        change(&mut form, Field::Gender, "other");

        assert_eq!(form.status(), &SubmissionStatus::Editing);
        assert_eq!(form.record().gender, "other");
    }

    #[test]
    fn server_outcomes_outside_submitting_are_ignored() {
        let mut form = filled_form();
        form.apply(FormEvent::Accepted {
            message: "stray".into(),
        });
        assert_eq!(form.status(), &SubmissionStatus::Editing);

        form.apply(FormEvent::Dismiss);
        assert_eq!(form.record().name, "Jane Doe");
    }
}
