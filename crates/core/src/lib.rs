//! Enrollment domain: the record submitted by the sign-up form, the field
//! rule set shared by the form and the server, and the form state machine.
//!
//! Everything here is pure logic with no I/O so both the HTTP server and any
//! client-side UI can depend on it.

pub mod error;
pub mod form;
pub mod record;
pub mod rules;
