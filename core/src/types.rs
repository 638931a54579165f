//! Domain DTOs and the response envelope for the student-records API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates.
//!
//! `StudentDraft` carries all four fields as raw strings. The input surface
//! hands over text values verbatim (`amount_due` defaults to the string `"0"`
//! when blank), and the backend coerces them server-side. Only `Student`,
//! the server's own representation, uses typed fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Server-assigned student identifier. Immutable after creation.
pub type StudentId = u32;

/// A student record returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub amount_due: f64,
}

impl Student {
    /// "First Last", as shown on cards and in creation notices.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request payload for creating or updating a student.
///
/// Fields are raw form text: the client trims the two name fields before
/// building a draft, but `dob` and `amount_due` are passed through as typed
/// by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub amount_due: String,
}

/// Uniform wrapper around every API response body.
///
/// Invariant: when `success` is false, `error` is the sole source of
/// user-facing failure text; when `success` is true, `data` holds the
/// operation's result (omitted for delete, optional for update). Unknown
/// extra fields (`count`, `message`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the envelope, converting `success: false` into an
    /// `ApiError::Application` carrying `error` or `fallback` when the
    /// server omitted it.
    pub fn into_result(self, fallback: &str) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Application(
                self.error.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}
