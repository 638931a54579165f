//! Stateless HTTP request builder and response parser for the student API.
//!
//! # Design
//! `StudentClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Parse methods ignore the HTTP status line entirely: the backend wraps
//! every outcome, validation failures and 404s included, in the same
//! envelope, and that envelope decides success. When a failure envelope
//! omits its `error` text, each operation substitutes its own fallback
//! message.

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Envelope, Student, StudentDraft, StudentId};

/// Synchronous, stateless client for the student-records API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct StudentClient {
    base_url: String,
}

impl StudentClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_students(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/students", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_student(&self, id: StudentId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/students/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_student(&self, draft: &StudentDraft) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/students", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_student(
        &self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/students/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_student(&self, id: StudentId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/students/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_students(&self, response: HttpResponse) -> Result<Vec<Student>, ApiError> {
        let envelope: Envelope<Vec<Student>> = decode(&response)?;
        require_data(envelope.into_result("Failed to load")?)
    }

    pub fn parse_get_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        let envelope: Envelope<Student> = decode(&response)?;
        require_data(envelope.into_result("Failed to load")?)
    }

    pub fn parse_create_student(&self, response: HttpResponse) -> Result<Student, ApiError> {
        let envelope: Envelope<Student> = decode(&response)?;
        require_data(envelope.into_result("Creation failed")?)
    }

    /// The backend may omit `data` on update; the updated record is returned
    /// when present, but callers refresh the whole list either way.
    pub fn parse_update_student(
        &self,
        response: HttpResponse,
    ) -> Result<Option<Student>, ApiError> {
        let envelope: Envelope<Student> = decode(&response)?;
        envelope.into_result("Update failed")
    }

    pub fn parse_delete_student(&self, response: HttpResponse) -> Result<(), ApiError> {
        let envelope: Envelope<IgnoredAny> = decode(&response)?;
        envelope.into_result("Deletion failed")?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<Envelope<T>, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// A success envelope whose operation promises `data` must carry it.
fn require_data<T>(data: Option<T>) -> Result<T, ApiError> {
    data.ok_or_else(|| ApiError::Deserialization("envelope missing data".to_string()))
}
