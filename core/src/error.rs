//! Error types for the student-records API client.
//!
//! # Design
//! The envelope is the protocol's only failure channel, so there is no
//! status-code variant: a response that decodes to `success: false` becomes
//! `Application`, and a body that does not decode at all becomes
//! `Deserialization`. `Application` displays the bare message; it is shown
//! to the user verbatim.

/// Errors returned by `StudentClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The envelope arrived with `success: false`. Carries the server's
    /// `error` text, or the operation's fallback message when omitted.
    #[error("{0}")]
    Application(String),

    /// The response body was not a valid envelope.
    #[error("malformed response: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request: {0}")]
    Serialization(String),
}
