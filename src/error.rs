use thiserror::Error;

use crate::model::ValidationErrorEntry;

/// Errors returned by the recipe backend
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend rejected the payload with a structured list of problems
    #[error("Validation failed: {}", join_entries(.0))]
    Validation(Vec<ValidationErrorEntry>),

    /// Any other non-success response
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// A success response whose body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Errors raised while setting up or using the client
#[derive(Error, Debug)]
pub enum ClientError {
    /// A backend call failed
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// The configured backend address is not an http(s) URL
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

fn join_entries(entries: &[ValidationErrorEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
