use crate::domain::ports::TransportError;
use serde::Serialize;
use thiserror::Error;

/// A single field-level problem found while validating input or a remote
/// response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Carrier-reported error code and message, extracted best-effort from an
/// error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierFault {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// Closed failure taxonomy shared by every layer of the gateway.
///
/// Already-classified errors always pass through call boundaries untouched;
/// only transport-level failures get reclassified, via [`AppError::from_transport`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        issues: Vec<FieldIssue>,
    },

    #[error("Authentication failed: {message}")]
    Auth {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    #[error("Rate limited: {message}")]
    RateLimit {
        message: String,
        status: u16,
        body: Option<String>,
    },

    #[error("HTTP request failed: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
        issues: Vec<FieldIssue>,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Carrier error: {message}")]
    Carrier {
        message: String,
        status: u16,
        carrier_error: Option<CarrierFault>,
        body: String,
    },
}

impl AppError {
    /// HTTP status attached to the failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Auth { status, .. } => *status,
            AppError::RateLimit { status, .. } | AppError::Carrier { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps a transport-level failure onto the taxonomy. Timeout and network
    /// failures keep their identity; anything else is a generic HTTP failure.
    pub fn from_transport(context: &str, err: TransportError) -> Self {
        match err {
            TransportError::Timeout => AppError::Timeout {
                message: format!("{context} timed out"),
            },
            TransportError::Network(detail) => AppError::Network {
                message: format!("{context} network error: {detail}"),
            },
            TransportError::Other(source) => AppError::Http {
                message: format!("{context} failed"),
                source: Some(source),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
