//! Centralized error types for the cloudops workspace.

use std::fmt;
use thiserror::Error;

/// Top-level error enum. Collaborator faults pass through untouched in
/// [`CloudOpsError::Client`]; the other variants are raised locally.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CloudOpsError {
    #[error(transparent)]
    Client(#[from] ClientFault),

    #[error("Model '{model}' is not available. Available models are: {}", .available.join(", "))]
    InvalidModel {
        model: String,
        available: Vec<String>,
    },

    #[error("Unexpected response to {operation}: got {received}")]
    UnexpectedResponse {
        operation: &'static str,
        received: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CloudOpsError {
    /// The collaborator fault behind this error, if any.
    pub fn as_client_fault(&self) -> Option<&ClientFault> {
        match self {
            Self::Client(fault) => Some(fault),
            _ => None,
        }
    }
}

pub type CloudOpsResult<T> = Result<T, CloudOpsError>;

/// An error surfaced by the remote API for a rejected or failed request.
///
/// `code` is the service's own error code, kept verbatim so callers can match
/// on exactly what the service said (`InvalidBucketName`, `ConflictException`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed ({code}): {message}")]
pub struct ClientFault {
    pub operation: String,
    pub code: String,
    pub message: String,
}

impl ClientFault {
    pub fn new(
        operation: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FaultKind {
        FaultKind::from_code(&self.code)
    }
}

/// Coarse classification of native service error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    AlreadyExists,
    Validation,
    NotFound,
    AccessDenied,
    Throttling,
    Other,
}

impl FaultKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "ConflictException" | "BucketAlreadyExists" | "BucketAlreadyOwnedByYou" => {
                Self::AlreadyExists
            }
            "ValidationException" | "InvalidBucketName" | "InvalidArgument" => Self::Validation,
            "ResourceNotFoundException" | "NoSuchBucket" | "NoSuchKey" | "NotFound" => {
                Self::NotFound
            }
            "AccessDeniedException" | "AccessDenied" | "Forbidden" => Self::AccessDenied,
            "ThrottlingException" | "SlowDown" | "TooManyRequestsException" => Self::Throttling,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AlreadyExists => "already-exists",
            Self::Validation => "validation",
            Self::NotFound => "not-found",
            Self::AccessDenied => "access-denied",
            Self::Throttling => "throttling",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}
