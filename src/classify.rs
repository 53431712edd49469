//! Error classification.
//!
//! Observed operation failures are data, not errors of this crate. Each one
//! is reduced to a short, stable label that becomes a name part of the error
//! counter, e.g. `timeout`, `transport/unavailable`, `operation/overloaded`.
//!
//! Precedence, first match wins:
//!
//! 1. a configured [`ErrorNamer`] returning a non-empty name
//! 2. [`Failure::is_timeout`] → `timeout`
//! 3. [`Failure::transport_status`] → `transport<delim><status>`
//! 4. [`Failure::operation_status`] → `operation<delim><status>`
//! 5. the error message with spaces replaced by underscores

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

/// A failure reported by the database client.
///
/// The predicates default to "not applicable", so any error type can opt in
/// with an empty impl and still get the message-based label.
pub trait Failure: std::error::Error + Send + Sync {
    /// Deadline or timeout condition.
    fn is_timeout(&self) -> bool {
        false
    }

    /// Transport-layer status text, if the failure carries one.
    fn transport_status(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Server operation status text, if the failure carries one.
    fn operation_status(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl Failure for std::io::Error {
    fn is_timeout(&self) -> bool {
        self.kind() == std::io::ErrorKind::TimedOut
    }
}

/// Custom error naming hook. `None` or an empty name falls back to the
/// built-in classification.
pub type ErrorNamer = Arc<dyn Fn(&dyn Failure) -> Option<String> + Send + Sync>;

/// Maps failures to name parts.
#[derive(Clone)]
pub struct ErrorClassifier {
    delimiter: String,
    custom: Option<ErrorNamer>,
}

impl ErrorClassifier {
    pub fn new(delimiter: impl Into<String>, custom: Option<ErrorNamer>) -> Self {
        Self {
            delimiter: delimiter.into(),
            custom,
        }
    }

    /// Classify `err` into a name part.
    pub fn classify(&self, err: &dyn Failure) -> String {
        if let Some(custom) = &self.custom {
            match custom(err) {
                Some(name) if !name.trim().is_empty() => return name,
                Some(_) => warn!(error = %err, "custom error namer returned an empty name"),
                None => {}
            }
        }
        default_error_name(err, &self.delimiter)
    }
}

impl fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorClassifier")
            .field("delimiter", &self.delimiter)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Built-in classification, without any custom hook.
pub fn default_error_name(err: &dyn Failure, delimiter: &str) -> String {
    if err.is_timeout() {
        return "timeout".to_string();
    }
    if let Some(status) = err.transport_status() {
        return format!("transport{delimiter}{}", sanitize(&status));
    }
    if let Some(status) = err.operation_status() {
        return format!("operation{delimiter}{}", sanitize(&status));
    }
    sanitize(&err.to_string())
}

fn sanitize(text: &str) -> String {
    text.replace(' ', "_")
}

/// Transport-level status codes (gRPC semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportStatus {
    Canceled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl TransportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransportStatus::Canceled => "canceled",
            TransportStatus::Unknown => "unknown",
            TransportStatus::InvalidArgument => "invalid_argument",
            TransportStatus::DeadlineExceeded => "deadline_exceeded",
            TransportStatus::NotFound => "not_found",
            TransportStatus::AlreadyExists => "already_exists",
            TransportStatus::PermissionDenied => "permission_denied",
            TransportStatus::ResourceExhausted => "resource_exhausted",
            TransportStatus::FailedPrecondition => "failed_precondition",
            TransportStatus::Aborted => "aborted",
            TransportStatus::OutOfRange => "out_of_range",
            TransportStatus::Unimplemented => "unimplemented",
            TransportStatus::Internal => "internal",
            TransportStatus::Unavailable => "unavailable",
            TransportStatus::DataLoss => "data_loss",
            TransportStatus::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server operation status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationStatus {
    BadRequest,
    Unauthorized,
    InternalError,
    Aborted,
    Unavailable,
    Overloaded,
    SchemeError,
    GenericError,
    Timeout,
    BadSession,
    PreconditionFailed,
    AlreadyExists,
    NotFound,
    SessionExpired,
    Cancelled,
    Undetermined,
    Unsupported,
    SessionBusy,
}

impl OperationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationStatus::BadRequest => "bad_request",
            OperationStatus::Unauthorized => "unauthorized",
            OperationStatus::InternalError => "internal_error",
            OperationStatus::Aborted => "aborted",
            OperationStatus::Unavailable => "unavailable",
            OperationStatus::Overloaded => "overloaded",
            OperationStatus::SchemeError => "scheme_error",
            OperationStatus::GenericError => "generic_error",
            OperationStatus::Timeout => "timeout",
            OperationStatus::BadSession => "bad_session",
            OperationStatus::PreconditionFailed => "precondition_failed",
            OperationStatus::AlreadyExists => "already_exists",
            OperationStatus::NotFound => "not_found",
            OperationStatus::SessionExpired => "session_expired",
            OperationStatus::Cancelled => "cancelled",
            OperationStatus::Undetermined => "undetermined",
            OperationStatus::Unsupported => "unsupported",
            OperationStatus::SessionBusy => "session_busy",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database client failures, as reported in event records.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DriverError {
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("transport error ({status}): {message}")]
    Transport {
        status: TransportStatus,
        message: String,
    },

    #[error("operation error ({status}): {issues}")]
    Operation {
        status: OperationStatus,
        issues: String,
    },

    #[error("session pool overflow")]
    SessionPoolOverflow,

    #[error("{0}")]
    Other(String),
}

impl DriverError {
    pub fn transport(status: TransportStatus, message: impl Into<String>) -> Self {
        DriverError::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn operation(status: OperationStatus, issues: impl Into<String>) -> Self {
        DriverError::Operation {
            status,
            issues: issues.into(),
        }
    }
}

impl Failure for DriverError {
    fn is_timeout(&self) -> bool {
        matches!(
            self,
            DriverError::DeadlineExceeded
                | DriverError::Transport {
                    status: TransportStatus::DeadlineExceeded,
                    ..
                }
                | DriverError::Operation {
                    status: OperationStatus::Timeout,
                    ..
                }
        )
    }

    fn transport_status(&self) -> Option<Cow<'_, str>> {
        match self {
            DriverError::Transport { status, .. } => Some(Cow::Borrowed(status.as_str())),
            _ => None,
        }
    }

    fn operation_status(&self) -> Option<Cow<'_, str>> {
        match self {
            DriverError::Operation { status, .. } => Some(Cow::Borrowed(status.as_str())),
            _ => None,
        }
    }
}
