use std::borrow::Cow;
use std::sync::Arc;

use ydb_metrics::{
    DriverError, Error, ErrorClassifier, Failure, OperationStatus, Result, TransportStatus,
    default_error_name,
};

#[test]
fn test_error_display() {
    let err = Error::UnknownKind("latency_seconds".to_string());
    assert!(err.to_string().contains("latency_seconds"));

    let err = Error::InvalidDelimiter(" ".to_string());
    assert!(err.to_string().contains("delimiter"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(Error::UnknownKind("x".into()))
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// Failure classification
// ============================================================================

#[test]
fn timeout_variants() {
    for err in [
        DriverError::DeadlineExceeded,
        DriverError::transport(TransportStatus::DeadlineExceeded, "deadline"),
        DriverError::operation(OperationStatus::Timeout, "timed out"),
    ] {
        assert_eq!(default_error_name(&err, "/"), "timeout", "{err}");
    }
}

#[test]
fn transport_and_operation_statuses() {
    let err = DriverError::transport(TransportStatus::ResourceExhausted, "quota");
    assert_eq!(default_error_name(&err, "_"), "transport_resource_exhausted");

    let err = DriverError::operation(OperationStatus::SessionBusy, "busy");
    assert_eq!(default_error_name(&err, "/"), "operation/session_busy");
}

#[test]
fn message_fallback_replaces_spaces() {
    let err = DriverError::Other("no endpoints available".to_string());
    assert_eq!(default_error_name(&err, "/"), "no_endpoints_available");
}

#[test]
fn io_errors_classify() {
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
    assert_eq!(default_error_name(&err, "/"), "timeout");

    let err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
    assert_eq!(default_error_name(&err, "/"), "connection_reset");
}

/// A failure matching every predicate at once.
#[derive(Debug, thiserror::Error)]
#[error("compound failure")]
struct Compound {
    timeout: bool,
    transport: bool,
}

impl Failure for Compound {
    fn is_timeout(&self) -> bool {
        self.timeout
    }

    fn transport_status(&self) -> Option<Cow<'_, str>> {
        self.transport.then_some(Cow::Borrowed("unavailable"))
    }

    fn operation_status(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("overloaded"))
    }
}

#[test]
fn precedence_is_timeout_transport_operation() {
    let all = Compound {
        timeout: true,
        transport: true,
    };
    assert_eq!(default_error_name(&all, "/"), "timeout");

    let no_timeout = Compound {
        timeout: false,
        transport: true,
    };
    assert_eq!(default_error_name(&no_timeout, "/"), "transport/unavailable");

    let operation_only = Compound {
        timeout: false,
        transport: false,
    };
    assert_eq!(default_error_name(&operation_only, "/"), "operation/overloaded");
}

#[test]
fn classifier_custom_namer() {
    let classifier = ErrorClassifier::new(
        "/",
        Some(Arc::new(|err: &dyn Failure| {
            err.transport_status().map(|s| format!("net_{s}"))
        })),
    );

    let err = DriverError::transport(TransportStatus::Unavailable, "refused");
    assert_eq!(classifier.classify(&err), "net_unavailable");

    // `None` falls through to the built-in classification.
    let err = DriverError::operation(OperationStatus::Overloaded, "busy");
    assert_eq!(classifier.classify(&err), "operation/overloaded");
}

#[test]
fn classifier_ignores_blank_custom_name() {
    let classifier = ErrorClassifier::new(
        "/",
        Some(Arc::new(|_: &dyn Failure| Some("  ".to_string()))),
    );
    assert_eq!(classifier.classify(&DriverError::DeadlineExceeded), "timeout");
}
