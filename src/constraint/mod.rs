//! Configuration-driven required-field constraints.
//!
//! A flat list of `TypeName.fieldName` entries declares which fields must be
//! present and non-empty per record type. The validator plugs into the record
//! server's validation chain and classifies pass/fail; mapping the outcome to
//! wire-level signaling (status codes, headers) stays the server's job.

pub mod registry;
pub mod validator;

pub use registry::{ConstraintRegistry, ConstraintRule};
pub use validator::ConstraintValidator;

use serde_json::Value;

/// Marker the host surfaces when a validated write produced no issues.
pub const NO_ISSUES_MARKER: &str = "No issues detected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Information,
}

/// Outcome of one validation call. Ephemeral; produced per create/update.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub failing_field: Option<String>,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            failing_field: None,
            message: None,
        }
    }

    pub fn fail(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            failing_field: Some(field.into()),
            message: Some(message.into()),
        }
    }

    /// A failing outcome must reject the whole operation; a passing one is
    /// informational only.
    pub fn severity(&self) -> ValidationSeverity {
        if self.passed {
            ValidationSeverity::Information
        } else {
            ValidationSeverity::Error
        }
    }

    /// Message the host places in response metadata: the first error, or the
    /// no-issues marker.
    pub fn header_message(&self) -> &str {
        self.message.as_deref().unwrap_or(NO_ISSUES_MARKER)
    }
}

/// Validation hook consumed by the record server for every create/update.
pub trait ResourceValidator: Send + Sync {
    fn validate_resource(&self, resource_type: &str, resource: &Value) -> ValidationOutcome;
}
