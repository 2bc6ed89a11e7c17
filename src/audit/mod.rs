//! Durable audit trail for failed propagations.
//!
//! A propagation failure is invisible to the caller whose create succeeded;
//! it becomes discoverable through an audit record written after the request
//! finishes, once the created resource is safely citable.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

/// Identifier system naming the component that wrote an audit record.
pub const AUDIT_CREATOR_SYSTEM: &str = "Creator";

/// Identifier value naming this component in audit records.
pub const AUDIT_CREATOR: &str = "OrderPropagationHook";

/// Opaque reference to a just-created record, e.g. `"List/V.2024.0007"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle(pub String);

impl ResourceHandle {
    /// Handle for a created resource, from its type and server-assigned id.
    pub fn for_resource(resource: &Value) -> Self {
        let resource_type = crate::model::resource_type(resource).unwrap_or("Resource");
        match resource.get("id").and_then(Value::as_str) {
            Some(id) => Self(format!("{resource_type}/{id}")),
            None => Self(resource_type.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Failure state carried from the creation hook to the completion hook.
/// At most one exists per request; its presence is the sole trigger for
/// audit record creation.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureContext {
    pub resource: ResourceHandle,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
}

impl AuditAction {
    pub fn code(&self) -> &'static str {
        match self {
            AuditAction::Create => "C",
        }
    }
}

/// One audit entry for one failed propagation. Persisted through the record
/// server's create API; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    pub recorded_at: DateTime<Utc>,
    pub outcome_description: String,
    pub action: AuditAction,
    pub object_reference: ResourceHandle,
    pub creator: String,
    pub source_address: Option<String>,
    pub target_address: String,
}

impl AuditRecord {
    pub fn from_failure(
        failure: FailureContext,
        source_address: Option<String>,
        target_address: String,
    ) -> Self {
        Self {
            recorded_at: Utc::now(),
            outcome_description: failure.message,
            action: AuditAction::Create,
            object_reference: failure.resource,
            creator: AUDIT_CREATOR.to_string(),
            source_address,
            target_address,
        }
    }

    /// Render as the audit-event resource the record server persists.
    pub fn to_resource(&self) -> Value {
        json!({
            "resourceType": "AuditEvent",
            "event": {
                "dateTime": self.recorded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                "outcomeDesc": self.outcome_description,
                "action": self.action.code(),
            },
            "object": [{
                "reference": { "reference": self.object_reference.as_str() },
                "identifier": {
                    "system": AUDIT_CREATOR_SYSTEM,
                    "value": self.creator,
                },
            }],
            "source": { "site": self.source_address },
            "participant": [{
                "network": { "address": self.target_address },
            }],
        })
    }
}
