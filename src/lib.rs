//! # FHIR OrderBridge
//!
//! Validation and propagation hooks for a FHIR record-management server:
//! configuration-driven required-field constraints on every create/update,
//! and a two-phase pipeline that derives a diagnostic order from each
//! qualifying list record, sends it to an external order station, and turns
//! propagation failures into a durable audit trail.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fhir_orderbridge::*;
//! use url::Url;
//!
//! # struct XmlEncoder;
//! # impl OrderEncoder for XmlEncoder {
//! #     fn encode(&self, order: &ComposedOrder) -> Result<String> {
//! #         Ok(serde_json::to_string(order)?)
//! #     }
//! # }
//! # async fn example() -> Result<()> {
//! // Required-field constraints, one `TypeName.fieldName` entry per line.
//! let validator = ConstraintValidator::from_properties("List.subject=\nList.encounter=\n");
//!
//! // The propagation hook, wired to the record server's client API.
//! let provider = Arc::new(MemoryRecordProvider::new());
//! let hook = OrderPropagationHook::new(provider, Arc::new(XmlEncoder), &Settings::default());
//!
//! // The server threads one context through both hook phases per request.
//! let mut ctx = RequestContext::new(Url::parse("http://records.example/fhir")?);
//! let list = serde_json::json!({"resourceType": "List", "id": "V.1"});
//! hook.resource_created(&mut ctx, &list).await;
//! hook.request_completed(&mut ctx).await;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod constraint;
pub mod core;
pub mod error;
pub mod hooks;
pub mod model;
pub mod order;
pub mod provider;

pub use audit::{AuditAction, AuditRecord, FailureContext, ResourceHandle};
pub use constraint::{
    ConstraintRegistry, ConstraintRule, ConstraintValidator, NO_ISSUES_MARKER, ResourceValidator,
    ValidationOutcome, ValidationSeverity,
};
pub use self::core::Settings;
pub use error::{OrderBridgeError, Result};
pub use hooks::{LifecycleHook, OrderPropagationHook, RequestContext};
pub use model::FieldAccess;
pub use order::{
    AbsoluteReference, ComposedOrder, OrderComposer, OrderEncoder, OrderPriority,
    PropagationClient, PropagationResult, PropagationStatus,
};
pub use provider::{CreateOutcome, MemoryRecordProvider, RecordProvider};
