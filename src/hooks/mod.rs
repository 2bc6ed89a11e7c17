//! Lifecycle hooks consumed by the record server.
//!
//! The server creates one [`RequestContext`] per request and threads it
//! through both hook calls: `resource_created` fires synchronously after a
//! create succeeds, `request_completed` fires once after the whole request
//! (including nested writes) finished normally. Failure state recorded in
//! the first phase rides the context to the second.

pub mod order_propagation;

pub use order_propagation::OrderPropagationHook;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::audit::{FailureContext, ResourceHandle};

/// Per-request state threaded through the hook phases. Never shared across
/// requests; discarded when the request ends.
#[derive(Debug)]
pub struct RequestContext {
    pub id: Uuid,
    /// The server base the requesting client used; composed references are
    /// made absolute against it.
    pub base_url: Url,
    pub remote_addr: Option<String>,
    failure: Option<FailureContext>,
}

impl RequestContext {
    pub fn new(base_url: Url) -> Self {
        Self {
            id: Uuid::new_v4(),
            base_url,
            remote_addr: None,
            failure: None,
        }
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    /// Record the request's propagation failure. A later failure in the same
    /// request replaces the earlier one.
    pub fn record_failure(&mut self, resource: ResourceHandle, message: impl Into<String>) {
        self.failure = Some(FailureContext {
            resource,
            message: message.into(),
        });
    }

    pub fn failure(&self) -> Option<&FailureContext> {
        self.failure.as_ref()
    }

    pub fn take_failure(&mut self) -> Option<FailureContext> {
        self.failure.take()
    }
}

/// Hook contract invoked by the record server.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    /// Invoked after a create succeeded, before the response is finalized.
    /// Must never fail the request: the creation is already decided.
    async fn resource_created(&self, ctx: &mut RequestContext, resource: &Value);

    /// Invoked once per request after all processing finished normally.
    async fn request_completed(&self, ctx: &mut RequestContext);
}
