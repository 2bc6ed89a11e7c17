use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::audit::{AuditRecord, ResourceHandle};
use crate::core::Settings;
use crate::error::Result;
use crate::hooks::{LifecycleHook, RequestContext};
use crate::model;
use crate::order::composer::modality_from;
use crate::order::{OrderComposer, OrderEncoder, PropagationClient, PropagationResult};
use crate::provider::RecordProvider;

/// Two-phase hook: on creation of a qualifying list record, compose and send
/// a diagnostic order to the order station; on request completion, turn a
/// recorded failure into a persisted audit record.
///
/// The creation phase is total. Any compose, resolution or transport error
/// becomes failure state on the request context instead of propagating,
/// since an escaping error here would roll back the already-decided create.
pub struct OrderPropagationHook {
    provider: Arc<dyn RecordProvider>,
    encoder: Arc<dyn OrderEncoder>,
    composer: OrderComposer,
    client: PropagationClient,
}

impl OrderPropagationHook {
    pub fn new(
        provider: Arc<dyn RecordProvider>,
        encoder: Arc<dyn OrderEncoder>,
        settings: &Settings,
    ) -> Self {
        Self {
            provider,
            encoder,
            composer: OrderComposer::new(),
            client: PropagationClient::new(settings.order_create_api_path.clone()),
        }
    }

    pub fn client(&self) -> &PropagationClient {
        &self.client
    }

    async fn propagate(&self, ctx: &RequestContext, resource: &Value) -> Result<PropagationResult> {
        let endpoint = self.client.endpoint(self.provider.as_ref()).await?;

        let order = self
            .composer
            .compose(resource, &ctx.base_url, self.provider.as_ref())
            .await?;

        // compose() above already required the encounter reference.
        let encounter_ref = model::reference_str(resource, "encounter").unwrap_or_default();
        let encounter = self.provider.read(encounter_ref).await?;
        let modality = modality_from(&encounter)?;

        let payload = self.encoder.encode(&order)?;
        self.client.send(&endpoint, &payload, &modality).await
    }
}

#[async_trait]
impl LifecycleHook for OrderPropagationHook {
    async fn resource_created(&self, ctx: &mut RequestContext, resource: &Value) {
        if model::resource_type(resource) != Some("List") {
            return;
        }
        if !OrderComposer::should_propagate(resource) {
            tracing::debug!(request = %ctx.id, "list record outside the propagation guard, skipping");
            return;
        }

        let handle = ResourceHandle::for_resource(resource);

        match self.propagate(ctx, resource).await {
            Ok(result) if result.is_success() => {
                tracing::debug!(request = %ctx.id, resource = handle.as_str(), "order propagated");
            }
            Ok(result) => {
                let message = result.failure_message();
                tracing::warn!(request = %ctx.id, %message, "order station rejected the order");
                ctx.record_failure(handle, message);
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(request = %ctx.id, %message, "order propagation failed");
                ctx.record_failure(handle, message);
            }
        }
    }

    async fn request_completed(&self, ctx: &mut RequestContext) {
        let Some(failure) = ctx.take_failure() else {
            return;
        };

        let target = self
            .client
            .cached_endpoint()
            .map(Url::as_str)
            .map(str::to_string)
            .unwrap_or_default();
        let record = AuditRecord::from_failure(failure, ctx.remote_addr.clone(), target);

        match self.provider.create(record.to_resource()).await {
            Ok(outcome) => {
                tracing::info!(request = %ctx.id, audit_id = %outcome.id, "audit record persisted");
            }
            Err(err) => {
                // No further fallback: the failure stays visible in logs only.
                tracing::error!(request = %ctx.id, %err, "audit record write failed");
            }
        }
    }
}
