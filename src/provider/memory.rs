use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{OrderBridgeError, Result};
use crate::model;
use crate::provider::{CreateOutcome, RecordProvider};

/// In-memory record provider, keyed by relative reference.
///
/// Useful for embedding and for exercising the hook pipeline without a live
/// record server.
#[derive(Debug)]
pub struct MemoryRecordProvider {
    records: Arc<RwLock<HashMap<String, Value>>>,
    created: Arc<RwLock<Vec<Value>>>,
}

impl MemoryRecordProvider {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            created: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Insert a resource under its `ResourceType/id` reference.
    pub async fn insert(&self, resource: Value) {
        let Some(resource_type) = model::resource_type(&resource) else {
            return;
        };
        let Some(id) = resource.get("id").and_then(Value::as_str) else {
            return;
        };
        let reference = format!("{resource_type}/{id}");
        self.records.write().await.insert(reference, resource);
    }

    pub async fn remove(&self, reference: &str) -> Option<Value> {
        self.records.write().await.remove(reference)
    }

    /// Resources persisted through [`RecordProvider::create`], in call order.
    pub async fn created(&self) -> Vec<Value> {
        self.created.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordProvider for MemoryRecordProvider {
    async fn read(&self, reference: &str) -> Result<Value> {
        let records = self.records.read().await;
        records
            .get(reference)
            .cloned()
            .ok_or_else(|| OrderBridgeError::store(format!("resource not found: {reference}")))
    }

    async fn find_organization(&self, system: &str, code: &str) -> Result<Option<Value>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|resource| {
                model::resource_type(resource) == Some("Organization")
                    && model::has_identifier(resource, system, code)
            })
            .cloned())
    }

    async fn create(&self, resource: Value) -> Result<CreateOutcome> {
        let mut created = self.created.write().await;
        let id = format!("mem-{}", created.len() + 1);
        created.push(resource);
        Ok(CreateOutcome { id })
    }
}

impl Default for MemoryRecordProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryRecordProvider {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            created: Arc::clone(&self.created),
        }
    }
}
