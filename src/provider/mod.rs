//! Client seam over the record server's read/search/create API.

pub mod memory;

pub use memory::MemoryRecordProvider;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Outcome of a create call against the record server.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOutcome {
    /// Server-assigned id of the created resource.
    pub id: String,
}

/// The record server's client API as consumed by this crate.
///
/// `read` takes a relative reference (`"Patient/HOSP1.A123456"`);
/// `find_organization` searches by an exact identifier system/code pair and
/// returns the first match.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    async fn read(&self, reference: &str) -> Result<Value>;

    async fn find_organization(&self, system: &str, code: &str) -> Result<Option<Value>>;

    async fn create(&self, resource: Value) -> Result<CreateOutcome>;
}
