use async_trait::async_trait;
use mongodb::bson::Document;

use crate::helper::error_chain_fmt;

/// Create/read/list operations against a document collection.
///
/// Handed to the ingestion service as an explicit dependency so tests can
/// substitute an in-memory implementation. Identifiers are opaque strings in
/// the store's native syntax, assigned at `create` time and never reused.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Round-trips to the store engine. Used by the health probe.
    async fn ping(&self) -> Result<(), RecordStoreError>;

    /// Atomically inserts a document and returns its server-assigned id.
    async fn create(&self, collection: &str, document: Document)
        -> Result<String, RecordStoreError>;

    /// Returns documents in the collection's natural order, up to `limit`.
    /// With an owner filter, only documents whose `user_id` matches exactly.
    async fn find(
        &self,
        collection: &str,
        owner_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Document>, RecordStoreError>;

    /// `InvalidIdentifier` when the id is not in the store's id syntax,
    /// `NotFound` when it is well-formed but absent.
    async fn find_one(&self, collection: &str, id: &str) -> Result<Document, RecordStoreError>;

    async fn count(&self, collection: &str) -> Result<u64, RecordStoreError>;

    /// Bulk administrative wipe; returns the number of deleted documents.
    async fn clear(&self, collection: &str) -> Result<u64, RecordStoreError>;
}

#[derive(thiserror::Error)]
pub enum RecordStoreError {
    #[error("`{0}` is not a valid record identifier")]
    InvalidIdentifier(String),
    #[error("no record found for id `{0}`")]
    NotFound(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl std::fmt::Debug for RecordStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
