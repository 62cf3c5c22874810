use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::helper::error_chain_fmt;

/// Chunked media content, as produced by a multipart upload or a stored file.
pub type MediaByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// An opened media object ready to be streamed to a client.
pub struct MediaObject {
    pub stream: MediaByteStream,
    pub size_bytes: u64,
}

/// Durable storage for uploaded media blobs, addressed by allocated name.
///
/// Blobs are immutable once written: a successful `put` means the full byte
/// count is on durable storage, and a failed `put` leaves nothing addressable.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Streams the content to durable storage under `name` and returns the
    /// persisted byte count. Working memory stays bounded regardless of the
    /// content size.
    async fn put(&self, name: &str, stream: MediaByteStream) -> Result<u64, MediaStoreError>;

    /// `NotFound` for unknown names; never an empty or truncated stream.
    async fn get(&self, name: &str) -> Result<MediaObject, MediaStoreError>;

    /// Removes a single blob. Backs the ingestion rollback path.
    async fn delete(&self, name: &str) -> Result<(), MediaStoreError>;

    /// Bulk administrative wipe; returns the number of deleted blobs.
    async fn delete_all(&self) -> Result<u64, MediaStoreError>;
}

#[derive(thiserror::Error)]
pub enum MediaStoreError {
    #[error("media object not found: `{0}`")]
    NotFound(String),
    #[error("media storage failure")]
    Storage(#[from] std::io::Error),
}

impl std::fmt::Debug for MediaStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
