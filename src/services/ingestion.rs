use std::sync::Arc;

use anyhow::Context;
use mongodb::bson::{self, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::domain::entities::{
    gps::{GpsRecord, NewGps},
    media_name::{MediaName, MediaNameError},
    sentiment::{NewSentiment, SentimentRecord},
    validation::{require_non_blank, ValidationError},
    vlog::{NewVlog, VlogRecord},
};
use crate::helper::error_chain_fmt;
use crate::ports::{
    media_store::{MediaByteStream, MediaObject, MediaStore, MediaStoreError},
    record_store::{RecordStore, RecordStoreError},
};

/// Result-count limit applied when a list call does not ask for one.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Public path uploaded videos are served under.
const MEDIA_PUBLIC_PATH: &str = "/uploads/videos";
/// Path of the attachment-download endpoint.
const MEDIA_DOWNLOAD_PATH: &str = "/api/vlogs/download";

/// Orchestrates validation, blob persistence and document writes for the
/// three record kinds. Both stores are injected; nothing is reached through
/// process-wide state.
pub struct IngestionService {
    records: Arc<dyn RecordStore>,
    media: Arc<dyn MediaStore>,
}

/// A record read back from the store, paired with its server-assigned id.
#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord<T> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub record: T,
}

/// A multipart vlog upload, as handed over by the transport layer.
pub struct VlogUpload {
    pub user_id: String,
    pub declared_filename: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: MediaByteStream,
}

/// What the upload endpoint reports back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedVlog {
    pub id: String,
    pub video_url: String,
    pub download_url: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionCounts {
    pub vlogs: u64,
    pub sentiments: u64,
    pub gps_coordinates: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct ClearSummary {
    pub records_deleted: u64,
    pub media_deleted: u64,
}

#[derive(thiserror::Error)]
pub enum IngestionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnsupportedMediaType(#[from] MediaNameError),
    #[error(transparent)]
    Media(#[from] MediaStoreError),
    #[error(transparent)]
    Records(#[from] RecordStoreError),
}

impl std::fmt::Debug for IngestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IngestionService {
    pub fn new(records: Arc<dyn RecordStore>, media: Arc<dyn MediaStore>) -> Self {
        Self { records, media }
    }

    /// Validate → create, for a vlog that references an already-hosted video.
    #[tracing::instrument(name = "Ingesting vlog reference", skip(self, payload))]
    pub async fn ingest_vlog_reference(&self, payload: NewVlog) -> Result<String, IngestionError> {
        let record = payload.validate()?;
        self.create_record(VlogRecord::COLLECTION, &record).await
    }

    /// Validate → persist blob → assemble → create, with rollback of the
    /// just-written blob if the document write fails.
    #[tracing::instrument(
        name = "Ingesting vlog upload",
        skip(self, upload),
        fields(declared_filename = %upload.declared_filename)
    )]
    pub async fn ingest_vlog_upload(
        &self,
        upload: VlogUpload,
    ) -> Result<UploadedVlog, IngestionError> {
        // Owner validation happens before any disk I/O
        let user_id = require_non_blank("user_id", upload.user_id)?;
        let media_name = MediaName::allocate(&upload.declared_filename)?;

        let file_size = self.media.put(media_name.as_str(), upload.content).await?;

        let video_url = format!("{}/{}", MEDIA_PUBLIC_PATH, media_name);
        let download_url = format!("{}/{}", MEDIA_DOWNLOAD_PATH, media_name);

        let record = VlogRecord::builder()
            .user_id(user_id)
            .video_url(video_url.clone())
            .download_url(Some(download_url.clone()))
            .original_filename(Some(upload.declared_filename))
            .file_size(Some(file_size))
            .title(upload.title)
            .description(upload.description)
            .build();

        let id = match self.create_record(VlogRecord::COLLECTION, &record).await {
            Ok(id) => id,
            Err(error) => {
                // The blob was already written: discard it so the failed
                // ingestion leaves nothing behind.
                if let Err(cleanup_error) = self.media.delete(media_name.as_str()).await {
                    warn!(
                        media_name = %media_name,
                        error = ?cleanup_error,
                        "Failed to discard blob after document write failure"
                    );
                }
                return Err(error);
            }
        };

        Ok(UploadedVlog {
            id,
            video_url,
            download_url,
            file_size,
        })
    }

    #[tracing::instrument(name = "Ingesting sentiment", skip(self, payload))]
    pub async fn ingest_sentiment(&self, payload: NewSentiment) -> Result<String, IngestionError> {
        let record = payload.validate()?;
        self.create_record(SentimentRecord::COLLECTION, &record)
            .await
    }

    #[tracing::instrument(name = "Ingesting GPS coordinate", skip(self, payload))]
    pub async fn ingest_gps(&self, payload: NewGps) -> Result<String, IngestionError> {
        let record = payload.validate()?;
        self.create_record(GpsRecord::COLLECTION, &record).await
    }

    pub async fn list_vlogs(
        &self,
        owner_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<StoredRecord<VlogRecord>>, IngestionError> {
        self.list(VlogRecord::COLLECTION, owner_id, limit).await
    }

    pub async fn get_vlog(&self, id: &str) -> Result<StoredRecord<VlogRecord>, IngestionError> {
        self.get(VlogRecord::COLLECTION, id).await
    }

    pub async fn list_sentiments(
        &self,
        owner_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<StoredRecord<SentimentRecord>>, IngestionError> {
        self.list(SentimentRecord::COLLECTION, owner_id, limit).await
    }

    pub async fn get_sentiment(
        &self,
        id: &str,
    ) -> Result<StoredRecord<SentimentRecord>, IngestionError> {
        self.get(SentimentRecord::COLLECTION, id).await
    }

    pub async fn list_gps(
        &self,
        owner_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<StoredRecord<GpsRecord>>, IngestionError> {
        self.list(GpsRecord::COLLECTION, owner_id, limit).await
    }

    pub async fn get_gps(&self, id: &str) -> Result<StoredRecord<GpsRecord>, IngestionError> {
        self.get(GpsRecord::COLLECTION, id).await
    }

    /// Opens a stored blob for the download/serve endpoints.
    #[tracing::instrument(name = "Opening stored media", skip(self))]
    pub async fn open_media(&self, name: &str) -> Result<MediaObject, IngestionError> {
        Ok(self.media.get(name).await?)
    }

    pub async fn ping_records(&self) -> Result<(), IngestionError> {
        Ok(self.records.ping().await?)
    }

    pub async fn collection_counts(&self) -> Result<CollectionCounts, IngestionError> {
        Ok(CollectionCounts {
            vlogs: self.records.count(VlogRecord::COLLECTION).await?,
            sentiments: self.records.count(SentimentRecord::COLLECTION).await?,
            gps_coordinates: self.records.count(GpsRecord::COLLECTION).await?,
        })
    }

    /// Administrative bulk wipe used by the seeding tool. Not reachable
    /// through the HTTP surface.
    #[tracing::instrument(name = "Clearing all records and media", skip(self))]
    pub async fn clear_all(&self) -> Result<ClearSummary, IngestionError> {
        let mut records_deleted = 0;
        for collection in [
            VlogRecord::COLLECTION,
            SentimentRecord::COLLECTION,
            GpsRecord::COLLECTION,
        ] {
            records_deleted += self.records.clear(collection).await?;
        }
        let media_deleted = self.media.delete_all().await?;

        Ok(ClearSummary {
            records_deleted,
            media_deleted,
        })
    }

    async fn create_record<T: Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<String, IngestionError> {
        let document = bson::to_document(record)
            .context("Failed to serialize record into a document")
            .map_err(RecordStoreError::Backend)?;
        Ok(self.records.create(collection, document).await?)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        owner_id: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<StoredRecord<T>>, IngestionError> {
        let limit = match limit {
            Some(limit) if limit > 0 => limit,
            _ => DEFAULT_LIST_LIMIT,
        };
        let documents = self.records.find(collection, owner_id, limit).await?;
        documents.into_iter().map(decode_stored).collect()
    }

    async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<StoredRecord<T>, IngestionError> {
        let document = self.records.find_one(collection, id).await?;
        decode_stored(document)
    }
}

fn decode_stored<T: DeserializeOwned>(
    mut document: Document,
) -> Result<StoredRecord<T>, IngestionError> {
    let id = match document.remove("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        other => {
            return Err(IngestionError::Records(RecordStoreError::Backend(
                anyhow::anyhow!("stored document has an unusable _id: {:?}", other),
            )))
        }
    };

    let record = bson::from_document(document)
        .context("Failed to decode a stored document")
        .map_err(RecordStoreError::Backend)?;

    Ok(StoredRecord { id, record })
}
