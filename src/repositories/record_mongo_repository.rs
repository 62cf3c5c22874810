use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::FindOptions,
    Collection, Database,
};

use crate::ports::record_store::{RecordStore, RecordStoreError};

/// MongoDB-backed record store. One logical collection per record kind;
/// identifiers are ObjectId hex strings.
pub struct RecordMongoRepository {
    db: Database,
}

impl RecordMongoRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

fn backend(error: mongodb::error::Error) -> RecordStoreError {
    RecordStoreError::Backend(error.into())
}

#[async_trait]
impl RecordStore for RecordMongoRepository {
    #[tracing::instrument(name = "Pinging MongoDB", skip(self))]
    async fn ping(&self) -> Result<(), RecordStoreError> {
        self.db
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(backend)?;
        Ok(())
    }

    #[tracing::instrument(name = "Inserting document", skip(self, document))]
    async fn create(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, RecordStoreError> {
        let result = self
            .collection(collection)
            .insert_one(document, None)
            .await
            .map_err(backend)?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| {
                RecordStoreError::Backend(anyhow::anyhow!(
                    "MongoDB returned a non-ObjectId inserted id"
                ))
            })
    }

    #[tracing::instrument(name = "Listing documents", skip(self))]
    async fn find(
        &self,
        collection: &str,
        owner_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Document>, RecordStoreError> {
        let filter = match owner_id {
            Some(owner_id) => doc! { "user_id": owner_id },
            None => Document::new(),
        };
        let options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .collection(collection)
            .find(filter, options)
            .await
            .map_err(backend)?;

        cursor.try_collect().await.map_err(backend)
    }

    #[tracing::instrument(name = "Fetching document by id", skip(self))]
    async fn find_one(&self, collection: &str, id: &str) -> Result<Document, RecordStoreError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| RecordStoreError::InvalidIdentifier(id.to_owned()))?;

        self.collection(collection)
            .find_one(doc! { "_id": object_id }, None)
            .await
            .map_err(backend)?
            .ok_or_else(|| RecordStoreError::NotFound(id.to_owned()))
    }

    #[tracing::instrument(name = "Counting documents", skip(self))]
    async fn count(&self, collection: &str) -> Result<u64, RecordStoreError> {
        self.collection(collection)
            .count_documents(None, None)
            .await
            .map_err(backend)
    }

    #[tracing::instrument(name = "Clearing collection", skip(self))]
    async fn clear(&self, collection: &str) -> Result<u64, RecordStoreError> {
        let result = self
            .collection(collection)
            .delete_many(Document::new(), None)
            .await
            .map_err(backend)?;
        Ok(result.deleted_count)
    }
}
