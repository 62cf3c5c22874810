use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::{fs, io::AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::warn;

use crate::ports::media_store::{MediaByteStream, MediaObject, MediaStore, MediaStoreError};

/// Media store over a single flat directory on local disk.
///
/// Write-write conflicts cannot happen: storage names come from the
/// allocator and are unique by construction.
pub struct MediaFsRepository {
    root_dir: PathBuf,
}

impl MediaFsRepository {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Creates the storage directory. Called once at startup; failure here
    /// is a boot failure, not a per-request error.
    pub async fn init(&self) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.root_dir).await
    }

    /// Resolves a client-visible name to a path inside the root directory.
    /// Names with separators or parent components never resolve.
    fn object_path(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.root_dir.join(name))
    }

    /// A failed write must not leave a partial blob addressable.
    async fn discard_partial(&self, path: &Path, error: std::io::Error) -> MediaStoreError {
        if let Err(cleanup_error) = fs::remove_file(path).await {
            warn!(
                path = %path.display(),
                error = %cleanup_error,
                "Failed to remove partial media file"
            );
        }
        MediaStoreError::Storage(error)
    }
}

#[async_trait]
impl MediaStore for MediaFsRepository {
    #[tracing::instrument(name = "Persisting media file", skip(self, stream))]
    async fn put(&self, name: &str, mut stream: MediaByteStream) -> Result<u64, MediaStoreError> {
        fs::create_dir_all(&self.root_dir).await?;
        let path = self.root_dir.join(name);

        let mut file = fs::File::create(&path).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            // A chunk error is how client disconnects and transport
            // failures surface mid-upload.
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => return Err(self.discard_partial(&path, error).await),
            };

            if let Err(error) = file.write_all(&chunk).await {
                return Err(self.discard_partial(&path, error).await);
            }
            written += chunk.len() as u64;
        }

        // A successful return promises the full byte count is durable.
        if let Err(error) = file.sync_all().await {
            return Err(self.discard_partial(&path, error).await);
        }

        Ok(written)
    }

    #[tracing::instrument(name = "Opening media file", skip(self))]
    async fn get(&self, name: &str) -> Result<MediaObject, MediaStoreError> {
        let path = self
            .object_path(name)
            .ok_or_else(|| MediaStoreError::NotFound(name.to_owned()))?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(MediaStoreError::NotFound(name.to_owned()))
            }
            Err(error) => return Err(error.into()),
        };

        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(MediaStoreError::NotFound(name.to_owned()));
        }

        Ok(MediaObject {
            size_bytes: metadata.len(),
            stream: Box::pin(ReaderStream::new(file)),
        })
    }

    #[tracing::instrument(name = "Deleting media file", skip(self))]
    async fn delete(&self, name: &str) -> Result<(), MediaStoreError> {
        let path = self
            .object_path(name)
            .ok_or_else(|| MediaStoreError::NotFound(name.to_owned()))?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(MediaStoreError::NotFound(name.to_owned()))
            }
            Err(error) => Err(error.into()),
        }
    }

    #[tracing::instrument(name = "Clearing media directory", skip(self))]
    async fn delete_all(&self) -> Result<u64, MediaStoreError> {
        let mut entries = match fs::read_dir(&self.root_dir).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(error) => return Err(error.into()),
        };

        let mut deleted = 0;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                deleted += 1;
            }
        }

        Ok(deleted)
    }
}
