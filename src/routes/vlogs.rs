use std::io::SeekFrom;

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{
    web::{self, Data},
    HttpResponse,
};
use serde_json::json;
use tokio::io::AsyncSeekExt;
use tokio_util::io::ReaderStream;

use super::ApiError;
use crate::domain::entities::vlog::NewVlog;
use crate::ports::media_store::{MediaByteStream, MediaStoreError};
use crate::services::ingestion::{IngestionError, IngestionService, VlogUpload};

#[derive(Debug, serde::Deserialize)]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

#[tracing::instrument(name = "Create vlog from reference", skip(service, body))]
pub async fn create_vlog(
    service: Data<IngestionService>,
    body: web::Json<NewVlog>,
) -> Result<HttpResponse, ApiError> {
    let id = service.ingest_vlog_reference(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Vlog created successfully",
        "id": id,
    })))
}

#[derive(Debug, MultipartForm)]
pub struct UploadVlogForm {
    pub user_id: Text<String>,
    pub video: TempFile,
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
}

#[tracing::instrument(name = "Upload vlog with video file", skip(service, form))]
pub async fn upload_vlog(
    service: Data<IngestionService>,
    MultipartForm(form): MultipartForm<UploadVlogForm>,
) -> Result<HttpResponse, ApiError> {
    let declared_filename = form.video.file_name.clone().unwrap_or_default();
    let content = spooled_upload_stream(form.video)
        .await
        .map_err(MediaStoreError::Storage)
        .map_err(IngestionError::Media)?;

    let uploaded = service
        .ingest_vlog_upload(VlogUpload {
            user_id: form.user_id.into_inner(),
            declared_filename,
            title: form.title.map(Text::into_inner),
            description: form.description.map(Text::into_inner),
            content,
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Vlog uploaded successfully",
        "id": uploaded.id,
        "video_url": uploaded.video_url,
        "download_url": uploaded.download_url,
        "file_size": uploaded.file_size,
    })))
}

#[tracing::instrument(name = "List vlogs", skip(service))]
pub async fn list_vlogs(
    service: Data<IngestionService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let vlogs = service
        .list_vlogs(query.user_id.as_deref(), query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(vlogs))
}

#[tracing::instrument(name = "Get vlog by id", skip(service))]
pub async fn get_vlog(
    service: Data<IngestionService>,
    vlog_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let vlog = service.get_vlog(&vlog_id).await?;
    Ok(HttpResponse::Ok().json(vlog))
}

/// The multipart extractor spools the upload to a temp file; rewind it and
/// hand it to the service as the content stream.
async fn spooled_upload_stream(file: TempFile) -> std::io::Result<MediaByteStream> {
    let mut file = tokio::fs::File::from_std(file.file.into_file());
    file.seek(SeekFrom::Start(0)).await?;
    Ok(Box::pin(ReaderStream::new(file)))
}
