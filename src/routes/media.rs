use actix_web::{
    http::header,
    web::{self, Data},
    HttpResponse,
};

use super::ApiError;
use crate::domain::entities::media_name::content_type_for;
use crate::services::ingestion::IngestionService;

/// Inline playback, mounted under the public media path.
#[tracing::instrument(name = "Serve video", skip(service))]
pub async fn serve_video(
    service: Data<IngestionService>,
    filename: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let filename = filename.into_inner();
    let media = service.open_media(&filename).await?;

    let mut response = HttpResponse::Ok();
    response.content_type(content_type_for(&filename));
    response.no_chunking(media.size_bytes);
    Ok(response.streaming(media.stream))
}

/// Attachment download for a stored vlog video.
#[tracing::instrument(name = "Download video", skip(service))]
pub async fn download_video(
    service: Data<IngestionService>,
    filename: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let filename = filename.into_inner();
    let media = service.open_media(&filename).await?;

    let mut response = HttpResponse::Ok();
    response.content_type(content_type_for(&filename));
    response.insert_header((
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{}\"", filename),
    ));
    response.no_chunking(media.size_bytes);
    Ok(response.streaming(media.stream))
}
