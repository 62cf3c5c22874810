use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::helper::error_chain_fmt;
use crate::ports::{media_store::MediaStoreError, record_store::RecordStoreError};
use crate::services::ingestion::IngestionError;

/// Maps the service error taxonomy onto client-facing responses.
#[derive(thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] IngestionError),
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        let ApiError::Service(error) = self;
        match error {
            IngestionError::Validation(_) => StatusCode::BAD_REQUEST,
            IngestionError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            IngestionError::Media(MediaStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            IngestionError::Media(MediaStoreError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            IngestionError::Records(RecordStoreError::InvalidIdentifier(_)) => {
                StatusCode::BAD_REQUEST
            }
            IngestionError::Records(RecordStoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            IngestionError::Records(RecordStoreError::Backend(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[tracing::instrument(name = "Responding with an API error", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
