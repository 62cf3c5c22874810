use actix_web::{web::Data, HttpResponse};
use tracing::error;

use crate::services::ingestion::IngestionService;

/// Liveness probe: round-trips to the record store.
#[tracing::instrument(name = "Health check handler", skip(service))]
pub async fn health_check(service: Data<IngestionService>) -> HttpResponse {
    match service.ping_records().await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(error) => {
            error!(error = ?error, "Record store is unreachable");
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
