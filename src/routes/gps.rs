use actix_web::{
    web::{self, Data},
    HttpResponse,
};
use serde_json::json;

use super::vlogs::ListQuery;
use super::ApiError;
use crate::domain::entities::gps::NewGps;
use crate::services::ingestion::IngestionService;

#[tracing::instrument(name = "Create GPS coordinate", skip(service, body))]
pub async fn create_gps(
    service: Data<IngestionService>,
    body: web::Json<NewGps>,
) -> Result<HttpResponse, ApiError> {
    let id = service.ingest_gps(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "GPS coordinate created successfully",
        "id": id,
    })))
}

#[tracing::instrument(name = "List GPS coordinates", skip(service))]
pub async fn list_gps(
    service: Data<IngestionService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let coordinates = service
        .list_gps(query.user_id.as_deref(), query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(coordinates))
}

#[tracing::instrument(name = "Get GPS coordinate by id", skip(service))]
pub async fn get_gps(
    service: Data<IngestionService>,
    gps_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let coordinate = service.get_gps(&gps_id).await?;
    Ok(HttpResponse::Ok().json(coordinate))
}
