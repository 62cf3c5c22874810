use actix_web::{
    web::{self, Data},
    HttpResponse,
};
use serde_json::json;

use super::vlogs::ListQuery;
use super::ApiError;
use crate::domain::entities::sentiment::NewSentiment;
use crate::services::ingestion::IngestionService;

#[tracing::instrument(name = "Create sentiment", skip(service, body))]
pub async fn create_sentiment(
    service: Data<IngestionService>,
    body: web::Json<NewSentiment>,
) -> Result<HttpResponse, ApiError> {
    let id = service.ingest_sentiment(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Sentiment created successfully",
        "id": id,
    })))
}

#[tracing::instrument(name = "List sentiments", skip(service))]
pub async fn list_sentiments(
    service: Data<IngestionService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let sentiments = service
        .list_sentiments(query.user_id.as_deref(), query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(sentiments))
}

#[tracing::instrument(name = "Get sentiment by id", skip(service))]
pub async fn get_sentiment(
    service: Data<IngestionService>,
    sentiment_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let sentiment = service.get_sentiment(&sentiment_id).await?;
    Ok(HttpResponse::Ok().json(sentiment))
}
