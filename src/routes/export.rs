use actix_web::{http::header::ContentType, web::Data, HttpResponse};

use super::ApiError;
use crate::services::ingestion::IngestionService;

/// Landing page listing the API surface.
#[tracing::instrument(name = "Index page")]
pub async fn index_page() -> HttpResponse {
    let html = r#"<!DOCTYPE html>
<html>
<head>
    <title>EmoGo Backend API</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
        .endpoint { background: #f4f4f4; padding: 10px; margin: 10px 0; border-radius: 5px; }
        .method { font-weight: bold; color: #007bff; }
    </style>
</head>
<body>
    <h1>Welcome to EmoGo Backend API</h1>
    <p>This API collects and manages vlogs, sentiments, and GPS coordinates.</p>
    <h2>Available Endpoints:</h2>
    <div class="endpoint"><span class="method">POST</span> /api/vlogs - Upload a new vlog (JSON data with video URL)</div>
    <div class="endpoint"><span class="method">POST</span> /api/vlogs/upload - Upload a vlog with video file (multipart/form-data)</div>
    <div class="endpoint"><span class="method">POST</span> /api/sentiments - Upload sentiment data</div>
    <div class="endpoint"><span class="method">POST</span> /api/gps - Upload GPS coordinates</div>
    <div class="endpoint"><span class="method">GET</span> /api/vlogs - Get all vlogs</div>
    <div class="endpoint"><span class="method">GET</span> /api/sentiments - Get all sentiments</div>
    <div class="endpoint"><span class="method">GET</span> /api/gps - Get all GPS coordinates</div>
    <div class="endpoint"><span class="method">GET</span> <a href="/export">/export</a> - Data export/download page</div>
    <div class="endpoint"><span class="method">GET</span> /health_check - Service health probe</div>
</body>
</html>"#;

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

/// Data export page: per-collection counts with links to the JSON listings.
#[tracing::instrument(name = "Export page", skip(service))]
pub async fn export_page(service: Data<IngestionService>) -> Result<HttpResponse, ApiError> {
    let counts = service.collection_counts().await?;

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>EmoGo Data Export</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 1200px; margin: 50px auto; padding: 20px; background-color: #f5f5f5; }}
        .container {{ background: white; padding: 30px; border-radius: 10px; }}
        .data-section {{ margin: 20px 0; padding: 20px; background: #f9f9f9; border-left: 4px solid #007bff; border-radius: 5px; }}
        .count {{ font-size: 24px; font-weight: bold; color: #28a745; }}
        .view-btn {{ display: inline-block; padding: 10px 20px; margin: 10px 10px 10px 0; background-color: #28a745; color: white; text-decoration: none; border-radius: 5px; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>EmoGo Data Export &amp; Download</h1>
        <p>This page allows you to view and download all collected data from the EmoGo application.</p>

        <div class="data-section">
            <h2>Vlogs (Video Logs)</h2>
            <p class="count">Total: {vlogs} entries</p>
            <p>Video log entries uploaded by users.</p>
            <a href="/api/vlogs" class="view-btn" target="_blank">View JSON</a>
        </div>

        <div class="data-section">
            <h2>Sentiments (Emotion Data)</h2>
            <p class="count">Total: {sentiments} entries</p>
            <p>Emotional state and sentiment data collected from users.</p>
            <a href="/api/sentiments" class="view-btn" target="_blank">View JSON</a>
        </div>

        <div class="data-section">
            <h2>GPS Coordinates (Location Data)</h2>
            <p class="count">Total: {gps} entries</p>
            <p>Geographic location data with coordinates and timestamps.</p>
            <a href="/api/gps" class="view-btn" target="_blank">View JSON</a>
        </div>
    </div>
</body>
</html>"#,
        vlogs = counts.vlogs,
        sentiments = counts.sentiments,
        gps = counts.gps_coordinates,
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html))
}
