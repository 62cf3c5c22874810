use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn the_index_page_lists_the_api_surface() {
    let app = spawn_app().await;

    let response = app.get("/").await;

    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("/api/vlogs"));
    assert!(html.contains("/export"));
}

#[tokio::test]
async fn the_export_page_shows_per_collection_counts() {
    let app = spawn_app().await;

    app.post_json(
        "/api/sentiments",
        &json!({ "user_id": "u1", "emotion": "happy", "intensity": 0.8 }),
    )
    .await;
    app.post_json(
        "/api/gps",
        &json!({ "user_id": "u1", "latitude": 1.0, "longitude": 2.0 }),
    )
    .await;

    let response = app.get("/export").await;
    assert!(response.status().is_success());

    let html = response.text().await.unwrap();
    assert!(html.contains("Total: 1 entries"));
    assert!(html.contains("Total: 0 entries"));
}
