use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn a_valid_sentiment_is_created_and_listed_back() {
    // Arrange
    let app = spawn_app().await;
    let body = json!({
        "user_id": "u1",
        "emotion": "happy",
        "intensity": 0.8,
    });

    // Act
    let response = app.post_json("/api/sentiments", &body).await;

    // Assert
    assert_eq!(201, response.status().as_u16());
    let created: serde_json::Value = response.json().await.unwrap();
    assert!(created["id"].as_str().is_some());

    let listed: Vec<serde_json::Value> = app
        .get("/api/sentiments?user_id=u1")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["emotion"], "happy");
    assert_eq!(listed[0]["intensity"], 0.8);
    assert!(listed[0]["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn a_sentiment_round_trips_through_its_id() {
    let app = spawn_app().await;
    let body = json!({
        "user_id": "u1",
        "emotion": "excited",
        "intensity": 0.9,
        "note": "Had a great meeting today",
        "context": "work",
    });

    let created: serde_json::Value = app
        .post_json("/api/sentiments", &body)
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let response = app.get(&format!("/api/sentiments/{}", id)).await;
    assert_eq!(200, response.status().as_u16());

    let fetched: serde_json::Value = response.json().await.unwrap();
    assert_eq!(fetched["_id"], *id);
    assert_eq!(fetched["emotion"], "excited");
    assert_eq!(fetched["note"], "Had a great meeting today");
    assert_eq!(fetched["context"], "work");
}

#[tokio::test]
async fn boundary_intensities_are_accepted() {
    let app = spawn_app().await;

    for intensity in [0.0, 1.0] {
        let response = app
            .post_json(
                "/api/sentiments",
                &json!({ "user_id": "u1", "emotion": "neutral", "intensity": intensity }),
            )
            .await;
        assert_eq!(
            201,
            response.status().as_u16(),
            "intensity {} should be accepted",
            intensity
        );
    }
}

#[tokio::test]
async fn out_of_range_intensities_are_rejected_with_a_400() {
    let app = spawn_app().await;

    for intensity in [-0.1, 1.5] {
        let response = app
            .post_json(
                "/api/sentiments",
                &json!({ "user_id": "u1", "emotion": "angry", "intensity": intensity }),
            )
            .await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "intensity {} should be rejected",
            intensity
        );
    }

    // Nothing reached the store
    let listed: Vec<serde_json::Value> =
        app.get("/api/sentiments").await.json().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn a_payload_missing_a_required_field_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .post_json(
            "/api/sentiments",
            &json!({ "user_id": "u1", "emotion": "happy" }),
        )
        .await;

    assert_eq!(400, response.status().as_u16());
}
