use serde_json::json;

use crate::helpers::spawn_app;

#[tokio::test]
async fn a_valid_coordinate_round_trips_with_its_optional_fields() {
    let app = spawn_app().await;
    let body = json!({
        "user_id": "u1",
        "latitude": 25.0330,
        "longitude": 121.5654,
        "altitude": 10.0,
        "accuracy": 5.0,
        "location_name": "Taipei",
    });

    let created: serde_json::Value = app.post_json("/api/gps", &body).await.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let fetched: serde_json::Value = app
        .get(&format!("/api/gps/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["latitude"], 25.0330);
    assert_eq!(fetched["longitude"], 121.5654);
    assert_eq!(fetched["location_name"], "Taipei");
    assert!(fetched["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn boundary_coordinates_are_accepted() {
    let app = spawn_app().await;

    for (latitude, longitude) in [(90.0, 180.0), (-90.0, -180.0)] {
        let response = app
            .post_json(
                "/api/gps",
                &json!({ "user_id": "u1", "latitude": latitude, "longitude": longitude }),
            )
            .await;
        assert_eq!(
            201,
            response.status().as_u16(),
            "({}, {}) should be accepted",
            latitude,
            longitude
        );
    }
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected_with_a_400() {
    let app = spawn_app().await;

    for (latitude, longitude) in [(90.1, 0.0), (-90.5, 0.0), (0.0, 180.1), (0.0, -181.0)] {
        let response = app
            .post_json(
                "/api/gps",
                &json!({ "user_id": "u1", "latitude": latitude, "longitude": longitude }),
            )
            .await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "({}, {}) should be rejected",
            latitude,
            longitude
        );
    }

    let listed: Vec<serde_json::Value> = app.get("/api/gps").await.json().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn listing_filters_by_owner_exactly() {
    let app = spawn_app().await;

    for user_id in ["u1", "u1", "U1", "u2"] {
        app.post_json(
            "/api/gps",
            &json!({ "user_id": user_id, "latitude": 1.0, "longitude": 2.0 }),
        )
        .await;
    }

    let listed: Vec<serde_json::Value> = app
        .get("/api/gps?user_id=u1")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|entry| entry["user_id"] == "u1"));
}
