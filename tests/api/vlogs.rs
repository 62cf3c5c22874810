use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::helpers::{spawn_app, TestApp};

const FAKE_VIDEO: &[u8] = b"not really mpeg-4, but enough bytes to store";

fn upload_form(user_id: &str, filename: &str) -> Form {
    let video_part = Part::bytes(FAKE_VIDEO.to_vec())
        .file_name(filename.to_owned())
        .mime_str("video/mp4")
        .unwrap();

    Form::new()
        .text("user_id", user_id.to_owned())
        .text("title", "My Day")
        .text("description", "A great day!")
        .part("video", video_part)
}

async fn post_upload(app: &TestApp, form: Form) -> reqwest::Response {
    app.api_client
        .post(format!("{}/api/vlogs/upload", app.address))
        .multipart(form)
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn a_reference_vlog_is_created_and_fetched_back() {
    let app = spawn_app().await;
    let body = json!({
        "user_id": "u1",
        "video_url": "https://example.com/video.mp4",
        "title": "My Day",
        "duration": 120.5,
    });

    let response = app.post_json("/api/vlogs", &body).await;
    assert_eq!(201, response.status().as_u16());

    let created: serde_json::Value = response.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let fetched: serde_json::Value = app
        .get(&format!("/api/vlogs/{}", id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["user_id"], "u1");
    assert_eq!(fetched["video_url"], "https://example.com/video.mp4");
    assert_eq!(fetched["duration"], 120.5);
    assert!(fetched["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn lookups_distinguish_malformed_ids_from_unknown_ones() {
    let app = spawn_app().await;

    let response = app.get("/api/vlogs/not-an-id").await;
    assert_eq!(400, response.status().as_u16());

    // Well-formed ObjectId that was never assigned
    let response = app.get("/api/vlogs/ffffffffffffffffffffffff").await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn an_uploaded_vlog_is_stored_and_downloadable() {
    let app = spawn_app().await;

    let response = post_upload(&app, upload_form("u1", "clip.mp4")).await;
    assert_eq!(201, response.status().as_u16());

    let created: serde_json::Value = response.json().await.unwrap();
    assert_eq!(created["file_size"], FAKE_VIDEO.len() as u64);
    let download_url = created["download_url"].as_str().unwrap();
    let video_url = created["video_url"].as_str().unwrap();

    // The blob comes back byte-for-byte through both endpoints
    let download = app.get(download_url).await;
    assert_eq!(200, download.status().as_u16());
    assert_eq!(
        download.headers()["content-type"].to_str().unwrap(),
        "video/mp4"
    );
    assert_eq!(download.bytes().await.unwrap().as_ref(), FAKE_VIDEO);

    let inline = app.get(video_url).await;
    assert_eq!(200, inline.status().as_u16());
    assert_eq!(inline.bytes().await.unwrap().as_ref(), FAKE_VIDEO);

    // The document carries the upload metadata
    let listed: Vec<serde_json::Value> =
        app.get("/api/vlogs?user_id=u1").await.json().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["original_filename"], "clip.mp4");
    assert_eq!(listed[0]["video_url"], *video_url);
}

#[tokio::test]
async fn a_disallowed_extension_is_rejected_without_storing_anything() {
    let app = spawn_app().await;

    let response = post_upload(&app, upload_form("u1", "notes.txt")).await;

    assert_eq!(415, response.status().as_u16());
    assert_eq!(app.stored_media_count(), 0);

    let listed: Vec<serde_json::Value> = app.get("/api/vlogs").await.json().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn concurrent_uploads_of_the_same_filename_never_collide() {
    let app = spawn_app().await;

    let (first, second) = tokio::join!(
        post_upload(&app, upload_form("u1", "clip.mp4")),
        post_upload(&app, upload_form("u2", "clip.mp4")),
    );
    assert_eq!(201, first.status().as_u16());
    assert_eq!(201, second.status().as_u16());

    let first: serde_json::Value = first.json().await.unwrap();
    let second: serde_json::Value = second.json().await.unwrap();
    assert_ne!(first["video_url"], second["video_url"]);
    assert_eq!(app.stored_media_count(), 2);

    for created in [&first, &second] {
        let response = app.get(created["download_url"].as_str().unwrap()).await;
        assert_eq!(200, response.status().as_u16());
    }
}

#[tokio::test]
async fn downloading_an_unknown_video_returns_a_404() {
    let app = spawn_app().await;

    let response = app
        .get("/api/vlogs/download/00000000-0000-0000-0000-000000000000.mp4")
        .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn listing_honors_the_limit() {
    let app = spawn_app().await;

    for day in 1..=3 {
        app.post_json(
            "/api/vlogs",
            &json!({
                "user_id": "u1",
                "video_url": format!("https://example.com/day-{}.mp4", day),
            }),
        )
        .await;
    }

    let listed: Vec<serde_json::Value> = app
        .get("/api/vlogs?limit=2")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
}
