//! Bulk-inserts deterministic demo records through the ingestion service,
//! bypassing the HTTP surface. Run with `--fresh` to wipe the collections
//! and the media directory first.

use std::sync::Arc;

use emogo_backend::{
    configuration::get_configuration,
    domain::entities::{gps::NewGps, sentiment::NewSentiment, vlog::NewVlog},
    repositories::{
        media_file_fs_repository::MediaFsRepository,
        record_mongo_repository::RecordMongoRepository,
    },
    services::ingestion::IngestionService,
    startup::connect_to_database,
    telemetry::{get_tracing_subscriber, init_tracing_subscriber},
};
use tracing::info;

const DEMO_USERS: [&str; 3] = ["demo_alice", "demo_bob", "demo_carol"];

const EMOTIONS: [(&str, f64, &str); 5] = [
    ("happy", 0.8, "work"),
    ("calm", 0.5, "home"),
    ("excited", 0.9, "travel"),
    ("tired", 0.3, "commute"),
    ("neutral", 0.5, "errands"),
];

const PLACES: [(f64, f64, &str); 4] = [
    (25.0330, 121.5654, "Taipei"),
    (48.8584, 2.2945, "Paris"),
    (40.7484, -73.9857, "New York"),
    (35.6586, 139.7454, "Tokyo"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let tracing_subscriber = get_tracing_subscriber("seed".into(), "info".into(), std::io::stdout);
    init_tracing_subscriber(tracing_subscriber);

    let fresh = std::env::args().any(|argument| argument == "--fresh");

    let settings = get_configuration().expect("Failed to read configuration.");
    let db = connect_to_database(&settings.database).await?;

    let record_store = RecordMongoRepository::new(db);
    let media_store = MediaFsRepository::new(settings.media_storage.root_dir.clone());
    media_store.init().await?;
    let service = IngestionService::new(Arc::new(record_store), Arc::new(media_store));

    if fresh {
        let summary = service.clear_all().await?;
        info!(
            records_deleted = summary.records_deleted,
            media_deleted = summary.media_deleted,
            "Cleared existing data"
        );
    }

    for (user_index, user_id) in DEMO_USERS.iter().enumerate() {
        for (emotion, intensity, context) in EMOTIONS {
            service
                .ingest_sentiment(NewSentiment {
                    user_id: (*user_id).into(),
                    emotion: emotion.into(),
                    intensity,
                    note: Some(format!("Feeling {} around {}", emotion, context)),
                    context: Some(context.into()),
                    timestamp: None,
                })
                .await?;
        }

        for (latitude, longitude, location_name) in PLACES {
            service
                .ingest_gps(NewGps {
                    user_id: (*user_id).into(),
                    latitude,
                    longitude,
                    altitude: Some(10.0 + user_index as f64),
                    accuracy: Some(5.0),
                    location_name: Some(location_name.into()),
                    timestamp: None,
                })
                .await?;
        }

        for day in 1..=3 {
            service
                .ingest_vlog_reference(NewVlog {
                    user_id: (*user_id).into(),
                    video_url: format!("https://videos.example.com/{}/day-{}.mp4", user_id, day),
                    title: Some(format!("Day {} vlog", day)),
                    description: Some(format!("What {} was up to on day {}", user_id, day)),
                    duration: Some(60.0 * day as f64),
                    timestamp: None,
                })
                .await?;
        }
    }

    let counts = service.collection_counts().await?;
    info!(
        vlogs = counts.vlogs,
        sentiments = counts.sentiments,
        gps_coordinates = counts.gps_coordinates,
        "Seeding done"
    );

    Ok(())
}
