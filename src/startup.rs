use std::net::TcpListener;
use std::sync::Arc;

use actix_web::{
    dev::Server,
    web::{self, Data},
    App, HttpServer,
};
use mongodb::{bson::doc, Client, Database};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{DatabaseSettings, Settings},
    repositories::{
        media_file_fs_repository::MediaFsRepository,
        record_mongo_repository::RecordMongoRepository,
    },
    routes,
    services::ingestion::IngestionService,
};

/// Holds the newly built server, and some useful properties
pub struct Application {
    server: Server,
    port: u16,
}

#[derive(thiserror::Error, Debug)]
pub enum ApplicationBuildError {
    #[error("Document store error: {0}")]
    DatabaseError(#[from] mongodb::error::Error),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl Application {
    /// Builds every component with its dependencies passed in explicitly.
    ///
    /// An unreachable document store or an uncreatable media directory is a
    /// boot failure: nothing is served in a half-initialized state.
    #[tracing::instrument(name = "Building application", skip(settings))]
    pub async fn build(settings: Settings) -> Result<Self, ApplicationBuildError> {
        let db = connect_to_database(&settings.database).await?;

        let record_store = RecordMongoRepository::new(db);
        let media_store = MediaFsRepository::new(settings.media_storage.root_dir.clone());
        media_store.init().await?;

        let ingestion_service =
            IngestionService::new(Arc::new(record_store), Arc::new(media_store));

        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, ingestion_service)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// This function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        info!("Running server ...");
        self.server.await
    }
}

/// Connects and pings, so a dead store fails the boot rather than the first
/// request.
#[tracing::instrument(name = "Connecting to the document store", skip(settings))]
pub async fn connect_to_database(
    settings: &DatabaseSettings,
) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(settings.connection_string()).await?;
    let db = client.database(&settings.database_name);
    db.run_command(doc! { "ping": 1 }, None).await?;

    info!(database = %settings.database_name, "Connected to MongoDB");
    Ok(db)
}

/// listener: the caller binds their own port (tests bind port 0).
///
/// The TracingLogger middleware generates a unique `request_id` for each
/// incoming request.
pub fn run(
    listener: TcpListener,
    ingestion_service: IngestionService,
) -> Result<Server, std::io::Error> {
    // Wraps the service in `actix_web::Data` (an `Arc`) so every worker
    // shares the same store handles.
    let ingestion_service = Data::new(ingestion_service);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(routes::export::index_page))
            .route("/health_check", web::get().to(routes::health_check::health_check))
            .route("/export", web::get().to(routes::export::export_page))
            .route(
                "/uploads/videos/{filename}",
                web::get().to(routes::media::serve_video),
            )
            .service(
                web::scope("/api")
                    .route("/vlogs", web::post().to(routes::vlogs::create_vlog))
                    .route("/vlogs", web::get().to(routes::vlogs::list_vlogs))
                    .route("/vlogs/upload", web::post().to(routes::vlogs::upload_vlog))
                    .route(
                        "/vlogs/download/{filename}",
                        web::get().to(routes::media::download_video),
                    )
                    .route("/vlogs/{vlog_id}", web::get().to(routes::vlogs::get_vlog))
                    .route(
                        "/sentiments",
                        web::post().to(routes::sentiments::create_sentiment),
                    )
                    .route(
                        "/sentiments",
                        web::get().to(routes::sentiments::list_sentiments),
                    )
                    .route(
                        "/sentiments/{sentiment_id}",
                        web::get().to(routes::sentiments::get_sentiment),
                    )
                    .route("/gps", web::post().to(routes::gps::create_gps))
                    .route("/gps", web::get().to(routes::gps::list_gps))
                    .route("/gps/{gps_id}", web::get().to(routes::gps::get_gps)),
            )
            .app_data(ingestion_service.clone())
    })
    .listen(listener)?;

    Ok(server.run())
}
