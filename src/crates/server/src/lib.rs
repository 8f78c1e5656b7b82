pub mod consts;
pub mod middleware;
pub mod native_api;
pub mod payload;

use actix_web::{web, HttpResponse, Responder};
use application::command::artist::ArtistService;
use domain::artist::ArtistRepository;
use infra::config::AppConfigImpl;
use infra::repository::in_memory::InMemoryArtistRepository;
use infra::repository::postgres::command::ArtistRepositoryImpl;
use log::info;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement,
};
use std::sync::Arc;
use std::time::Duration;

/// Shared handler state. Holds no per-request data; the repository behind
/// the service is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub artist_service: ArtistService,
}

impl AppState {
    pub fn new(artist_repository: Arc<dyn ArtistRepository>) -> Self {
        Self {
            artist_service: ArtistService::new(artist_repository),
        }
    }

    pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(20)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(3))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(300))
            .sqlx_logging(false)
            .sqlx_logging_level(log::LevelFilter::Info);

        let db = Database::connect(opt).await?;

        let backend = DbBackend::Postgres;
        db.execute(Statement::from_string(backend, "SELECT 1".to_owned()))
            .await?;

        info!("Database connection pool initialized successfully");
        Ok(db)
    }

    /// Builds the repository named by the configured connection string:
    /// `memory:` keeps everything in process, anything else is PostgreSQL.
    pub async fn from_config(cfg: &AppConfigImpl) -> Result<Self, DbErr> {
        if cfg.uses_memory_store() {
            info!("Using in-memory artist store");
            return Ok(Self::new(Arc::new(InMemoryArtistRepository::new())));
        }

        let db = Self::init_db(cfg.database_url()).await?;
        if cfg.auto_migrate() {
            Migrator::up(&db, None).await?;
            info!("Database migrations applied");
        }
        Ok(Self::new(Arc::new(ArtistRepositoryImpl::new(db))))
    }
}

async fn welcome() -> impl Responder {
    HttpResponse::Ok().body(consts::WELCOME_MESSAGE)
}

/// Registers the welcome route and the artist API.
pub fn configure_app(svc: &mut web::ServiceConfig) {
    svc.route("/", web::get().to(welcome));
    native_api::configure_service(svc);
}
