use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use medinest::config::{LoggingSettings, Settings, StoreBackend};
use medinest::core::RecommendationGenerator;
use medinest::routes::{self, AppState};
use medinest::services::{GeminiClient, MemoryProfileStore, PostgresProfileStore, ProfileStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

/// LOG_LEVEL and LOG_FORMAT override the [logging] section
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn ProfileStore>> {
    match settings.store.backend {
        StoreBackend::Memory => {
            info!("Using in-memory profile store (capacity: {})", settings.store.capacity);
            Ok(Arc::new(MemoryProfileStore::new(settings.store.capacity)))
        }
        StoreBackend::Postgres => {
            let db = &settings.database;
            let url = db.url.as_deref().ok_or_else(|| {
                error!("Postgres profile store selected but no database.url configured");
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "database.url is required")
            })?;

            let store = PostgresProfileStore::from_settings(
                url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;

            info!("PostgreSQL profile store initialized (max: {} connections)", db.max_connections.unwrap_or(10));
            Ok(Arc::new(store))
        }
    }
}

fn build_generator(settings: &Settings) -> RecommendationGenerator {
    let gemini = &settings.gemini;
    let Some(api_key) = gemini.api_key() else {
        warn!("No Gemini API key configured, recommendations will use the local fallback");
        return RecommendationGenerator::local_only();
    };

    match GeminiClient::new(
        gemini.endpoint.clone(),
        gemini.model.clone(),
        api_key.to_string(),
        Duration::from_secs(gemini.timeout_secs),
    ) {
        Ok(client) => {
            info!("Gemini client initialized (model: {})", gemini.model);
            RecommendationGenerator::new(Arc::new(client))
        }
        Err(e) => {
            error!("Failed to initialize Gemini client ({}), using local fallback only", e);
            RecommendationGenerator::local_only()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let loaded = Settings::load();
    init_logging(&loaded.as_ref().map(|s| s.logging.clone()).unwrap_or_default());

    info!("Starting MediNest recommendation service...");

    let settings = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let profiles = build_store(&settings).await?;
    let generator = build_generator(&settings);

    let app_state = AppState {
        profiles,
        generator,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
