//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads configuration, connects the database, builds the
//! chat model and Cloudinary client once, and serves the router from
//! [`build_router`].

// region: --- Imports
use crate::chat::{ChatModel, GenaiChatModel};
use crate::handlers;
use crate::middleware::{log_requests, require_admin, stamp_req, RequestStamp};
use crate::services::SliderFeed;
use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use lib_core::{create_pool, run_migrations, Config, DbPool};
use lib_media::{CloudinaryClient, CloudinaryConfig};
use lib_utils::get_env_or;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
// endregion: --- Imports

/// Largest accepted upload request.
const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub chat_model: Arc<dyn ChatModel>,
    pub media: Arc<CloudinaryClient>,
    pub slider_feed: Arc<SliderFeed>,
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ChatModel> {
    fn from_ref(state: &AppState) -> Self {
        state.chat_model.clone()
    }
}

impl FromRef<AppState> for Arc<CloudinaryClient> {
    fn from_ref(state: &AppState) -> Self {
        state.media.clone()
    }
}

impl FromRef<AppState> for Arc<SliderFeed> {
    fn from_ref(state: &AppState) -> Self {
        state.slider_feed.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// `BIND_ADDRESS` and comma-separated `ALLOWED_ORIGINS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);
        let allowed_origins = match get_env_or("ALLOWED_ORIGINS", "").as_str() {
            "" => defaults.allowed_origins,
            raw => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Self {
            bind_address,
            allowed_origins,
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - The Cloudinary client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    info!(" STEEL CATALOG BACKEND STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!("Connecting to database: {}", app_config.database_url);
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations");
    run_migrations(&pool).await?;
    info!(" Migrations complete");

    info!(" AI model: {}", app_config.ai.model);
    let chat_model: Arc<dyn ChatModel> = Arc::new(GenaiChatModel::new(app_config.ai.clone()));

    let media_config = &app_config.media;
    let media = CloudinaryClient::new(CloudinaryConfig::new(
        &media_config.cloud_name,
        &media_config.api_key,
        &media_config.api_secret,
        &media_config.upload_folder,
    ))?;
    info!(" Cloudinary cloud: {}", media_config.cloud_name);

    let state = AppState {
        db: pool,
        config: app_config,
        chat_model,
        media: Arc::new(media),
        slider_feed: Arc::new(SliderFeed::new()),
    };

    let app = build_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// `tracing` subscriber with the level taken from `LOG_LEVEL` (default `info`).
fn init_tracing() -> anyhow::Result<()> {
    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();
    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))
}

/// Build the application router with all routes and layers.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let admin = Router::new()
        .route(
            "/api/admin/chat-prompts",
            get(handlers::prompts::list_prompts).post(handlers::prompts::create_prompt),
        )
        .route(
            "/api/admin/chat-prompts/{id}",
            get(handlers::prompts::get_prompt)
                .put(handlers::prompts::update_prompt)
                .delete(handlers::prompts::delete_prompt),
        )
        .route("/api/admin/chat-prompts/{id}/activate", post(handlers::prompts::activate_prompt))
        .route(
            "/api/admin/sliders",
            get(handlers::sliders::list_all_sliders).post(handlers::sliders::create_slider),
        )
        .route(
            "/api/admin/sliders/{id}",
            put(handlers::sliders::update_slider).delete(handlers::sliders::delete_slider),
        )
        .route(
            "/api/admin/uploads",
            post(handlers::uploads::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/chat/stream", post(handlers::chat::chat_stream))
        .route("/api/sliders", get(handlers::sliders::list_sliders))
        .route("/api/sliders/events", get(handlers::sliders::slider_events))
        .route("/api/admin/login", post(handlers::auth::login))
        .merge(admin)
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        // Outermost, so the stamp exists for the span and the logger
        .layer(middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" PUBLIC:");
    info!("   • POST /api/chat");
    info!("   • POST /api/chat/stream");
    info!("   • GET  /api/sliders");
    info!("   • GET  /api/sliders/events");
    info!(" ADMIN:");
    info!("   • POST /api/admin/login");
    info!("   • GET|POST /api/admin/chat-prompts");
    info!("   • GET|PUT|DELETE /api/admin/chat-prompts/{{id}}");
    info!("   • POST /api/admin/chat-prompts/{{id}}/activate");
    info!("   • GET|POST /api/admin/sliders");
    info!("   • PUT|DELETE /api/admin/sliders/{{id}}");
    info!("   • POST /api/admin/uploads");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
