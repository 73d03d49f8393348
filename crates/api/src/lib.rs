//! # Calhub API
//!
//! The API crate provides the web server for the Calhub calendar backend.
//! It exposes JSON endpoints for the caller's weekly schedule and its
//! bookable slots, tasks, events, meetings, provider calendar sync, and
//! meeting-link generation.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Services**: Provider sync and meeting links, shared by handlers
//! - **Middleware**: Caller identity and error handling
//! - **Config**: Handle environment and application configuration
//!
//! Handlers reach storage and third-party services only through the trait
//! objects in [`ApiState`], so the whole router can run against mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for caller identity and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Provider sync and meeting-link services
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
};
use calhub_core::providers::{ConferencingClient, Disconnected, ProviderClients};
use calhub_db::stores::{
    EventStore, MeetingStore, PgStore, ScheduleStore, SyncStore, TaskStore,
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{middleware::auth::USER_ID_HEADER, services::meeting_links::MeetingLinkService};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub schedules: Arc<dyn ScheduleStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub events: Arc<dyn EventStore>,
    pub meetings: Arc<dyn MeetingStore>,
    /// Transactional writes for provider sync batches
    pub synced: Arc<dyn SyncStore>,
    /// Calendar providers used by `/sync/:provider`
    pub providers: ProviderClients,
    pub meeting_links: MeetingLinkService,
}

impl ApiState {
    /// State backed by Postgres. Provider and conferencing clients report
    /// every user as not connected.
    pub fn with_pg(db_pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(db_pool));
        let conferencing: Arc<dyn ConferencingClient> = Arc::new(Disconnected);

        Self {
            schedules: store.clone(),
            tasks: store.clone(),
            events: store.clone(),
            meetings: store.clone(),
            synced: store,
            providers: ProviderClients::disconnected(),
            meeting_links: MeetingLinkService::new(conferencing),
        }
    }
}

/// Builds the application router with every endpoint and request tracing.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Weekly schedule and its bookable slots
        .merge(routes::schedule::routes())
        .merge(routes::availability::routes())
        // Calendar entries
        .merge(routes::tasks::routes())
        .merge(routes::events::routes())
        .merge(routes::meetings::routes())
        // Third-party integrations
        .merge(routes::sync::routes())
        .merge(routes::conferencing::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = calhub_api::config::ApiConfig::from_env()?;
/// let db_pool = calhub_db::create_pool(&config.database_url).await?;
/// calhub_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::with_pg(db_pool));
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let origins = config.allowed_origins();
    let app = if origins.is_empty() {
        app
    } else {
        app.layer(cors_layer(&origins))
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout)))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
