//! Banter API
//!
//! Backend for the banter conversation coaching app.
//!
//! ## REST Endpoints
//!
//! - `POST /api/auth/session` - Exchange a third-party session id for a token
//! - `GET /api/auth/me` - Current user
//! - `POST /api/auth/logout` - Delete the current session
//! - `POST /api/analyze-text` - Generate reply suggestions for pasted text
//! - `POST /api/analyze-image` - Generate reply suggestions for a screenshot
//! - `GET /api/history` - Recent analyses, image payloads stripped
//! - `GET /api/analysis/{id}` - Full analysis record
//! - `GET /api/subscription/plans` - Static tier catalog (public)
//! - `POST /api/subscription/activate` - Mock subscription activation
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use banter_ai_core::{CoachService, OpenAiChatProvider};
use banter_auth_core::{AuthService, HttpIdentityProvider};
use banter_db::pg::Repositories;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("banter_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Banter API");

    // Load configuration
    let config = Config::from_env()?;
    error::set_debug_errors(config.debug_errors);
    tracing::info!(http_port = config.http_port, "Configuration loaded");

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create database pool
    let pool = banter_db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Create repositories
    let repos = Repositories::new(pool.clone());

    // Create the auth service against the external identity provider
    let identity = Arc::new(HttpIdentityProvider::new(config.session_exchange_url.clone()));
    let auth = AuthService::new(
        identity,
        Arc::new(repos.users.clone()),
        Arc::new(repos.sessions.clone()),
        config.session_duration_hours,
    );

    // Create the AI orchestration service
    let provider = OpenAiChatProvider::new(config.openai_config());
    let coach = CoachService::new(Arc::new(provider));

    // Create application state
    let state = AppState::new(auth, coach, repos, pool, config.clone());

    // Build router and serve
    let app = build_router(state, metrics_handle);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    run_http_server(app, addr).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // API routes
    let api = Router::new()
        // Auth routes
        .route("/auth/session", post(handlers::exchange_session))
        .route("/auth/me", get(handlers::me))
        .route("/auth/logout", post(handlers::logout))
        // Analysis routes
        .route("/analyze-text", post(handlers::analyze_text))
        .route("/analyze-image", post(handlers::analyze_image))
        .route("/history", get(handlers::history))
        .route("/analysis/{id}", get(handlers::get_analysis))
        // Subscription routes
        .route("/subscription/plans", get(handlers::list_plans))
        .route("/subscription/activate", post(handlers::activate));

    // Health routes (outside the middleware stack - must always respond)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Metrics route
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Combine all routes
    Router::new()
        .nest("/api", api)
        .layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

async fn run_http_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Analysis latency is dominated by the model round trip; buckets run
    // from sub-second to half a minute.
    let analysis_latency_buckets = &[0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0];

    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("analysis_duration_seconds".to_string()),
        analysis_latency_buckets,
    )?;

    let handle = builder.install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!("analyses_created_total", "Total analyses created by kind");
    metrics::describe_counter!(
        "subscriptions_activated_total",
        "Total mock subscription activations"
    );
    metrics::describe_histogram!(
        "analysis_duration_seconds",
        "End-to-end analysis latency in seconds by kind"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
