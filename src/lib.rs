//! Prayer window service.
//!
//! Resolves which of the five daily prayers is in effect and which comes
//! next, and serves a stored day timetable over a small JSON API.
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=sunnah_prayer=debug,tower_http=info`) to
//! control logging, `PRAYER_BIND_ADDR` / `PRAYER_DATA_PATH` to move the
//! listener or the timetable file.

pub mod clock;  // Source of "now" (system / fixed)
pub mod config; // Environment-driven settings
pub mod error;  // PrayerError / AppError
pub mod models; // Data structures (PrayerName, PrayerWindow, DayTimings)
pub mod store;  // Persistent storage (load/save timings.json)
pub mod logic;  // Core prayer window resolution
pub mod state;  // Shared handler state
pub mod routes_prayer;  // HTTP handlers for resolve & live status
pub mod routes_timings; // HTTP handlers for the stored timetable

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Json, Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;
use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        // prayer
        .route("/prayer/resolve", post(routes_prayer::resolve))
        .route("/prayer/status", get(routes_prayer::get_status))
        // timetable
        .route(
            "/timings",
            get(routes_timings::get_timings).put(routes_timings::put_timings),
        )
        .route("/health", get(|| async { Json(serde_json::json!({ "ok": true })) }));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> std::io::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    let addr = config.bind_addr;
    info!("Timetable file: {}", config.data_path.display());

    let app = build_router(AppState::new(config));

    let listener = TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!("bind {addr} failed: {e}"))?;

    info!("Server running at http://{addr}");
    info!("API base:     http://{addr}/api");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

