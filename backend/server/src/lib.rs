//! Documentation of the squad 1G roster pages.
//!
//! Server rendered pages for browsing the students of a squad, backed by the FDND WHOIS API.
//!
//!
//!
//! # General Infrastructure
//! - User requests a page, axum dispatches on the path
//! - Listing pages build one WHOIS query from the squad scope and a display field
//! - The response is rendered through a template together with the squad list
//! - Squad list is fetched once before the listener is bound and never refreshed
//! - Anything that is not a route falls through to the static directory
//!
//!
//!
//! # Pages
//!
//! | Path | Shows |
//! |---|---|
//! | `/` | avatar |
//! | `/emoji/` | favourite emoji |
//! | `/land/` | favourite country |
//! | `/verjaardag/` | birthdate |
//! | `/eten/` | favourite kitchen |
//! | `/kleur/` | favourite color |
//! | `/student/{id}` | one student |
//!
//! `POST /` accepts a form and redirects back to `/` with a 303.
//!
//!
//!
//! # Notes
//!
//! ## Failures
//! WHOIS is the only source of data. When it is down or answers with garbage the page
//! responds with a 502 and a short message, the cause goes to the log. Unknown students
//! are a 404. Nothing is retried and every fetch is bounded by `WHOIS_TIMEOUT_SECS`.
//!
//! If the squad list can not be loaded at startup the process exits instead of serving
//! pages without squads.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! cd backend
//! RUST_LOG=info cargo run
//! ```
//!
//! Point at another Directus instance.
//! ```sh
//! WHOIS_URL=http://localhost:8055 PORT=3000 cargo run
//! ```
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

use config::Config;
use routes::{LISTING_ROUTES, detail_handler, listing_route, submit_handler};
use state::State;

pub async fn start_server() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config).await?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = create_router(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    Ok(())
}

pub fn create_router(state: Arc<State>) -> Router {
    let mut router = Router::new();

    for (path, show) in LISTING_ROUTES {
        router = router.route(path, listing_route(show));

        // matches without the trailing slash too
        if let Some(bare) = path.strip_suffix('/').filter(|bare| !bare.is_empty()) {
            router = router.route(bare, listing_route(show));
        }
    }

    router
        .route("/", post(submit_handler))
        .route("/student/{id}", get(detail_handler))
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
