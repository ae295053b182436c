use axum::{routing::get, Router};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::CourseQuery;
use crate::feed::CourseFeed;

mod api;
mod config;
mod feed;

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser)]
#[command(
    name = "cq-hub",
    version,
    about = "Serves NTHU courses whose English title mentions Programming"
)]
struct Args {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Path to config file
    #[arg(long, default_value = "cq-hub.toml")]
    config: PathBuf,

    /// Course feed URL (overrides `[upstream] url`)
    #[arg(long, env = "COURSE_DATA_URL")]
    upstream_url: Option<String>,
}

// =============================================================================
// Application State
// =============================================================================

pub struct AppState {
    feed: CourseFeed,
    query: CourseQuery,
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/courses", get(api::list_courses))
        .route("/health", get(api::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cq_hub=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let upstream_url = args.upstream_url.unwrap_or(config.upstream.url);
    let state = Arc::new(AppState {
        feed: CourseFeed::new(upstream_url),
        query: CourseQuery::default(),
    });

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("Server running on port {}", addr.port());
    tracing::info!("  Courses:  http://{}/courses", addr);
    tracing::info!("  Upstream: {}", state.feed.url());

    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
