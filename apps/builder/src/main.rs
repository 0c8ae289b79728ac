use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use builder::builder::BuilderService;
use builder::config::Config;
use builder::persistence::{HttpResumeStore, InMemoryResumeStore, ResumeStore};
use builder::routes::build_router;
use builder::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn ResumeStore> = match &config.persistence_api_url {
        Some(url) => {
            info!("Resume API at {url}");
            Arc::new(HttpResumeStore::new(
                url.clone(),
                config.persistence_api_token.clone(),
                Duration::from_secs(config.persistence_timeout_secs),
            )?)
        }
        None => {
            info!("PERSISTENCE_API_URL not set; keeping resumes in memory");
            Arc::new(InMemoryResumeStore::new())
        }
    };

    info!(
        "Reconcile policy: {}, export timeout {}s",
        config.reconcile_policy, config.export_timeout_secs
    );
    let builder = Arc::new(BuilderService::new(
        store,
        Duration::from_secs(config.export_timeout_secs),
        config.reconcile_policy,
    ));

    spawn_session_sweeper(builder.clone(), Duration::from_secs(config.session_ttl_secs));

    let state = AppState {
        config: config.clone(),
        builder,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Evicts idle builder sessions once a minute (or once per TTL, if shorter).
fn spawn_session_sweeper(builder: Arc<BuilderService>, ttl: Duration) {
    let period = ttl.min(Duration::from_secs(60)).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            builder.sessions().evict_idle(ttl).await;
        }
    });
}
