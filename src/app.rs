use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    cache::{CacheState, Diag, PageCache},
    config::Settings,
    db::{self, PgPostStore, PostStore},
    scheduler::Scheduler,
    services::PostCache,
    tasks,
};

/// seconds the scheduler gets to wind down its tasks on shutdown
const SHUTDOWN_TIMEOUT_S: u64 = 5;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostCache>,
    pub pages: Arc<PageCache>,
    pub diag: Arc<Diag>,
    pub posts_per_page: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn PostStore>, posts_per_page: u32) -> Self {
        Self {
            posts: Arc::new(PostCache::new(store)),
            pages: Arc::new(PageCache::new()),
            diag: Arc::new(Diag::default()),
            posts_per_page: posts_per_page.max(1),
        }
    }

    pub fn cache_state(&self) -> CacheState {
        CacheState {
            pages: self.pages.clone(),
            diag: self.diag.clone(),
        }
    }
}

pub fn build_app_state(pool: PgPool, settings: &Settings) -> AppState {
    AppState::new(Arc::new(PgPostStore::new(pool)), settings.posts_per_page)
}

/// `RUST_LOG` style filtering, defaulting to info
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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

    tracing::info!("shutdown signal received");
}

pub async fn run(config: Settings) -> Result<()> {
    let pool = db::connect_to_db(config.database_url.as_str()).await?;
    let state = build_app_state(pool, &config);
    let router = api::build_router(state.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("App running on {addr}");

    let mut scheduler = Scheduler::new();
    scheduler.spawn_task(
        config.cache_report_interval_s,
        "cache_report",
        state,
        tasks::report_cache_usage,
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown(SHUTDOWN_TIMEOUT_S).await;

    Ok(())
}
