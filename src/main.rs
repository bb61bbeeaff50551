use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use todo_api::application::todo_service::TodoService;
use todo_api::config::Config;
use todo_api::domain::repository::TodoRepository;
use todo_api::http::routing::{self, AppState};
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    // Ensure the SQLite file can be created/opened for file-backed URLs
    prepare_sqlite_file(&config.database_url)?;
    let repo = SqliteTodoRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let service = TodoService::new(Arc::new(repo));
    let router = routing::app(AppState::new(service));

    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(
        tokio::net::TcpListener::bind(config.listen_addr).await?,
        router,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown");
}

fn prepare_sqlite_file(database_url: &str) -> anyhow::Result<()> {
    if database_url.starts_with("sqlite::memory:") {
        return Ok(());
    }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        use std::fs::{self, OpenOptions};
        use std::path::Path;
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !p.exists() {
            let _ = OpenOptions::new().create(true).append(true).open(p)?;
        }
    }
    Ok(())
}
