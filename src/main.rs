//! htmx todo server
//!
//! ```text
//! ┌─────────┐   HTTP    ┌──────────┐   sqlx   ┌────────────┐
//! │ Browser │──────────▶│  Router  │─────────▶│ PostgreSQL │
//! │ (htmx)  │◀──ws──────│ ChatHub  │          └────────────┘
//! └─────────┘           └──────────┘
//! ```
//!
//! Usage: htmx_todo [--env dev|prod] [--port N]

use std::sync::Arc;

use anyhow::Context;
use htmx_todo::config::AppConfig;
use htmx_todo::{AppState, ChatHub, ConnectionRegistry, Database};

/// Environment name from `--env/-e`, then `APP_ENV`, then "dev"
fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn connect_database(url: Option<&str>) -> Option<Arc<Database>> {
    let Some(url) = url else {
        tracing::warn!("No postgres_url / DATABASE_URL configured, todo routes disabled");
        return None;
    };

    let db = match Database::connect(url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            return None;
        }
    };

    if let Err(e) = db.init_schema().await {
        tracing::error!("Failed to initialize todo schema: {}", e);
        return None;
    }
    Some(Arc::new(db))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut config =
        AppConfig::load(&env).with_context(|| format!("loading config for env '{}'", env))?;
    if let Some(port) = get_port_override() {
        config.server.port = port;
    }

    let _log_guard = htmx_todo::logging::init_logging(&config);
    tracing::info!(
        "Starting htmx_todo ({}) in {} mode",
        env!("GIT_HASH"),
        env
    );

    let db = connect_database(config.postgres_url.as_deref()).await;

    let registry = Arc::new(ConnectionRegistry::new());
    let chat = Arc::new(ChatHub::new(registry, &config.chat));
    tracing::info!(echo_to_sender = config.chat.echo_to_sender, "Chat hub ready");

    let state = Arc::new(AppState::new(db, chat));
    htmx_todo::server::run_server(state, &config.server)
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}
