pub mod health;
pub mod pages;
pub mod state;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, header},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::chat::ws_handler;
use crate::config::ServerConfig;
use crate::todo::handlers::{create_todo, delete_todo, list_todos};
use state::AppState;

/// Development middleware: forbid caching at browser (HTTP/1.1 and 1.0)
/// and proxy level.
async fn no_cache(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}

/// Build the complete router
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let app = Router::new()
        // Todo list
        .route("/", get(list_todos))
        .route("/todos", post(create_todo))
        .route("/todos/{id}", delete(delete_todo))
        // Pages
        .route("/other", get(pages::other_page))
        .route("/chat", get(pages::chat_page))
        // Chat socket
        .route("/chat/ws", get(ws_handler))
        .route("/health", get(health::health_check))
        .nest_service("/public", ServeDir::new(&config.public_dir))
        .with_state(state);

    if config.no_cache {
        app.layer(middleware::from_fn(no_cache))
    } else {
        app
    }
}

/// Bind and serve until Ctrl-C
pub async fn run_server(state: Arc<AppState>, config: &ServerConfig) -> std::io::Result<()> {
    let app = build_router(state, config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.inspect_err(|e| {
        tracing::error!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            config.port
        );
    })?;

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Chat endpoint: ws://{}/chat/ws", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
