//! htmx todo - server-rendered todo list with a broadcast chat room
//!
//! # Modules
//!
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing subscriber setup
//! - [`db`] - PostgreSQL pool and schema
//! - [`todo`] - Todo model, repository and handlers
//! - [`render`] - askama pages and fragments
//! - [`chat`] - connection registry, hub and socket handler
//! - [`server`] - router, middleware and serve loop

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod render;
pub mod server;
pub mod todo;

// Convenient re-exports at crate root
pub use chat::{ChatHub, ConnectionRegistry};
pub use config::AppConfig;
pub use db::Database;
pub use error::AppError;
pub use server::state::AppState;
pub use todo::Todo;
