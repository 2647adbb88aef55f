use std::sync::Arc;

use crate::chat::ChatHub;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool; todo routes answer 503 without it
    pub db: Option<Arc<Database>>,
    /// Chat room, owns the connection registry
    pub chat: Arc<ChatHub>,
}

impl AppState {
    pub fn new(db: Option<Arc<Database>>, chat: Arc<ChatHub>) -> Self {
        Self { db, chat }
    }
}
