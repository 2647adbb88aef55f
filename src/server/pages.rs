//! Static pages

use askama::Template;
use axum::response::Html;

use crate::error::AppError;
use crate::render::{ChatPage, OtherPage};

/// GET /chat
pub async fn chat_page() -> Result<Html<String>, AppError> {
    Ok(Html(ChatPage.render()?))
}

/// GET /other
pub async fn other_page() -> Result<Html<String>, AppError> {
    Ok(Html(OtherPage.render()?))
}
