use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use sqlx::PgPool;
use std::sync::Arc;

use super::models::{NewTodo, Todo};
use super::repository::TodoRepository;
use crate::error::AppError;
use crate::render::{HomePage, TodoItem};
use crate::server::state::AppState;

fn pool(state: &AppState) -> Result<&PgPool, AppError> {
    state
        .db
        .as_ref()
        .map(|db| db.pool())
        .ok_or(AppError::Unavailable)
}

/// GET /
pub async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let todos = TodoRepository::list_recent(pool(&state)?).await?;
    tracing::debug!(count = todos.len(), "Listed todos");
    Ok(Html(HomePage { todos }.render()?))
}

/// POST /todos
///
/// Returns the new `<li>` fragment for htmx to prepend.
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewTodo>,
) -> Result<Html<String>, AppError> {
    let name = form.validate().map_err(AppError::InvalidForm)?;
    let pool = pool(&state)?;

    let todo = TodoRepository::create(pool, &Todo::new(name)).await?;
    tracing::info!(todo_id = %todo.id, "Todo created");

    Ok(Html(TodoItem { todo: &todo }.render()?))
}

/// DELETE /todos/{id}
///
/// Empty 200 so htmx swaps the item out of the list.
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let deleted = TodoRepository::delete(pool(&state)?, &id).await?;
    if deleted != 1 {
        return Err(AppError::NotFound(id));
    }

    tracing::info!(todo_id = %id, "Todo deleted");
    Ok(StatusCode::OK)
}
