//! Todo list: model, PostgreSQL repository and HTTP handlers

pub mod handlers;
pub mod models;
pub mod repository;

pub use models::{NewTodo, Todo};
pub use repository::TodoRepository;
