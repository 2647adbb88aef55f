//! Todo entity and the create form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted todo name, in characters
pub const MAX_NAME_LEN: usize = 255;

/// A row of the `todo` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// New todo with a fresh ULID and the current server time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}

/// `POST /todos` form body
#[derive(Debug, Deserialize)]
pub struct NewTodo {
    #[serde(default)]
    pub name: String,
}

impl NewTodo {
    /// Trim and check the name. Returns the cleaned name.
    pub fn validate(&self) -> Result<&str, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name must not be empty");
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err("name must be at most 255 characters");
        }
        Ok(name)
    }
}
