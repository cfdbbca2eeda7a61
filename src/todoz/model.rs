//! # Domain Model
//!
//! [`Todo`] is the single record type; [`FilterMode`] selects which todos a view shows.
//!
//! ## Field Rules
//!
//! - `id` is opaque and never changes once assigned.
//! - `title` and `description` are stored trimmed. A todo is never created with a blank title.
//! - `order` only expresses relative position. Stored data may carry gaps or duplicates,
//!   but every structural mutation (delete, move) rewrites it to `0..n-1`.
//!
//! The serialized shape is exactly the persisted record:
//!
//! ```text
//! {"id": "…", "title": "…", "description": "…", "completed": false, "order": 0}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::id::new_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub order: i64,
}

impl Todo {
    /// Builds a new, not yet completed todo with a fresh id.
    pub fn new(title: &str, description: &str, order: i64) -> Self {
        Self {
            id: new_id(),
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            completed: false,
            order,
        }
    }
}

/// Which todos a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Active => "active",
            FilterMode::Completed => "completed",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing never fails: anything unrecognized falls through to [`FilterMode::All`].
impl FromStr for FilterMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "active" => FilterMode::Active,
            "completed" => FilterMode::Completed,
            _ => FilterMode::All,
        })
    }
}
