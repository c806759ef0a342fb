//! Project records for kb.
//!
//! Projects form a forest through `parent_id`. The hierarchy resolver in
//! `board::hierarchy` must stay robust to cycles in malformed stores, so
//! nothing here enforces acyclicity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Reserved id for the synthesized fallback project. It intentionally
/// equals the uncategorized bucket key so the assembler's normal bucket
/// lookup attaches uncategorized tasks to the fallback lane.
pub const FALLBACK_PROJECT_ID: &str = "uncategorized";

const DEFAULT_COLOR: &str = "#8899aa";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A project owning a swimlane on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new root project with a fresh ulid id.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new().to_string().to_ascii_lowercase(),
            name: name.into(),
            parent_id: None,
            color: default_color(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The synthesized lane shown when uncategorized tasks have no real
    /// project to live under.
    pub fn fallback() -> Self {
        let now = Utc::now();
        Self {
            id: FALLBACK_PROJECT_ID.to_string(),
            name: "Uncategorized".to_string(),
            parent_id: None,
            color: default_color(),
            created_at: now,
            updated_at: now,
        }
    }
}
