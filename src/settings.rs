//! Persisted UI settings.
//!
//! Board density and the show-done-column toggle live in `settings.toml`
//! in the board data directory. The engine never owns these: they are
//! loaded at startup, passed into the assembler, and written back on
//! toggle, with a change notification published for other views.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lock;

/// Card density of the rendered board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Compact,
    #[default]
    Cozy,
    Comfortable,
}

impl Density {
    pub fn as_str(&self) -> &'static str {
        match self {
            Density::Compact => "compact",
            Density::Cozy => "cozy",
            Density::Comfortable => "comfortable",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Density::Compact),
            "cozy" => Ok(Density::Cozy),
            "comfortable" => Ok(Density::Comfortable),
            other => Err(Error::InvalidSettings(format!(
                "unknown density '{other}' (expected compact, cozy, comfortable)"
            ))),
        }
    }
}

fn default_show_done_column() -> bool {
    true
}

/// Externally owned board presentation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSettings {
    #[serde(default)]
    pub density: Density,

    #[serde(default = "default_show_done_column")]
    pub show_done_column: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            density: Density::default(),
            show_done_column: default_show_done_column(),
        }
    }
}

impl BoardSettings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Persist settings atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let body = toml::to_string_pretty(self)?;
        lock::write_atomic_str(path, &body)
    }
}
