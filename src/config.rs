//! Drill settings from an optional JSON file
//!
//! ```json
//! { "difficulty": "intermediate", "strings": [6, 5, 4], "audio": false }
//! ```
//!
//! Every field is optional. Command-line flags override the file.

use crate::fretboard::StringId;
use crate::session::Difficulty;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("malformed settings in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("no such string: {0} (strings are numbered 1-6)")]
    InvalidString(u8),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// String numbers, 1 (high E) to 6 (low E)
    pub strings: Vec<u8>,
    pub audio: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            difficulty: Difficulty::Beginner,
            strings: vec![6, 5, 4, 3, 2, 1],
            audio: true,
        }
    }
}

impl Settings {
    /// Load settings; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no settings file at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Validated string selection
    pub fn selected_strings(&self) -> Result<Vec<StringId>, ConfigError> {
        self.strings
            .iter()
            .map(|&n| StringId::new(n).ok_or(ConfigError::InvalidString(n)))
            .collect()
    }
}

/// Parse a comma-separated string list such as "6,5,4"
pub fn parse_string_list(list: &str) -> Result<Vec<u8>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let n: u8 = part
                .parse()
                .map_err(|_| format!("not a string number: {}", part))?;
            StringId::new(n)
                .map(StringId::number)
                .ok_or_else(|| format!("no such string: {} (strings are numbered 1-6)", n))
        })
        .collect()
}
