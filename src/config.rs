//! Project configuration (typesplit.toml) parsing and types.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::deps::MatchMode;

/// Root configuration structure for typesplit.toml.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct SplitConfig {
    /// Split defaults.
    #[serde(default)]
    pub split: SplitSection,
}

/// `[split]` section.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct SplitSection {
    /// Default output directory when `--migrate` is omitted.
    pub output: Option<String>,
    /// Default for `--overwrite`.
    pub overwrite: Option<bool>,
    /// Dependency matching mode: "substring" or "word".
    #[serde(rename = "match")]
    pub match_mode: Option<MatchMode>,
    /// Output file extension, without the dot.
    pub extension: Option<String>,
}

impl SplitConfig {
    /// Default file name looked up in the current directory.
    pub const FILE_NAME: &'static str = "typesplit.toml";

    /// Load from `path`. Returns `Ok(None)` if the file doesn't exist.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(Self::parse(&content)?))
    }

    /// Load typesplit.toml from the current directory, or defaults if absent.
    pub fn load_or_default() -> anyhow::Result<Self> {
        Ok(Self::load_from_path(Path::new(Self::FILE_NAME))?.unwrap_or_default())
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
