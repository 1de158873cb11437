use crate::error::{MinifyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-pass minifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Drop a leading UTF-8 byte-order mark.
    pub strip_bom: bool,
    /// Append one newline after a successful pass.
    pub trailing_newline: bool,
    /// Identifier attached to diagnostics.
    pub source_name: Option<String>,
}

impl MinifyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if matches!(self.source_name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(MinifyError::InvalidConfig("source_name must not be blank".into()));
        }
        Ok(())
    }
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            strip_bom: true,
            trailing_newline: true,
            source_name: None,
        }
    }
}
