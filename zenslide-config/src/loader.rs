//! Loading override documents from disk.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::models::CarouselConfig;
use crate::validation::ConfigWarnings;

/// A resolved snapshot together with its non-fatal warnings.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CarouselConfig,
    pub warnings: ConfigWarnings,
}

/// Resolves carousel options from an optional overrides file.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read the overrides document, or an empty object when no path is set.
    pub fn overrides(&self) -> Result<Value> {
        match &self.path {
            Some(path) => read_overrides(path),
            None => Ok(Value::Object(Default::default())),
        }
    }

    pub fn load(&self) -> Result<ConfigLoad> {
        let overrides = self.overrides()?;
        let config = CarouselConfig::resolve(&overrides)?;
        let warnings = config.warnings();
        if let Some(path) = &self.path {
            tracing::debug!(
                target: "zenslide::config",
                path = %path.display(),
                warnings = warnings.len(),
                "carousel options resolved"
            );
        }
        Ok(ConfigLoad { config, warnings })
    }
}

/// Parse a `.json` or `.toml` overrides document into a JSON value.
pub fn read_overrides(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(serde_json::from_str(&text)?),
        Some("toml") => Ok(toml::from_str::<Value>(&text)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}
