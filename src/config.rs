//! Kernel settings loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::parts::MaterialCatalog;
use crate::snapping::SnapConfig;

/// Settings shared by the drawing tools and the materials list. Missing
/// sections fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub snapping: SnapConfig,
    pub materials: MaterialCatalog,
}

impl KernelConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid JSON or
    /// does not match the configuration layout.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(ConfigError::from)
            .map_err(Into::into)
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(ConfigError::from)
            .map_err(Into::into)
    }

    #[must_use]
    pub fn with_snapping(mut self, snapping: SnapConfig) -> Self {
        self.snapping = snapping;
        self
    }

    #[must_use]
    pub fn with_materials(mut self, materials: MaterialCatalog) -> Self {
        self.materials = materials;
        self
    }
}
