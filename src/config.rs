//! # Configuration
//!
//! Loaded from an optional JSON file; every field has a default so an empty
//! object (or no file at all) is a valid configuration.
//!
//! ```json
//! {
//!   "api_base_url": "http://backoffice.local:3000",
//!   "listen_addr": "0.0.0.0:8080",
//!   "canvas": { "fallback_width": 640, "fallback_height": 480 },
//!   "formats": { "i2of5": "ITF (TITO)" },
//!   "roles": [ { "role": "admin", "route": "/admin/dashboard", "priority": 1 } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::auth::{RoleEntry, RoleTable};
use crate::barcode::FormatNames;
use crate::canvas::{CanvasAccessor, FALLBACK_HEIGHT, FALLBACK_WIDTH};
use crate::error::PitbossError;

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root URL of the back-office REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Address the preview server listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Extra or replacement barcode format names, layered over the built-ins.
    #[serde(default)]
    pub formats: BTreeMap<String, String>,

    /// Role table. Replaces the built-in table when present.
    #[serde(default)]
    pub roles: Option<Vec<RoleEntry>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            listen_addr: default_listen_addr(),
            canvas: CanvasConfig::default(),
            formats: BTreeMap::new(),
            roles: None,
        }
    }
}

/// Surface sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u32,
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,
}

fn default_fallback_width() -> u32 {
    FALLBACK_WIDTH
}

fn default_fallback_height() -> u32 {
    FALLBACK_HEIGHT
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            fallback_width: FALLBACK_WIDTH,
            fallback_height: FALLBACK_HEIGHT,
        }
    }
}

impl AppConfig {
    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PitbossError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)
            .map_err(|e| PitbossError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PitbossError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, PitbossError> {
        serde_json::from_str(text).map_err(|e| PitbossError::Config(e.to_string()))
    }

    pub fn format_names(&self) -> FormatNames {
        FormatNames::with_overrides(self.formats.clone())
    }

    pub fn role_table(&self) -> RoleTable {
        match &self.roles {
            Some(entries) => RoleTable::new(entries.clone()),
            None => RoleTable::default(),
        }
    }

    pub fn canvas_accessor(&self) -> CanvasAccessor {
        CanvasAccessor::new(self.canvas.fallback_width, self.canvas.fallback_height)
    }
}
