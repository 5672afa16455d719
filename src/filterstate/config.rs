//! # Configuration
//!
//! A filter table is configured by a single JSON file, `config.json`, holding
//! engine settings and the filter definitions the [`Registry`](crate::registry::Registry)
//! is built from.
//!
//! ## Example
//!
//! ```json
//! {
//!   "select_null": "emit",
//!   "params_key": "filters",
//!   "filters": {
//!     "active":  { "kind": "boolean", "field": "active", "key": true },
//!     "price":   { "kind": "range", "field": "price", "type": "number", "default_min": 0 },
//!     "status":  { "kind": "select", "field": "status" },
//!     "tags":    { "kind": "multi_select", "field": "tags" },
//!     "search":  { "kind": "transformer", "transformer": "full_text" }
//!   }
//! }
//! ```
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `select_null` | `emit` | Whether an unselected single-select is encoded as `{"id": null}` (`emit`) or left out (`omit`) |
//! | `params_key` | `filters` | Sub-map of the request params that holds filter entries |
//! | `filters` | `{}` | Filter definitions keyed by filter key |

use crate::error::{FilterError, Result};
use crate::model::Filter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PARAMS_KEY: &str = "filters";

/// How the encoder treats a single-select with nothing selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectNullPolicy {
    /// Emit `{"id": null}`; what existing wire consumers expect.
    #[default]
    Emit,
    /// Leave the key out, like empty multi-selects and transformers.
    Omit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    #[serde(default)]
    pub select_null: SelectNullPolicy,

    #[serde(default = "default_params_key")]
    pub params_key: String,

    #[serde(default)]
    pub filters: BTreeMap<String, Filter>,
}

fn default_params_key() -> String {
    DEFAULT_PARAMS_KEY.to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            select_null: SelectNullPolicy::default(),
            params_key: default_params_key(),
            filters: BTreeMap::new(),
        }
    }
}

impl FilterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(config_path)
    }

    /// Load config from an explicit file path. A missing file is an error here.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(FilterError::Io)?;
        serde_json::from_str(&content).map_err(|e| {
            FilterError::Config(format!("{}: {}", path.display(), e))
        })
    }
}
