//! # Configuration
//!
//! Folio configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `FOLIO__TAB_VIEW_KEY`, `FOLIO__BASENAME`.
//! 2. **Data directory config**: `<data dir>/folio.toml`.
//! 3. **Global config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled defaults**: built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `tab_view_key` | `main` | Which persisted workbench this client drives |
//! | `basename` | `/` | Basename given to a workbench created from scratch |

use confique::Config;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "folio.toml";

/// Configuration for folio, stored in `folio.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FolioConfig {
    /// Key of the persisted workbench (one per window) to load.
    #[config(default = "main")]
    pub tab_view_key: String,

    /// Route prefix for new workbenches, e.g. "/workspace/abc".
    #[config(default = "/")]
    pub basename: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            tab_view_key: "main".to_string(),
            basename: "/".to_string(),
        }
    }
}

impl FolioConfig {
    /// Basename with exactly one leading slash and no trailing one.
    pub fn basename(&self) -> String {
        let trimmed = self.basename.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", trimmed)
        }
    }
}
