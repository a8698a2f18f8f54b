//! Loading the atlas inputs
//!
//! Catalog and manifest are required: a missing or malformed file aborts
//! initialization. The hotspot file is optional: any failure is logged and
//! the hotspot overlay is simply unavailable. Nothing is retried.

pub mod loader;

pub use loader::{
    load_hotspots, parse_catalog, parse_hotspots, parse_manifest, read_catalog, read_manifest,
};

#[cfg(feature = "tokio-runtime")]
pub use loader::{load_hotspots_async, read_core_async};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the atlas inputs live on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasPaths {
    pub catalog: PathBuf,
    pub manifest: PathBuf,
    #[serde(default)]
    pub hotspots: Option<PathBuf>,
}

impl AtlasPaths {
    pub fn new(catalog: impl Into<PathBuf>, manifest: impl Into<PathBuf>) -> Self {
        Self {
            catalog: catalog.into(),
            manifest: manifest.into(),
            hotspots: None,
        }
    }

    pub fn with_hotspots(mut self, hotspots: impl Into<PathBuf>) -> Self {
        self.hotspots = Some(hotspots.into());
        self
    }
}

impl Default for AtlasPaths {
    fn default() -> Self {
        Self::new("messier_data.json", "messier_dzi/manifest.json")
            .with_hotspots("output/messier_skymap_8k_hotspots.json")
    }
}
