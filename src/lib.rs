//! # skyatlas
//!
//! Projection and deep-zoom addressing engine for an interactive sky atlas.
//!
//! The crate turns a catalog of astronomical objects into everything a
//! tile-based map front end needs: planar marker positions for each object,
//! the deep-zoom pyramid assets behind its detail view, clickable anchors for
//! the regions of a pre-built equirectangular mosaic, and the filter
//! predicate that decides what is shown. Rendering is left to the caller.

pub mod atlas;
pub mod catalog;
pub mod core;
pub mod data;
pub mod hotspots;
pub mod prelude;
pub mod projection;
pub mod pyramid;
pub mod spatial;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{AtlasConfig, MosaicDimensions},
    geo::{LatLng, LatLngBounds, Point, SkyCoord, TileCoord},
};

pub use atlas::{AtlasState, DetailView, MarkerPlacement};

pub use catalog::{filter::CatalogFilterMatcher, Catalog, CatalogEntry};

pub use hotspots::{HotspotAnchor, HotspotDispatch, HotspotRegion, HotspotResolver};

pub use projection::Equirectangular;

pub use pyramid::{
    dzi::DziDescriptor, IdNormalization, PyramidIndex, PyramidManifestEntry, Resolution,
};

pub use spatial::index::HotspotIndex;

pub use tiles::{source::TileSource, DeepZoomSource, XyzTileSource};

pub use traits::SkyProjection;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// No pyramid assets exist for the identifier, even after normalization
    #[error("No pyramid assets for object '{0}'")]
    NotFound(String),

    /// Mosaic dimensions must be strictly positive and finite
    #[error("Invalid mosaic dimensions {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },

    /// A hotspot names an object the catalog does not know
    #[error("Hotspot references unknown object '{0}'")]
    DataMismatch(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = AtlasError;

/// Installs `env_logger` as the `log` backend; safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
