//! Prelude module for common skyatlas types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use skyatlas::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{AtlasConfig, MosaicDimensions},
    geo::{LatLng, LatLngBounds, Point, SkyCoord, TileCoord},
};

pub use crate::atlas::{AtlasState, DeepZoomViewer, DetailView, MarkerPlacement};

pub use crate::catalog::{
    filter::{CatalogFilterMatcher, FilterOutcome, MarkerStyle},
    Catalog, CatalogEntry,
};

pub use crate::data::AtlasPaths;

pub use crate::hotspots::{HotspotAnchor, HotspotDispatch, HotspotRegion, HotspotResolver};

pub use crate::projection::Equirectangular;

pub use crate::pyramid::{
    dzi::DziDescriptor, IdNormalization, ObjectAssets, PyramidIndex, PyramidManifestEntry,
    Resolution,
};

pub use crate::spatial::{HotspotIndex, SpatialIndex, SpatialItem};

pub use crate::tiles::{source::TileSource, DeepZoomSource, XyzTileSource};

pub use crate::traits::SkyProjection;

pub use crate::{AtlasError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
