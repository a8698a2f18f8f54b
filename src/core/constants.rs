//! Engine-wide constants matching the pre-built sky assets.

/// Width in pixels of the equirectangular sky mosaic.
pub const MOSAIC_WIDTH: u32 = 8192;

/// Height in pixels of the equirectangular sky mosaic.
pub const MOSAIC_HEIGHT: u32 = 4096;

/// Default square tile size in pixels, for both XYZ and deep-zoom tiles.
pub const TILE_SIZE: u32 = 256;

/// Tile image format the pyramid producer writes by default.
pub const DEFAULT_TILE_FORMAT: &str = "jpg";

/// Pixels of overlap between neighbouring deep-zoom tiles.
pub const DEFAULT_TILE_OVERLAP: u32 = 1;

/// Deepest XYZ zoom level a tile coordinate may address.
pub const MAX_TILE_ZOOM: u8 = 18;

/// Suffix carried by secondary-component identifiers (e.g. `M51-02`).
pub const SECONDARY_COMPONENT_SUFFIX: &str = "-02";

/// Filter value that matches every catalog entry.
pub const FILTER_ALL: &str = "all";

/// XML namespace of deep-zoom descriptors.
pub const DEEP_ZOOM_NAMESPACE: &str = "http://schemas.microsoft.com/deepzoom/2008";

/// Suffix of the tile folder that sits next to a `.dzi` descriptor.
pub const DEEP_ZOOM_FILES_SUFFIX: &str = "_files";

/// Marker radius of a full-opacity object at magnitude 2, before clamping.
pub const MARKER_RADIUS: f64 = 10.0;

/// Smallest full-opacity marker radius.
pub const MARKER_RADIUS_MIN: f64 = 3.0;

/// Largest full-opacity marker radius.
pub const MARKER_RADIUS_MAX: f64 = 16.0;

/// Magnitude assumed for objects whose brightness is unknown.
pub const DEFAULT_MAGNITUDE: f64 = 8.0;

/// Marker radius for entries dimmed by the active filter.
pub const MARKER_RADIUS_DIMMED: f64 = 3.0;

/// Marker opacity for entries dimmed by the active filter.
pub const MARKER_OPACITY_DIMMED: f32 = 0.15;
