//! Tile addressing for the pre-built pyramids.
//!
//! Nothing here generates imagery: these are the naming conventions the
//! static tile tree must follow, expressed as string templates.

pub mod deepzoom;
pub mod source;

// Re-exports for convenience
pub use deepzoom::DeepZoomSource;
pub use source::{TileSource, XyzTileSource};

use crate::core::geo::TileCoord;

/// Joins a base directory and a relative path with exactly one `/`.
pub fn join_path(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    if base.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", base, relative)
    }
}

/// Zoom level at which one tile row spans the full mosaic width:
/// `ceil(log2(max(1, width / tile_size)))`.
pub fn max_zoom_for_width(width: u32, tile_size: u32) -> u8 {
    let ratio = (width as f64 / tile_size.max(1) as f64).max(1.0);
    ratio.log2().ceil() as u8
}

/// Every tile of the `2^z × 2^z` grid at zoom `z`, column-major like the tile tree
pub fn tiles_at_zoom(z: u8) -> impl Iterator<Item = TileCoord> {
    let n = TileCoord::tiles_per_axis(z);
    (0..n).flat_map(move |x| (0..n).map(move |y| TileCoord::new(x, y, z)))
}
