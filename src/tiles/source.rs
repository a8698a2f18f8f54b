use crate::core::{
    config::AtlasConfig,
    geo::{LatLng, TileCoord},
};

use super::join_path;

/// Trait representing anything that can produce tile paths for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a path or URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    /// Whether the pre-generated pyramid holds this tile
    fn contains(&self, coord: TileCoord) -> bool {
        coord.is_valid()
    }

    /// Deepest level the pyramid was generated to
    fn max_zoom(&self) -> u8;
}

/// The mosaic's XYZ tile tree: `{base_dir}/{z}/{x}/{y}.{ext}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzTileSource {
    base_dir: String,
    extension: String,
    max_zoom: u8,
}

impl XyzTileSource {
    pub fn new(base_dir: impl Into<String>, extension: impl Into<String>, max_zoom: u8) -> Self {
        Self {
            base_dir: base_dir.into(),
            extension: extension.into(),
            max_zoom,
        }
    }

    pub fn from_config(config: &AtlasConfig) -> Self {
        Self::new(
            config.tile_dir.clone(),
            config.tile_extension.clone(),
            config.max_zoom(),
        )
    }

    /// Leaflet-style template for the map widget, e.g. `output/tiles/{z}/{x}/{y}.png`
    pub fn template(&self) -> String {
        format!(
            "{}/{{z}}/{{x}}/{{y}}.{}",
            self.base_dir.trim_end_matches('/'),
            self.extension
        )
    }

    /// Tile holding a planar position, with `zoom` capped at the deepest generated level
    pub fn tile_at(&self, position: &LatLng, zoom: u8) -> TileCoord {
        TileCoord::from_lat_lng(position, zoom.min(self.max_zoom))
    }
}

impl TileSource for XyzTileSource {
    fn url(&self, coord: TileCoord) -> String {
        join_path(
            &self.base_dir,
            &format!("{}/{}/{}.{}", coord.z, coord.x, coord.y, self.extension),
        )
    }

    fn contains(&self, coord: TileCoord) -> bool {
        coord.z <= self.max_zoom && coord.is_valid()
    }

    fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xyz_url() {
        let source = XyzTileSource::new("output/tiles/", "png", 5);
        assert_eq!(source.url(TileCoord::new(3, 1, 2)), "output/tiles/2/3/1.png");
        assert_eq!(source.template(), "output/tiles/{z}/{x}/{y}.png");
    }

    #[test]
    fn test_xyz_contains() {
        let source = XyzTileSource::from_config(&AtlasConfig::default());
        assert_eq!(source.max_zoom(), 5);
        assert!(source.contains(TileCoord::new(31, 31, 5)));
        assert!(!source.contains(TileCoord::new(32, 0, 5)));
        assert!(!source.contains(TileCoord::new(0, 0, 6)));
    }

    #[test]
    fn test_tile_at_caps_zoom() {
        let source = XyzTileSource::new("output/tiles", "png", 5);
        let center = LatLng::new(0.0, 0.0);
        assert_eq!(source.tile_at(&center, 1), TileCoord::new(1, 1, 1));
        assert_eq!(source.tile_at(&center, 12), TileCoord::new(16, 16, 5));
        assert!(source.contains(source.tile_at(&LatLng::new(-90.0, 180.0), 9)));
    }
}
