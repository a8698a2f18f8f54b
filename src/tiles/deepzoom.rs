use crate::{
    core::geo::TileCoord,
    pyramid::dzi::{files_dir, DziDescriptor},
};

use super::source::TileSource;

/// Tile source over one object's deep-zoom pyramid.
///
/// `TileCoord::z` is the deep-zoom level and `x`/`y` are the column and row,
/// giving `{name}_files/{level}/{col}_{row}.{format}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepZoomSource {
    descriptor_path: String,
    descriptor: DziDescriptor,
}

impl DeepZoomSource {
    pub fn new(descriptor_path: impl Into<String>, descriptor: DziDescriptor) -> Self {
        Self {
            descriptor_path: descriptor_path.into(),
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &DziDescriptor {
        &self.descriptor
    }

    pub fn descriptor_path(&self) -> &str {
        &self.descriptor_path
    }

    /// Every tile of a level, row by row
    pub fn tiles_at_level(&self, level: u32) -> Vec<TileCoord> {
        let Some((cols, rows)) = self.descriptor.tile_grid(level) else {
            return Vec::new();
        };
        let mut tiles = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                tiles.push(TileCoord::new(col as u32, row as u32, level as u8));
            }
        }
        tiles
    }
}

impl TileSource for DeepZoomSource {
    fn url(&self, coord: TileCoord) -> String {
        format!(
            "{}/{}/{}_{}.{}",
            files_dir(&self.descriptor_path),
            coord.z,
            coord.x,
            coord.y,
            self.descriptor.format
        )
    }

    fn contains(&self, coord: TileCoord) -> bool {
        self.descriptor
            .tile_grid(coord.z as u32)
            .map(|(cols, rows)| (coord.x as u64) < cols && (coord.y as u64) < rows)
            .unwrap_or(false)
    }

    fn max_zoom(&self) -> u8 {
        self.descriptor.max_level().min(u8::MAX as u32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_zoom_urls_match_descriptor_paths() {
        let source =
            DeepZoomSource::new("messier_dzi/M42.dzi", DziDescriptor::new(1000, 600, "jpg"));
        let coord = TileCoord::new(3, 2, 10);
        assert_eq!(source.url(coord), "messier_dzi/M42_files/10/3_2.jpg");
        assert_eq!(
            source.url(coord),
            source.descriptor().tile_path("messier_dzi/M42.dzi", 10, 3, 2).unwrap()
        );
        assert!(source.contains(coord));
        assert!(!source.contains(TileCoord::new(4, 0, 10)));
        assert!(!source.contains(TileCoord::new(0, 0, 11)));
        assert_eq!(source.max_zoom(), 10);
    }

    #[test]
    fn test_tiles_at_level() {
        let source = DeepZoomSource::new("M42.dzi", DziDescriptor::new(1000, 600, "jpg"));
        let tiles = source.tiles_at_level(10);
        assert_eq!(tiles.len(), 12);
        assert_eq!(tiles[4], TileCoord::new(0, 1, 10));
        assert!(source.tiles_at_level(11).is_empty());
    }
}
