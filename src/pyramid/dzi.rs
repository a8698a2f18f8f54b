//! Deep-zoom (`.dzi`) descriptors and the pyramid layout they imply.
//!
//! A descriptor `NAME.dzi` sits next to a folder `NAME_files/` holding one
//! sub-folder per level, `0` being a single pixel-ish tile and the last level
//! the full-resolution image. Each level halves the one above it, rounding
//! up, and is cut into `tile_size` squares named `{col}_{row}.{format}`.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <Image TileSize="256" Overlap="1" Format="jpg" xmlns="http://schemas.microsoft.com/deepzoom/2008">
//!     <Size Width="4000" Height="3000"/>
//! </Image>
//! ```

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        bounds::Bounds,
        constants::{DEEP_ZOOM_FILES_SUFFIX, DEEP_ZOOM_NAMESPACE, DEFAULT_TILE_OVERLAP, TILE_SIZE},
    },
    AtlasError, Result,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "Image")]
pub struct DziDescriptor {
    #[serde(rename = "@TileSize")]
    pub tile_size: u32,
    #[serde(rename = "@Overlap", default)]
    pub overlap: u32,
    #[serde(rename = "@Format")]
    pub format: String,
    #[serde(rename = "@xmlns", default = "default_namespace")]
    pub xmlns: String,
    #[serde(rename = "Size")]
    pub size: DziSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DziSize {
    #[serde(rename = "@Width")]
    pub width: u64,
    #[serde(rename = "@Height")]
    pub height: u64,
}

fn default_namespace() -> String {
    DEEP_ZOOM_NAMESPACE.to_string()
}

impl DziDescriptor {
    /// Descriptor with the producer's defaults: 256px tiles, 1px overlap
    pub fn new(width: u64, height: u64, format: impl Into<String>) -> Self {
        Self {
            tile_size: TILE_SIZE,
            overlap: DEFAULT_TILE_OVERLAP,
            format: format.into(),
            xmlns: default_namespace(),
            size: DziSize { width, height },
        }
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        let descriptor: DziDescriptor = from_str(xml)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path.as_ref())?;
        Self::from_xml(&xml)
    }

    pub fn to_xml(&self) -> Result<String> {
        let body = to_string(self).map_err(|e| AtlasError::ParseError(e.to_string()))?;
        Ok(format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{}", body))
    }

    fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(AtlasError::ParseError("TileSize must be positive".to_string()));
        }
        if self.size.width == 0 || self.size.height == 0 {
            return Err(AtlasError::InvalidDimension {
                width: self.size.width as f64,
                height: self.size.height as f64,
            });
        }
        if self.format.is_empty() {
            return Err(AtlasError::ParseError("Format must not be empty".to_string()));
        }
        Ok(())
    }

    /// Index of the full-resolution level: `ceil(log2(max(width, height)))`
    pub fn max_level(&self) -> u32 {
        let largest = self.size.width.max(self.size.height);
        if largest <= 1 {
            0
        } else {
            u64::BITS - (largest - 1).leading_zeros()
        }
    }

    pub fn level_count(&self) -> u32 {
        self.max_level() + 1
    }

    /// Pixel size of a level, `None` past the last one
    pub fn level_dimensions(&self, level: u32) -> Option<(u64, u64)> {
        let max_level = self.max_level();
        if level > max_level {
            return None;
        }
        let scale = 1_u64 << (max_level - level);
        Some((
            self.size.width.div_ceil(scale),
            self.size.height.div_ceil(scale),
        ))
    }

    /// Tile columns and rows of a level
    pub fn tile_grid(&self, level: u32) -> Option<(u64, u64)> {
        let (w, h) = self.level_dimensions(level)?;
        let ts = self.tile_size as u64;
        Some((w.div_ceil(ts), h.div_ceil(ts)))
    }

    /// Pixel rectangle a tile covers within its level, overlap included
    pub fn tile_bounds(&self, level: u32, col: u64, row: u64) -> Option<Bounds> {
        let (w, h) = self.level_dimensions(level)?;
        let (cols, rows) = self.tile_grid(level)?;
        if col >= cols || row >= rows {
            return None;
        }
        let ts = self.tile_size as u64;
        let overlap = self.overlap as u64;
        let x = col * ts;
        let y = row * ts;
        let x0 = x.saturating_sub(overlap);
        let y0 = y.saturating_sub(overlap);
        let x1 = (x + ts + overlap).min(w);
        let y1 = (y + ts + overlap).min(h);
        Some(Bounds::from_coords(x0 as f64, y0 as f64, x1 as f64, y1 as f64))
    }

    /// Total number of tiles in the pyramid
    pub fn tile_count(&self) -> u64 {
        (0..self.level_count())
            .filter_map(|level| self.tile_grid(level))
            .map(|(cols, rows)| cols * rows)
            .sum()
    }

    /// Path of one tile, relative to wherever `descriptor_path` is relative to
    pub fn tile_path(
        &self,
        descriptor_path: &str,
        level: u32,
        col: u64,
        row: u64,
    ) -> Result<String> {
        let (cols, rows) = self.tile_grid(level).ok_or_else(|| {
            AtlasError::InvalidCoordinates(format!(
                "level {} beyond max level {}",
                level,
                self.max_level()
            ))
        })?;
        if col >= cols || row >= rows {
            return Err(AtlasError::InvalidCoordinates(format!(
                "tile {}_{} outside {}x{} grid at level {}",
                col, row, cols, rows, level
            )));
        }
        Ok(format!(
            "{}/{}/{}_{}.{}",
            files_dir(descriptor_path),
            level,
            col,
            row,
            self.format
        ))
    }
}

/// The one tile of level 0, `path/M31_files/0/0_0.{format}`
pub fn lowest_level_tile(descriptor_path: &str, format: &str) -> String {
    format!("{}/0/0_0.{}", files_dir(descriptor_path), format)
}

/// `path/M31.dzi` → `path/M31_files`
pub fn files_dir(descriptor_path: &str) -> String {
    let stem = descriptor_path
        .strip_suffix(".dzi")
        .unwrap_or(descriptor_path);
    format!("{}{}", stem, DEEP_ZOOM_FILES_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Image TileSize="256" Overlap="1" Format="jpg" xmlns="http://schemas.microsoft.com/deepzoom/2008">
    <Size Width="1000" Height="600"/>
</Image>"#;

    #[test]
    fn test_parse_descriptor() {
        let dzi = DziDescriptor::from_xml(SAMPLE).unwrap();
        assert_eq!(dzi.tile_size, 256);
        assert_eq!(dzi.overlap, 1);
        assert_eq!(dzi.format, "jpg");
        assert_eq!(dzi.size, DziSize { width: 1000, height: 600 });
    }

    #[test]
    fn test_level_math() {
        let dzi = DziDescriptor::from_xml(SAMPLE).unwrap();
        assert_eq!(dzi.max_level(), 10);
        assert_eq!(dzi.level_count(), 11);
        assert_eq!(dzi.level_dimensions(10), Some((1000, 600)));
        assert_eq!(dzi.level_dimensions(9), Some((500, 300)));
        assert_eq!(dzi.level_dimensions(1), Some((2, 2)));
        assert_eq!(dzi.level_dimensions(0), Some((1, 1)));
        assert_eq!(dzi.level_dimensions(11), None);
        assert_eq!(dzi.tile_grid(10), Some((4, 3)));
        assert_eq!(dzi.tile_grid(9), Some((2, 2)));
    }

    #[test]
    fn test_power_of_two_levels() {
        let dzi = DziDescriptor::new(1024, 512, "png");
        assert_eq!(dzi.max_level(), 10);
        assert_eq!(DziDescriptor::new(1, 1, "png").max_level(), 0);
        assert_eq!(DziDescriptor::new(1025, 3, "png").max_level(), 11);
    }

    #[test]
    fn test_tile_bounds_with_overlap() {
        let dzi = DziDescriptor::from_xml(SAMPLE).unwrap();
        assert_eq!(
            dzi.tile_bounds(10, 0, 0),
            Some(Bounds::from_coords(0.0, 0.0, 257.0, 257.0))
        );
        assert_eq!(
            dzi.tile_bounds(10, 3, 2),
            Some(Bounds::from_coords(767.0, 511.0, 1000.0, 600.0))
        );
        assert_eq!(dzi.tile_bounds(10, 4, 0), None);
    }

    #[test]
    fn test_tile_paths() {
        let dzi = DziDescriptor::from_xml(SAMPLE).unwrap();
        assert_eq!(
            dzi.tile_path("messier_dzi/M31.dzi", 10, 3, 2).unwrap(),
            "messier_dzi/M31_files/10/3_2.jpg"
        );
        assert!(matches!(
            dzi.tile_path("M31.dzi", 10, 4, 0),
            Err(AtlasError::InvalidCoordinates(_))
        ));
        assert!(dzi.tile_path("M31.dzi", 12, 0, 0).is_err());
        assert_eq!(files_dir("M51"), "M51_files");
        assert_eq!(
            lowest_level_tile("messier_dzi/M31.dzi", "jpg"),
            "messier_dzi/M31_files/0/0_0.jpg"
        );
    }

    #[test]
    fn test_tile_count() {
        // levels 0..=8 are one tile each, 9 is 2x2, 10 is 4x3
        let dzi = DziDescriptor::from_xml(SAMPLE).unwrap();
        assert_eq!(dzi.tile_count(), 9 + 4 + 12);
    }

    #[test]
    fn test_rejects_degenerate_descriptor() {
        let xml = r#"<Image TileSize="0" Overlap="1" Format="jpg">
            <Size Width="10" Height="10"/>
        </Image>"#;
        assert!(matches!(DziDescriptor::from_xml(xml), Err(AtlasError::ParseError(_))));
        let xml = r#"<Image TileSize="256" Overlap="1" Format="jpg">
            <Size Width="0" Height="10"/>
        </Image>"#;
        assert!(matches!(
            DziDescriptor::from_xml(xml),
            Err(AtlasError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_written_descriptor_reads_back() {
        let dzi = DziDescriptor::new(4000, 3000, "jpg");
        let xml = dzi.to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert_eq!(DziDescriptor::from_xml(&xml).unwrap(), dzi);
    }
}
