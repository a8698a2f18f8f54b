//! Configuration for the sky atlas engine
//!
//! Mosaic size, asset folders, tile template pieces and identifier fallbacks
//! live here and are passed explicitly into the projection and resolution code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    core::constants::{MOSAIC_HEIGHT, MOSAIC_WIDTH, TILE_SIZE},
    pyramid::IdNormalization,
    AtlasError, Result,
};

/// Pixel size of the equirectangular mosaic that hotspot coordinates refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicDimensions {
    pub width: u32,
    pub height: u32,
}

impl MosaicDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rejects a mosaic with a zero-sized axis
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AtlasError::InvalidDimension {
                width: self.width as f64,
                height: self.height as f64,
            });
        }
        Ok(())
    }

    pub fn width_f64(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f64(&self) -> f64 {
        self.height as f64
    }
}

impl Default for MosaicDimensions {
    fn default() -> Self {
        Self::new(MOSAIC_WIDTH, MOSAIC_HEIGHT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Mosaic pixel space used for every pixel/celestial inversion
    pub mosaic: MosaicDimensions,
    /// Directory holding thumbnails, `.dzi` descriptors and their `_files` folders
    pub asset_dir: String,
    /// Root of the XYZ mosaic tile tree
    pub tile_dir: String,
    pub tile_extension: String,
    pub tile_size: u32,
    /// Overrides the zoom depth derived from the mosaic width
    pub max_zoom: Option<u8>,
    /// Thumbnail shown when an object has no pyramid
    pub placeholder_thumbnail: String,
    /// Identifier fallbacks tried, in order, after an exact manifest miss
    pub normalizations: Vec<IdNormalization>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            mosaic: MosaicDimensions::default(),
            asset_dir: "messier_dzi".to_string(),
            tile_dir: "output/tiles".to_string(),
            tile_extension: "png".to_string(),
            tile_size: TILE_SIZE,
            max_zoom: None,
            placeholder_thumbnail: "placeholder.jpg".to_string(),
            normalizations: IdNormalization::default_chain(),
        }
    }
}

impl AtlasConfig {
    /// Parses a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AtlasConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.mosaic.validate()?;
        if self.tile_size == 0 {
            return Err(AtlasError::Config("tile_size must be positive".to_string()));
        }
        if self.tile_extension.is_empty() {
            return Err(AtlasError::Config("tile_extension must not be empty".to_string()));
        }
        Ok(())
    }

    /// Deepest XYZ zoom level for the mosaic: explicit override, else
    /// `ceil(log2(width / tile_size))` so the last level is about one pixel per pixel.
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom.unwrap_or_else(|| {
            crate::tiles::max_zoom_for_width(self.mosaic.width, self.tile_size)
        })
    }
}
