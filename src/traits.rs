//! Shared trait abstractions
//!
//! The projection seam lives here so that hotspot resolution and marker
//! placement can be driven by any mapping between sky, planar and mosaic
//! coordinates, while the crate ships a single equirectangular one.

use crate::{
    core::{
        config::MosaicDimensions,
        geo::{LatLng, Point, SkyCoord},
    },
    Result,
};

/// Mapping between sky coordinates, the planar map and mosaic pixels
pub trait SkyProjection {
    /// Sky position to planar map coordinates
    fn celestial_to_planar(&self, sky: SkyCoord) -> LatLng;

    /// Planar map coordinates back to a sky position
    fn planar_to_celestial(&self, lat_lng: LatLng) -> SkyCoord;

    /// Mosaic pixel (top-left origin, y down) to a sky position
    fn pixel_to_celestial(&self, pixel: Point, mosaic: MosaicDimensions) -> Result<SkyCoord>;

    /// Sky position to its mosaic pixel
    fn celestial_to_pixel(&self, sky: SkyCoord, mosaic: MosaicDimensions) -> Result<Point>;

    /// Mosaic pixel straight to planar map coordinates
    fn pixel_to_planar(&self, pixel: Point, mosaic: MosaicDimensions) -> Result<LatLng> {
        let sky = self.pixel_to_celestial(pixel, mosaic)?;
        Ok(self.celestial_to_planar(sky))
    }
}
