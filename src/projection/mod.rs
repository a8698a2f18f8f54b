//! Equirectangular (plate carrée) sky projection
//!
//! Three coordinate systems meet here:
//!
//! * sky: right ascension in [0, 360), declination in [-90, 90]
//! * planar: the map widget's `(lat, lng)`, with `lat = dec` and `lng = ra - 180`
//! * mosaic: pixels of the pre-built sky image, origin top-left, y growing down
//!
//! The mapping is linear on both axes. Features near the poles are stretched
//! horizontally in the mosaic and nothing here corrects for that.

use crate::{
    core::{
        config::MosaicDimensions,
        geo::{LatLng, Point, SkyCoord},
    },
    traits::SkyProjection,
    AtlasError, Result,
};

/// `(ra, dec)` to planar `(lat, lng)`. No clamping: out-of-range declinations pass through.
pub fn celestial_to_planar(ra: f64, dec: f64) -> (f64, f64) {
    (dec, ra - 180.0)
}

/// Planar `(lat, lng)` back to `(ra, dec)`.
pub fn planar_to_celestial(lat: f64, lng: f64) -> (f64, f64) {
    (lng + 180.0, lat)
}

/// Mosaic pixel to `(ra, dec)`.
///
/// `(0, 0)` is RA 0 / Dec +90 and `(width, height)` is RA 360 / Dec -90.
pub fn pixel_to_celestial(px: f64, py: f64, width: f64, height: f64) -> Result<(f64, f64)> {
    check_dimensions(width, height)?;
    let ra = (px / width) * 360.0;
    let dec = 90.0 - (py / height) * 180.0;
    Ok((ra, dec))
}

/// `(ra, dec)` to its mosaic pixel. RA is wrapped into [0, 360) first.
pub fn celestial_to_pixel(ra: f64, dec: f64, width: f64, height: f64) -> Result<(f64, f64)> {
    check_dimensions(width, height)?;
    let x = SkyCoord::wrap_ra(ra) / 360.0 * width;
    let y = (90.0 - dec) / 180.0 * height;
    Ok((x, y))
}

fn check_dimensions(width: f64, height: f64) -> Result<()> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(AtlasError::InvalidDimension { width, height })
    }
}

/// The only projection the atlas uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Equirectangular;

impl SkyProjection for Equirectangular {
    fn celestial_to_planar(&self, sky: SkyCoord) -> LatLng {
        celestial_to_planar(sky.ra, sky.dec).into()
    }

    fn planar_to_celestial(&self, lat_lng: LatLng) -> SkyCoord {
        let (ra, dec) = planar_to_celestial(lat_lng.lat, lat_lng.lng);
        SkyCoord::new(ra, dec)
    }

    fn pixel_to_celestial(&self, pixel: Point, mosaic: MosaicDimensions) -> Result<SkyCoord> {
        let (ra, dec) =
            pixel_to_celestial(pixel.x, pixel.y, mosaic.width_f64(), mosaic.height_f64())?;
        Ok(SkyCoord::new(ra, dec))
    }

    fn celestial_to_pixel(&self, sky: SkyCoord, mosaic: MosaicDimensions) -> Result<Point> {
        let (x, y) =
            celestial_to_pixel(sky.ra, sky.dec, mosaic.width_f64(), mosaic.height_f64())?;
        Ok(Point::new(x, y))
    }
}
