use serde::{Deserialize, Serialize};

use crate::core::constants::MAX_TILE_ZOOM;

/// A position on the planar map, in the map widget's latitude/longitude axes.
///
/// On the sky map `lat` carries declination and `lng` carries right ascension
/// shifted by -180°, so the values are degrees but not geographic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// An equatorial sky position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoord {
    /// Right ascension, nominally in [0, 360)
    pub ra: f64,
    /// Declination, nominally in [-90, 90]
    pub dec: f64,
}

impl SkyCoord {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Wraps right ascension into [0, 360)
    pub fn wrap_ra(ra: f64) -> f64 {
        ra.rem_euclid(360.0)
    }
}

impl Default for SkyCoord {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in mosaic pixel or normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of planar map coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Creates the smallest bounds containing both corners, whatever their order
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self::from_coords(
            a.lat.min(b.lat),
            a.lng.min(b.lng),
            a.lat.max(b.lat),
            a.lng.max(b.lng),
        )
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// A tile of the equirectangular mosaic pyramid.
///
/// At zoom `z` the whole mosaic is cut into `2^z` columns and `2^z` rows, so a
/// tile spans `360 / 2^z` degrees of longitude and `180 / 2^z` of latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along each axis at zoom `z`
    pub fn tiles_per_axis(z: u8) -> u32 {
        1_u32 << z.min(31)
    }

    /// Finds the tile containing a planar coordinate at the given zoom level.
    ///
    /// Coordinates on or past the east/south edge land in the last column/row.
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let n = Self::tiles_per_axis(zoom);
        let nf = n as f64;

        let fx = ((lat_lng.lng + 180.0) / 360.0 * nf).floor();
        let fy = ((90.0 - lat_lng.lat) / 180.0 * nf).floor();

        let x = fx.clamp(0.0, nf - 1.0) as u32;
        let y = fy.clamp(0.0, nf - 1.0) as u32;

        Self::new(x, y, zoom)
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        if self.z > MAX_TILE_ZOOM {
            return false;
        }
        let max_coord = Self::tiles_per_axis(self.z);
        self.x < max_coord && self.y < max_coord
    }
}
