//! Clickable regions of the sky mosaic
//!
//! The mosaic producer records, for every object it pasted, a center pixel and
//! a bounding box. Those are pixel-space facts about one specific mosaic; the
//! resolver turns them into planar map coordinates so an overlay marker can be
//! placed where the object appears. Hotspot files and the catalog are authored
//! independently, so a region may name an object the catalog does not have.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, CatalogEntry},
    core::{
        bounds::Bounds,
        config::MosaicDimensions,
        geo::{LatLng, LatLngBounds, Point},
    },
    projection::{self, Equirectangular},
    traits::SkyProjection,
    AtlasError, Result,
};

/// One region of the mosaic, as written by the mosaic producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotRegion {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `[x0, y0, x1, y1]` as fractions of the mosaic size
    pub bbox_norm: [f64; 4],
    /// Anchor pixel; the producer writes integers
    pub center_px: [f64; 2],
    /// Pixel box, when the producer wrote one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox_px: Option<[f64; 4]>,
}

impl HotspotRegion {
    pub fn new(id: impl Into<String>, bbox_norm: [f64; 4], center_px: [f64; 2]) -> Self {
        Self {
            id: id.into(),
            name: None,
            bbox_norm,
            center_px,
            bbox_px: None,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_px[0], self.center_px[1])
    }

    /// Pixel box, from `bbox_px` or else `bbox_norm` scaled to the mosaic
    pub fn pixel_bounds(&self, mosaic: MosaicDimensions) -> Bounds {
        match self.bbox_px {
            Some(px) => Bounds::from_box(px),
            None => {
                Bounds::from_box(self.bbox_norm).scaled(mosaic.width_f64(), mosaic.height_f64())
            }
        }
    }
}

/// Planar `south/north/west/east` box, the overlay layer's rectangle format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl From<&LatLngBounds> for PlanarBox {
    fn from(bounds: &LatLngBounds) -> Self {
        Self {
            south: bounds.south(),
            north: bounds.north(),
            west: bounds.west(),
            east: bounds.east(),
        }
    }
}

impl PlanarBox {
    pub fn to_bounds(&self) -> LatLngBounds {
        LatLngBounds::from_coords(self.south, self.west, self.north, self.east)
    }
}

/// A region placed on the planar map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotAnchor {
    pub id: String,
    pub name: Option<String>,
    pub center: LatLng,
    pub bbox: PlanarBox,
}

/// Where a click on a hotspot leads
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HotspotDispatch<'a> {
    /// Open the detail view of this entry
    Open(&'a CatalogEntry),
    /// The region names an unknown object; the click does nothing
    Ignored,
}

/// `center_px` → sky → planar, with raw mosaic dimensions.
pub fn resolve_anchor(
    region: &HotspotRegion,
    mosaic_width: f64,
    mosaic_height: f64,
) -> Result<(f64, f64)> {
    let (ra, dec) = projection::pixel_to_celestial(
        region.center_px[0],
        region.center_px[1],
        mosaic_width,
        mosaic_height,
    )?;
    Ok(projection::celestial_to_planar(ra, dec))
}

/// Places hotspot regions of one mosaic on the planar map
#[derive(Debug, Clone)]
pub struct HotspotResolver<P: SkyProjection = Equirectangular> {
    mosaic: MosaicDimensions,
    projection: P,
}

impl HotspotResolver<Equirectangular> {
    pub fn new(mosaic: MosaicDimensions) -> Self {
        Self::with_projection(mosaic, Equirectangular)
    }
}

impl<P: SkyProjection> HotspotResolver<P> {
    pub fn with_projection(mosaic: MosaicDimensions, projection: P) -> Self {
        Self { mosaic, projection }
    }

    pub fn mosaic(&self) -> MosaicDimensions {
        self.mosaic
    }

    /// Planar position of the region's clickable anchor
    pub fn resolve_anchor(&self, region: &HotspotRegion) -> Result<LatLng> {
        self.projection.pixel_to_planar(region.center(), self.mosaic)
    }

    /// Planar box of the region, corners re-ordered after the y flip
    pub fn resolve_bounds(&self, region: &HotspotRegion) -> Result<LatLngBounds> {
        let px = region.pixel_bounds(self.mosaic);
        let a = self.projection.pixel_to_planar(px.min, self.mosaic)?;
        let b = self.projection.pixel_to_planar(px.max, self.mosaic)?;
        Ok(LatLngBounds::from_corners(a, b))
    }

    pub fn resolve(&self, region: &HotspotRegion) -> Result<HotspotAnchor> {
        let center = self.resolve_anchor(region)?;
        let bounds = self.resolve_bounds(region)?;
        Ok(HotspotAnchor {
            id: region.id.clone(),
            name: region.name.clone(),
            center,
            bbox: PlanarBox::from(&bounds),
        })
    }

    pub fn resolve_all(&self, regions: &[HotspotRegion]) -> Result<Vec<HotspotAnchor>> {
        regions.iter().map(|region| self.resolve(region)).collect()
    }
}

/// The catalog entry a region refers to; [`AtlasError::DataMismatch`] when unknown
pub fn target<'a>(region_id: &str, catalog: &'a Catalog) -> Result<&'a CatalogEntry> {
    catalog
        .get(region_id)
        .ok_or_else(|| AtlasError::DataMismatch(region_id.to_string()))
}

/// Click handling: a dangling region id is swallowed, not reported
pub fn dispatch<'a>(region_id: &str, catalog: &'a Catalog) -> HotspotDispatch<'a> {
    match target(region_id, catalog) {
        Ok(entry) => HotspotDispatch::Open(entry),
        Err(err) => {
            log::debug!("ignoring hotspot click: {}", err);
            HotspotDispatch::Ignored
        }
    }
}
