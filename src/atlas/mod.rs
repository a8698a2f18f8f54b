//! Application state for the sky atlas
//!
//! `AtlasState` is the single owner of everything loaded at startup and of the
//! little interactive state there is (active filter, hotspot overlay, detail
//! viewer). The map and list front ends read plain values from it.

pub mod viewer;

pub use viewer::DeepZoomViewer;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        filter::{CatalogFilterMatcher, FilterOutcome, MarkerStyle},
        Catalog, CatalogEntry,
    },
    core::{
        config::AtlasConfig,
        geo::{LatLng, LatLngBounds, TileCoord},
    },
    data::{self, AtlasPaths},
    hotspots::{self, HotspotAnchor, HotspotDispatch, HotspotRegion, HotspotResolver},
    pyramid::{
        dzi::DziDescriptor, ObjectAssets, PyramidIndex, PyramidManifestEntry, Resolution,
    },
    spatial::HotspotIndex,
    tiles::{join_path, DeepZoomSource, XyzTileSource},
    Result,
};

/// Where and how to draw one catalog marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPlacement {
    pub id: String,
    pub name: String,
    pub position: LatLng,
    pub style: MarkerStyle,
}

/// Everything the detail view shows for one object
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView<'a> {
    pub entry: &'a CatalogEntry,
    pub assets: ObjectAssets,
}

pub struct AtlasState {
    config: AtlasConfig,
    catalog: Catalog,
    pyramids: PyramidIndex,
    filter: CatalogFilterMatcher,
    hotspots: Option<HotspotIndex>,
    viewer: Option<DeepZoomViewer>,
}

impl AtlasState {
    /// Builds the state from already loaded records
    pub fn new(
        config: AtlasConfig,
        catalog: Vec<CatalogEntry>,
        manifest: Vec<PyramidManifestEntry>,
    ) -> Result<Self> {
        config.validate()?;
        let pyramids = PyramidIndex::with_normalizations(manifest, config.normalizations.clone());
        Ok(Self {
            catalog: Catalog::from_entries(catalog),
            pyramids,
            filter: CatalogFilterMatcher::all(),
            hotspots: None,
            viewer: None,
            config,
        })
    }

    /// Reads catalog and manifest; either failing aborts initialization.
    /// Hotspots are not read here, see [`AtlasState::load_hotspot_overlay`].
    pub fn load(config: AtlasConfig, paths: &AtlasPaths) -> Result<Self> {
        let catalog = data::read_catalog(&paths.catalog)?;
        let manifest = data::read_manifest(&paths.manifest)?;
        Self::new(config, catalog, manifest)
    }

    #[cfg(feature = "tokio-runtime")]
    pub async fn load_async(config: AtlasConfig, paths: &AtlasPaths) -> Result<Self> {
        let (catalog, manifest) = data::read_core_async(&paths.catalog, &paths.manifest).await?;
        Self::new(config, catalog, manifest)
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pyramids(&self) -> &PyramidIndex {
        &self.pyramids
    }

    // --- markers and filtering ------------------------------------------------------------------

    /// Marker for every catalog entry, styled by the active filter
    pub fn markers(&self) -> Vec<MarkerPlacement> {
        self.catalog
            .iter()
            .map(|entry| MarkerPlacement {
                id: entry.id.clone(),
                name: entry.name.clone(),
                position: entry.planar_position(),
                style: MarkerStyle::for_entry(entry, self.filter.matches(entry)),
            })
            .collect()
    }

    /// Switches the filter and returns the new state of both views
    pub fn set_filter(&mut self, filter_value: &str) -> Vec<FilterOutcome> {
        self.filter = CatalogFilterMatcher::new(filter_value);
        self.filter.apply(&self.catalog)
    }

    pub fn filter(&self) -> &CatalogFilterMatcher {
        &self.filter
    }

    /// Entries whose list row is shown, in catalog order
    pub fn listed(&self) -> Vec<&CatalogEntry> {
        self.catalog
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .collect()
    }

    // --- detail view ----------------------------------------------------------------------------

    /// `None` for an id the catalog does not have
    pub fn detail(&self, id: &str) -> Option<DetailView<'_>> {
        let entry = self.catalog.get(id)?;
        let assets = self.pyramids.assets_for(
            id,
            &self.config.asset_dir,
            &self.config.placeholder_thumbnail,
        );
        Some(DetailView { entry, assets })
    }

    pub fn resolve_pyramid(&self, id: &str) -> Resolution<'_> {
        self.pyramids.resolve(id)
    }

    /// Opens the detail viewer on an object, constructing it on first use
    pub fn open_detail(&mut self, id: &str) -> Option<&DeepZoomViewer> {
        let assets = self.detail(id)?.assets;
        let viewer = self.viewer.get_or_insert_with(|| {
            log::debug!("constructing deep-zoom viewer");
            DeepZoomViewer::new()
        });
        viewer.open(id, &assets);
        Some(&*viewer)
    }

    pub fn viewer(&self) -> Option<&DeepZoomViewer> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut DeepZoomViewer> {
        self.viewer.as_mut()
    }

    /// Reads the object's descriptor from the asset directory.
    /// `Ok(None)` when the object has no pyramid.
    pub fn deep_zoom_source(&self, id: &str) -> Result<Option<DeepZoomSource>> {
        let Some(entry) = self.pyramids.resolve(id).entry() else {
            return Ok(None);
        };
        let path = join_path(&self.config.asset_dir, &entry.dzi);
        let descriptor = DziDescriptor::from_path(&path)?;
        Ok(Some(DeepZoomSource::new(path, descriptor)))
    }

    pub fn mosaic_tiles(&self) -> XyzTileSource {
        XyzTileSource::from_config(&self.config)
    }

    /// Mosaic tile under an object's marker, e.g. to prefetch it before flying there
    pub fn marker_tile(&self, id: &str, zoom: u8) -> Option<TileCoord> {
        let entry = self.catalog.get(id)?;
        Some(self.mosaic_tiles().tile_at(&entry.planar_position(), zoom))
    }

    // --- hotspot overlay ------------------------------------------------------------------------

    /// Places hotspot regions on the map. Fails only on bad mosaic dimensions.
    pub fn enable_hotspots(&mut self, regions: &[HotspotRegion]) -> Result<usize> {
        let anchors = HotspotResolver::new(self.config.mosaic).resolve_all(regions)?;
        let dangling = anchors
            .iter()
            .filter(|a| !self.catalog.contains(&a.id))
            .count();
        if dangling > 0 {
            log::debug!("{} hotspots reference objects missing from the catalog", dangling);
        }
        let count = anchors.len();
        self.hotspots = Some(HotspotIndex::new(anchors));
        Ok(count)
    }

    /// Loads the optional hotspot file on request; `false` when the overlay is unavailable
    pub fn load_hotspot_overlay(&mut self, path: impl AsRef<std::path::Path>) -> bool {
        let Some(regions) = data::load_hotspots(path) else {
            return false;
        };
        match self.enable_hotspots(&regions) {
            Ok(_) => true,
            Err(e) => {
                log::error!("cannot place hotspots: {}", e);
                false
            }
        }
    }

    #[cfg(feature = "tokio-runtime")]
    pub async fn load_hotspot_overlay_async(
        &mut self,
        path: impl AsRef<std::path::Path>,
    ) -> bool {
        let Some(regions) = data::load_hotspots_async(path).await else {
            return false;
        };
        match self.enable_hotspots(&regions) {
            Ok(_) => true,
            Err(e) => {
                log::error!("cannot place hotspots: {}", e);
                false
            }
        }
    }

    pub fn hotspots_enabled(&self) -> bool {
        self.hotspots.is_some()
    }

    pub fn disable_hotspots(&mut self) {
        self.hotspots = None;
    }

    /// Placed hotspots in hotspot-file order, for the overlay layer
    pub fn hotspot_anchors(&self) -> Vec<&HotspotAnchor> {
        match &self.hotspots {
            Some(index) => index.iter().collect(),
            None => Vec::new(),
        }
    }

    /// Placed hotspots touching the visible part of the map
    pub fn hotspots_in(&self, viewport: &LatLngBounds) -> Vec<&HotspotAnchor> {
        match &self.hotspots {
            Some(index) => index.visible_in(viewport),
            None => Vec::new(),
        }
    }

    /// A click on hotspot `region_id`
    pub fn activate_hotspot(&self, region_id: &str) -> HotspotDispatch<'_> {
        hotspots::dispatch(region_id, &self.catalog)
    }

    /// A click at a map position while the overlay is shown. Among
    /// overlapping boxes the closest one naming a catalog object wins.
    pub fn click(&self, at: LatLng) -> HotspotDispatch<'_> {
        let Some(index) = &self.hotspots else {
            return HotspotDispatch::Ignored;
        };
        let hits = index.hits(at);
        let known = hits.iter().find(|anchor| self.catalog.contains(&anchor.id));
        match known.or(hits.first()) {
            Some(anchor) => self.activate_hotspot(&anchor.id),
            None => HotspotDispatch::Ignored,
        }
    }
}
