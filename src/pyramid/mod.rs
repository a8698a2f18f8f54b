//! Catalog object → deep-zoom pyramid resolution
//!
//! The manifest maps object identifiers to a thumbnail and a `.dzi`
//! descriptor. Identifiers do not line up one to one with the catalog: a
//! secondary component such as `M51-02` shares the imaging of its primary
//! `M51`. Resolution therefore tries the exact identifier first and then each
//! [`IdNormalization`] in order, one exact retry per strategy.

pub mod dzi;

use serde::{Deserialize, Serialize};

use crate::{
    core::constants::{DEFAULT_TILE_FORMAT, SECONDARY_COMPONENT_SUFFIX},
    prelude::HashMap,
    tiles::join_path,
    AtlasError, Result,
};

/// One manifest record, as written by the pyramid producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidManifestEntry {
    pub id: String,
    /// Thumbnail path relative to the asset directory; older manifests omit it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Deep-zoom descriptor path relative to the asset directory
    pub dzi: String,
}

impl PyramidManifestEntry {
    pub fn new(
        id: impl Into<String>,
        thumbnail: impl Into<String>,
        dzi: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            thumbnail: Some(thumbnail.into()),
            dzi: dzi.into(),
        }
    }

    /// Record without a thumbnail of its own
    pub fn pyramid_only(id: impl Into<String>, dzi: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thumbnail: None,
            dzi: dzi.into(),
        }
    }

    /// Thumbnail path relative to the asset directory. Without an explicit
    /// thumbnail this is the single tile of the pyramid's lowest level.
    pub fn thumbnail_path(&self) -> String {
        match &self.thumbnail {
            Some(thumbnail) => thumbnail.clone(),
            None => dzi::lowest_level_tile(&self.dzi, DEFAULT_TILE_FORMAT),
        }
    }
}

/// A rewrite of an identifier tried after an exact manifest miss.
///
/// The ordered list of strategies is part of the lookup contract: each one is
/// applied to the original identifier (not chained) and retried once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum IdNormalization {
    /// Remove the first occurrence of a literal substring
    StripSubstring(String),
    /// ASCII-uppercase the identifier
    Uppercase,
}

impl IdNormalization {
    /// The production chain: strip the secondary-component suffix `-02`
    pub fn default_chain() -> Vec<IdNormalization> {
        vec![IdNormalization::StripSubstring(
            SECONDARY_COMPONENT_SUFFIX.to_string(),
        )]
    }

    /// Rewritten identifier, or `None` when the strategy does not change it
    pub fn apply(&self, id: &str) -> Option<String> {
        let rewritten = match self {
            IdNormalization::StripSubstring(pattern) => {
                if pattern.is_empty() {
                    return None;
                }
                id.replacen(pattern.as_str(), "", 1)
            }
            IdNormalization::Uppercase => id.to_ascii_uppercase(),
        };
        (rewritten != id).then_some(rewritten)
    }
}

/// Outcome of a manifest lookup; a miss is an ordinary value, not an error
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found {
        entry: &'a PyramidManifestEntry,
        /// Strategy that produced the match, `None` for an exact hit
        via: Option<&'a IdNormalization>,
    },
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    pub fn entry(&self) -> Option<&'a PyramidManifestEntry> {
        match self {
            Resolution::Found { entry, .. } => Some(entry),
            Resolution::NotFound => None,
        }
    }

    /// Converts a miss into [`AtlasError::NotFound`] for callers that cannot degrade
    pub fn into_result(self, id: &str) -> Result<&'a PyramidManifestEntry> {
        self.entry()
            .ok_or_else(|| AtlasError::NotFound(id.to_string()))
    }
}

/// Asset paths for a detail view, already joined to the asset directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectAssets {
    pub thumbnail: String,
    /// Missing when the object has no pyramid
    pub dzi: Option<String>,
    pub placeholder: bool,
}

/// Read-only manifest index
#[derive(Debug, Clone, Default)]
pub struct PyramidIndex {
    entries: Vec<PyramidManifestEntry>,
    by_id: HashMap<String, usize>,
    normalizations: Vec<IdNormalization>,
}

impl PyramidIndex {
    /// Index with the production normalization chain
    pub fn new(entries: Vec<PyramidManifestEntry>) -> Self {
        Self::with_normalizations(entries, IdNormalization::default_chain())
    }

    /// A repeated manifest id keeps its first record
    pub fn with_normalizations(
        entries: Vec<PyramidManifestEntry>,
        normalizations: Vec<IdNormalization>,
    ) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut by_id = HashMap::default();
        for entry in entries {
            if by_id.contains_key(&entry.id) {
                log::warn!("duplicate manifest id {}, keeping first record", entry.id);
                continue;
            }
            by_id.insert(entry.id.clone(), kept.len());
            kept.push(entry);
        }
        Self {
            entries: kept,
            by_id,
            normalizations,
        }
    }

    pub fn normalizations(&self) -> &[IdNormalization] {
        &self.normalizations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PyramidManifestEntry> {
        self.entries.iter()
    }

    fn exact(&self, id: &str) -> Option<&PyramidManifestEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn resolve(&self, object_id: &str) -> Resolution<'_> {
        if let Some(entry) = self.exact(object_id) {
            return Resolution::Found { entry, via: None };
        }

        for strategy in &self.normalizations {
            let Some(candidate) = strategy.apply(object_id) else {
                continue;
            };
            if let Some(entry) = self.exact(&candidate) {
                log::debug!(
                    "manifest miss for {}, resolved as {} via {:?}",
                    object_id,
                    candidate,
                    strategy
                );
                return Resolution::Found {
                    entry,
                    via: Some(strategy),
                };
            }
        }

        log::debug!("no pyramid for {}", object_id);
        Resolution::NotFound
    }

    /// Detail-view assets for an object, falling back to the placeholder thumbnail
    pub fn assets_for(&self, object_id: &str, asset_dir: &str, placeholder: &str) -> ObjectAssets {
        match self.resolve(object_id) {
            Resolution::Found { entry, .. } => ObjectAssets {
                thumbnail: join_path(asset_dir, &entry.thumbnail_path()),
                dzi: Some(join_path(asset_dir, &entry.dzi)),
                placeholder: false,
            },
            Resolution::NotFound => ObjectAssets {
                thumbnail: join_path(asset_dir, placeholder),
                dzi: None,
                placeholder: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(ids: &[&str]) -> PyramidIndex {
        PyramidIndex::new(
            ids.iter()
                .map(|id| {
                    PyramidManifestEntry::new(*id, format!("{id}.jpg"), format!("{id}.dzi"))
                })
                .collect(),
        )
    }

    #[test]
    fn test_exact_match() {
        let index = index(&["M31", "M51"]);
        match index.resolve("M31") {
            Resolution::Found { entry, via } => {
                assert_eq!(entry.dzi, "M31.dzi");
                assert!(via.is_none());
            }
            Resolution::NotFound => panic!("expected M31"),
        }
    }

    #[test]
    fn test_secondary_component_falls_back_to_primary() {
        let index = index(&["M51"]);
        let resolution = index.resolve("M51-02");
        assert_eq!(resolution.entry().unwrap().id, "M51");
        assert!(matches!(
            resolution,
            Resolution::Found { via: Some(IdNormalization::StripSubstring(_)), .. }
        ));
    }

    #[test]
    fn test_exact_secondary_wins_over_fallback() {
        let index = index(&["M51", "M51-02"]);
        assert_eq!(index.resolve("M51-02").entry().unwrap().id, "M51-02");
    }

    #[test]
    fn test_not_found_when_neither_present() {
        let index = index(&["M31"]);
        assert_eq!(index.resolve("M51-02"), Resolution::NotFound);
        assert_eq!(index.resolve("M51"), Resolution::NotFound);
        assert!(matches!(
            index.resolve("M51").into_result("M51"),
            Err(AtlasError::NotFound(id)) if id == "M51"
        ));
    }

    #[test]
    fn test_only_one_retry_per_strategy() {
        // "-02" is stripped once, so "M51-02-02" becomes "M51-02", which is absent
        let index = index(&["M51"]);
        assert_eq!(index.resolve("M51-02-02"), Resolution::NotFound);
    }

    #[test]
    fn test_custom_strategy_order() {
        let index = PyramidIndex::with_normalizations(
            vec![PyramidManifestEntry::new("M51", "M51.jpg", "M51.dzi")],
            vec![
                IdNormalization::Uppercase,
                IdNormalization::StripSubstring("-02".to_string()),
            ],
        );
        let resolution = index.resolve("m51");
        assert!(matches!(
            resolution,
            Resolution::Found { via: Some(IdNormalization::Uppercase), .. }
        ));
        // strategies are applied to the original id, never chained
        assert_eq!(index.resolve("m51-02"), Resolution::NotFound);
    }

    #[test]
    fn test_assets_for_placeholder() {
        let index = index(&["M51"]);
        let found = index.assets_for("M51-02", "messier_dzi/", "placeholder.jpg");
        assert_eq!(found.thumbnail, "messier_dzi/M51.jpg");
        assert_eq!(found.dzi.as_deref(), Some("messier_dzi/M51.dzi"));
        assert!(!found.placeholder);

        let missing = index.assets_for("M40", "messier_dzi", "placeholder.jpg");
        assert_eq!(missing.thumbnail, "messier_dzi/placeholder.jpg");
        assert!(missing.dzi.is_none());
        assert!(missing.placeholder);
    }

    #[test]
    fn test_thumbnail_falls_back_to_lowest_tile() {
        let index = PyramidIndex::new(vec![
            PyramidManifestEntry::pyramid_only("M1", "M1.dzi"),
            PyramidManifestEntry::new("M31", "M31.jpg", "M31.dzi"),
        ]);
        let derived = index.assets_for("M1", "messier_dzi", "placeholder.jpg");
        assert_eq!(derived.thumbnail, "messier_dzi/M1_files/0/0_0.jpg");
        assert_eq!(derived.dzi.as_deref(), Some("messier_dzi/M1.dzi"));
        assert!(!derived.placeholder);

        let explicit = index.assets_for("M31", "messier_dzi", "placeholder.jpg");
        assert_eq!(explicit.thumbnail, "messier_dzi/M31.jpg");
    }

    #[test]
    fn test_manifest_record_without_thumbnail() {
        let json = r#"[
            {"id": "M1", "dzi": "M1.dzi"},
            {"id": "M31", "thumbnail": "M31.jpg", "dzi": "M31.dzi"}
        ]"#;
        let entries: Vec<PyramidManifestEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], PyramidManifestEntry::pyramid_only("M1", "M1.dzi"));
        assert_eq!(entries[1].thumbnail.as_deref(), Some("M31.jpg"));
    }

    #[test]
    fn test_normalization_serde_shape() {
        let json = serde_json::to_string(&IdNormalization::default_chain()).unwrap();
        assert_eq!(json, r#"[{"strategy":"strip_substring","value":"-02"}]"#);
        let back: Vec<IdNormalization> =
            serde_json::from_str(r#"[{"strategy":"uppercase"}]"#).unwrap();
        assert_eq!(back, vec![IdNormalization::Uppercase]);
    }
}
