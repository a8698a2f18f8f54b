use std::path::Path;

use crate::{
    catalog::{self, CatalogEntry, CatalogRecord},
    hotspots::HotspotRegion,
    pyramid::PyramidManifestEntry,
    Result,
};

/// Parses a catalog file. Malformed JSON fails as a whole; records without
/// decimal coordinates are skipped.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>> {
    let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
    Ok(catalog::entries_from_records(records))
}

pub fn parse_manifest(json: &str) -> Result<Vec<PyramidManifestEntry>> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_hotspots(json: &str) -> Result<Vec<HotspotRegion>> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>> {
    let path = path.as_ref();
    let entries = parse_catalog(&std::fs::read_to_string(path)?)?;
    log::info!("loaded {} catalog entries from {}", entries.len(), path.display());
    Ok(entries)
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<PyramidManifestEntry>> {
    let path = path.as_ref();
    let entries = parse_manifest(&std::fs::read_to_string(path)?)?;
    log::info!("loaded {} manifest entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Reads the optional hotspot file; `None` when it is absent or unreadable
pub fn load_hotspots(path: impl AsRef<Path>) -> Option<Vec<HotspotRegion>> {
    let path = path.as_ref();
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("hotspots unavailable ({}): {}", path.display(), e);
            return None;
        }
    };
    hotspots_from_text(&text, path)
}

fn hotspots_from_text(text: &str, path: &Path) -> Option<Vec<HotspotRegion>> {
    match parse_hotspots(text) {
        Ok(regions) => {
            log::info!("loaded {} hotspots from {}", regions.len(), path.display());
            Some(regions)
        }
        Err(e) => {
            log::warn!("ignoring malformed hotspot file {}: {}", path.display(), e);
            None
        }
    }
}

/// Reads catalog and manifest concurrently; both must succeed
#[cfg(feature = "tokio-runtime")]
pub async fn read_core_async(
    catalog: impl AsRef<Path>,
    manifest: impl AsRef<Path>,
) -> Result<(Vec<CatalogEntry>, Vec<PyramidManifestEntry>)> {
    let (catalog_text, manifest_text) = tokio::try_join!(
        tokio::fs::read_to_string(catalog.as_ref()),
        tokio::fs::read_to_string(manifest.as_ref()),
    )?;
    let entries = parse_catalog(&catalog_text)?;
    let manifest_entries = parse_manifest(&manifest_text)?;
    log::info!(
        "loaded {} catalog entries and {} manifest entries",
        entries.len(),
        manifest_entries.len()
    );
    Ok((entries, manifest_entries))
}

#[cfg(feature = "tokio-runtime")]
pub async fn load_hotspots_async(path: impl AsRef<Path>) -> Option<Vec<HotspotRegion>> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(text) => hotspots_from_text(&text, path),
        Err(e) => {
            log::warn!("hotspots unavailable ({}): {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AtlasError;

    #[test]
    fn test_parse_manifest() {
        let json = r#"[{"id": "M51", "dzi": "M51.dzi", "thumbnail": "M51-02.jpg"}]"#;
        let entries = parse_manifest(json).unwrap();
        assert_eq!(entries[0], PyramidManifestEntry::new("M51", "M51-02.jpg", "M51.dzi"));
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        assert!(matches!(
            parse_catalog(r#"[{"id": "M1"}]"#),
            Err(AtlasError::Serialization(_))
        ));
        assert!(parse_catalog("not json").is_err());
    }

    #[test]
    fn test_records_without_coordinates_are_skipped() {
        let json = r#"[
            {"id": "M31", "type": "Galaxy", "ra_decimal": 10.68, "dec_decimal": 41.27},
            {"id": "M102", "type": "Galaxy", "ra_decimal": null, "dec_decimal": null},
            {"id": "M40", "type": "Double Star", "ra_decimal": 185.55}
        ]"#;
        let entries = parse_catalog(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "M31");
    }

    #[test]
    fn test_missing_required_file_is_an_error() {
        let missing = std::env::temp_dir().join("skyatlas-no-such-catalog.json");
        assert!(matches!(read_catalog(&missing), Err(AtlasError::Io(_))));
    }

    #[test]
    fn test_missing_hotspots_degrade_to_none() {
        let missing = std::env::temp_dir().join("skyatlas-no-such-hotspots.json");
        assert!(load_hotspots(&missing).is_none());
    }

    #[test]
    fn test_malformed_hotspots_degrade_to_none() {
        let path = std::env::temp_dir()
            .join(format!("skyatlas-bad-hotspots-{}.json", std::process::id()));
        std::fs::write(&path, "{ not a list").unwrap();
        assert!(load_hotspots(&path).is_none());
        let _ = std::fs::remove_file(&path);
    }
}
