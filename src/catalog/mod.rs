//! Catalog of sky objects
//!
//! Entries are created once from the catalog producer's JSON and never
//! mutated afterwards. The catalog keeps the source order for list display
//! and an id index for click and detail lookups.

pub mod filter;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    core::geo::{LatLng, SkyCoord},
    prelude::HashMap,
    projection, AtlasError, Result,
};

/// One catalog object, in the catalog producer's field layout.
///
/// Deserialization goes through [`CatalogRecord`] and fails for a record
/// without decimal coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogRecord")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    /// Type tags in display order, e.g. `["Spiral Galaxy"]`
    #[serde(rename = "type")]
    pub types: Vec<String>,
    /// Right ascension in decimal degrees
    #[serde(rename = "ra_decimal")]
    pub ra: f64,
    /// Declination in decimal degrees
    #[serde(rename = "dec_decimal")]
    pub dec: f64,
    pub magnitude: Option<f64>,
    pub constellation: String,
    /// Apparent angular size as printed, e.g. `"178' x 63'"`
    pub size: Option<String>,
    /// Sexagesimal RA, display only
    #[serde(rename = "ra")]
    pub ra_text: Option<String>,
    /// Sexagesimal Dec, display only
    #[serde(rename = "dec")]
    pub dec_text: Option<String>,
}

/// A catalog record as found in the file, coordinates possibly missing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_type_tags")]
    pub types: Vec<String>,
    #[serde(rename = "ra_decimal", default)]
    pub ra: Option<f64>,
    #[serde(rename = "dec_decimal", default)]
    pub dec: Option<f64>,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub constellation: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(rename = "ra", default)]
    pub ra_text: Option<String>,
    #[serde(rename = "dec", default)]
    pub dec_text: Option<String>,
}

impl TryFrom<CatalogRecord> for CatalogEntry {
    type Error = AtlasError;

    fn try_from(record: CatalogRecord) -> Result<Self> {
        let (Some(ra), Some(dec)) = (record.ra, record.dec) else {
            return Err(AtlasError::InvalidCoordinates(format!(
                "{} has no decimal RA/Dec",
                record.id
            )));
        };
        Ok(Self {
            id: record.id,
            name: record.name,
            types: record.types,
            ra,
            dec,
            magnitude: record.magnitude,
            constellation: record.constellation,
            size: record.size,
            ra_text: record.ra_text,
            dec_text: record.dec_text,
        })
    }
}

/// Keeps the records that can be placed on the map; the rest are logged and skipped
pub fn entries_from_records(records: Vec<CatalogRecord>) -> Vec<CatalogEntry> {
    records
        .into_iter()
        .filter_map(|record| match CatalogEntry::try_from(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping catalog record: {}", e);
                None
            }
        })
        .collect()
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, types: &[&str], ra: f64, dec: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            types: types.iter().map(|t| t.to_string()).collect(),
            ra,
            dec,
            magnitude: None,
            constellation: String::new(),
            size: None,
            ra_text: None,
            dec_text: None,
        }
    }

    pub fn sky_coord(&self) -> SkyCoord {
        SkyCoord::new(self.ra, self.dec)
    }

    /// Marker position on the planar map
    pub fn planar_position(&self) -> LatLng {
        projection::celestial_to_planar(self.ra, self.dec).into()
    }

    /// Tags joined for display, in source order
    pub fn type_label(&self) -> String {
        self.types.join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeTags {
    One(String),
    Many(Vec<String>),
}

/// Accepts `"Galaxy"`, `"Open Cluster / Nebula"` or `["Galaxy", "Seyfert"]`.
fn deserialize_type_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<TypeTags>::deserialize(deserializer)?;
    let tags = match raw {
        None => Vec::new(),
        Some(TypeTags::One(s)) => s
            .split(|c: char| c == ',' || c == '/')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        Some(TypeTags::Many(v)) => v
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    };
    Ok(tags)
}

/// Ordered, id-indexed, read-only collection of catalog entries
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog; a repeated id keeps its first occurrence
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut by_id = HashMap::default();
        for entry in entries {
            if by_id.contains_key(&entry.id) {
                log::warn!("duplicate catalog id {}, keeping first record", entry.id);
                continue;
            }
            by_id.insert(entry.id.clone(), kept.len());
            kept.push(entry);
        }
        Self {
            entries: kept,
            by_id,
        }
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every distinct type tag, in order of first appearance
    pub fn type_tags(&self) -> Vec<&str> {
        let mut seen = crate::prelude::HashSet::default();
        let mut tags = Vec::new();
        for tag in self.entries.iter().flat_map(|e| e.types.iter()) {
            if seen.insert(tag.as_str()) {
                tags.push(tag.as_str());
            }
        }
        tags
    }
}
