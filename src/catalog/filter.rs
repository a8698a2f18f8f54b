//! Type-tag filtering shared by the marker layer and the object list.
//!
//! Both views are derived from one [`FilterOutcome`] per entry, so an object
//! is listed exactly when its marker is drawn at full opacity.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, CatalogEntry},
    core::constants::{
        DEFAULT_MAGNITUDE, FILTER_ALL, MARKER_OPACITY_DIMMED, MARKER_RADIUS, MARKER_RADIUS_DIMMED,
        MARKER_RADIUS_MAX, MARKER_RADIUS_MIN,
    },
};

/// True when `filter_value` is `"all"` or any type tag of `entry` contains it
/// (ASCII case-insensitive).
pub fn matches(entry: &CatalogEntry, filter_value: &str) -> bool {
    CatalogFilterMatcher::new(filter_value).matches(entry)
}

/// A filter value normalized once and applied to many entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilterMatcher {
    needle: Option<String>,
}

impl CatalogFilterMatcher {
    pub fn new(filter_value: &str) -> Self {
        let trimmed = filter_value.trim();
        let needle = if trimmed.eq_ignore_ascii_case(FILTER_ALL) {
            None
        } else {
            Some(trimmed.to_ascii_lowercase())
        };
        Self { needle }
    }

    pub fn all() -> Self {
        Self { needle: None }
    }

    pub fn is_all(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => entry
                .types
                .iter()
                .any(|tag| tag.to_ascii_lowercase().contains(needle.as_str())),
        }
    }

    /// Applies the filter to every entry, in catalog order
    pub fn apply(&self, catalog: &Catalog) -> Vec<FilterOutcome> {
        catalog
            .iter()
            .map(|entry| FilterOutcome::new(entry, self.matches(entry)))
            .collect()
    }
}

impl Default for CatalogFilterMatcher {
    fn default() -> Self {
        Self::all()
    }
}

/// Marker radius from apparent magnitude: brighter objects draw larger.
///
/// The scale `(10 - m) / 8` is clamped to `[0.12, 1.6]`, and the resulting
/// radius to `[MARKER_RADIUS_MIN, MARKER_RADIUS_MAX]`. Unknown magnitudes
/// count as 8.
pub fn radius_for_magnitude(magnitude: Option<f64>) -> f64 {
    let m = magnitude.filter(|m| m.is_finite()).unwrap_or(DEFAULT_MAGNITUDE);
    let scale = ((10.0 - m) / 8.0).clamp(0.12, 1.6);
    (MARKER_RADIUS * scale).clamp(MARKER_RADIUS_MIN, MARKER_RADIUS_MAX)
}

/// Visual state of a catalog marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub opacity: f32,
    pub radius: f64,
}

impl MarkerStyle {
    /// Full-opacity style sized by the object's magnitude
    pub fn full(magnitude: Option<f64>) -> Self {
        Self {
            opacity: 1.0,
            radius: radius_for_magnitude(magnitude),
        }
    }

    /// Style for an entry under a filter decision
    pub fn for_entry(entry: &CatalogEntry, shown: bool) -> Self {
        if shown {
            Self::full(entry.magnitude)
        } else {
            Self::dimmed()
        }
    }

    pub fn dimmed() -> Self {
        Self {
            opacity: MARKER_OPACITY_DIMMED,
            radius: MARKER_RADIUS_DIMMED,
        }
    }

    pub fn is_full_opacity(&self) -> bool {
        self.opacity >= 1.0
    }
}

/// What one filter value means for one entry in both views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub id: String,
    pub list_visible: bool,
    pub marker: MarkerStyle,
}

impl FilterOutcome {
    fn new(entry: &CatalogEntry, shown: bool) -> Self {
        Self {
            id: entry.id.clone(),
            list_visible: shown,
            marker: MarkerStyle::for_entry(entry, shown),
        }
    }
}
