use serde::{Deserialize, Serialize};

use crate::{core::geo::Point, pyramid::ObjectAssets};

/// Viewport state of the deep-zoom detail viewer.
///
/// Built on the first detail open and then reused: opening another object
/// replaces the source and resets the view in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepZoomViewer {
    /// Object currently shown
    pub object_id: Option<String>,
    /// Descriptor path, `None` while showing a placeholder image
    pub source: Option<String>,
    /// Image fallback shown when there is no pyramid
    pub still_image: Option<String>,
    /// View center in normalized image coordinates
    pub center: Point,
    /// Magnification relative to the whole image fitting the viewer
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// How many objects this viewer has been opened on
    pub opens: u32,
}

impl DeepZoomViewer {
    pub fn new() -> Self {
        Self {
            object_id: None,
            source: None,
            still_image: None,
            center: Point::new(0.5, 0.5),
            zoom: 1.0,
            min_zoom: 1.0,
            max_zoom: 64.0,
            opens: 0,
        }
    }

    /// Points the viewer at a new object and resets the view
    pub fn open(&mut self, object_id: &str, assets: &ObjectAssets) {
        self.object_id = Some(object_id.to_string());
        self.source = assets.dzi.clone();
        self.still_image = if assets.dzi.is_none() {
            Some(assets.thumbnail.clone())
        } else {
            None
        };
        self.opens += 1;
        self.go_home();
    }

    pub fn go_home(&mut self) {
        self.center = Point::new(0.5, 0.5);
        self.zoom = self.min_zoom;
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.clamp_center();
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Moves the center by a delta in normalized image units
    pub fn pan(&mut self, delta: Point) {
        self.center = self.center.add(&delta);
        self.clamp_center();
    }

    /// Keeps the visible window inside the image
    fn clamp_center(&mut self) {
        let half = 0.5 / self.zoom;
        self.center.x = self.center.x.clamp(half, 1.0 - half);
        self.center.y = self.center.y.clamp(half, 1.0 - half);
    }
}

impl Default for DeepZoomViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets(dzi: Option<&str>) -> ObjectAssets {
        ObjectAssets {
            thumbnail: "messier_dzi/M31.jpg".to_string(),
            dzi: dzi.map(str::to_string),
            placeholder: dzi.is_none(),
        }
    }

    #[test]
    fn test_open_resets_view() {
        let mut viewer = DeepZoomViewer::new();
        viewer.open("M31", &assets(Some("messier_dzi/M31.dzi")));
        viewer.zoom_by(4.0);
        viewer.pan(Point::new(0.25, 0.0));
        assert_eq!(viewer.zoom, 4.0);
        assert_eq!(viewer.center, Point::new(0.75, 0.5));

        viewer.open("M42", &assets(None));
        assert_eq!(viewer.zoom, 1.0);
        assert_eq!(viewer.center, Point::new(0.5, 0.5));
        assert_eq!(viewer.opens, 2);
        assert!(viewer.source.is_none());
        assert_eq!(viewer.still_image.as_deref(), Some("messier_dzi/M31.jpg"));
    }

    #[test]
    fn test_view_stays_inside_image() {
        let mut viewer = DeepZoomViewer::new();
        viewer.set_zoom(2.0);
        viewer.pan(Point::new(1.0, -1.0));
        assert_eq!(viewer.center, Point::new(0.75, 0.25));
        viewer.set_zoom(1000.0);
        assert_eq!(viewer.zoom, 64.0);
        viewer.set_zoom(0.1);
        assert_eq!(viewer.zoom, 1.0);
        assert_eq!(viewer.center, Point::new(0.5, 0.5));
    }
}
