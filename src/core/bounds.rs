use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Represents a bounding box in mosaic pixel or normalized image coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Creates new bounds from two points
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Creates bounds from an `[x0, y0, x1, y1]` box, normalizing corner order
    pub fn from_box(b: [f64; 4]) -> Self {
        Self::from_coords(b[0].min(b[2]), b[1].min(b[3]), b[0].max(b[2]), b[1].max(b[3]))
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Scales both axes independently, e.g. normalized box to pixel box
    pub fn scaled(&self, sx: f64, sy: f64) -> Bounds {
        Bounds::from_coords(
            self.min.x * sx,
            self.min.y * sy,
            self.max.x * sx,
            self.max.y * sy,
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_creation() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bounds.center(), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_bounds_from_box_reorders() {
        let bounds = Bounds::from_box([0.5, 0.75, 0.25, 0.5]);
        assert_eq!(bounds.min, Point::new(0.25, 0.5));
        assert_eq!(bounds.max, Point::new(0.5, 0.75));
    }

    #[test]
    fn test_bounds_scaled() {
        let bounds = Bounds::from_coords(0.25, 0.5, 0.5, 0.75).scaled(8192.0, 4096.0);
        assert_eq!(bounds.min, Point::new(2048.0, 2048.0));
        assert_eq!(bounds.max, Point::new(4096.0, 3072.0));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::from_coords(10.0, 20.0, 30.0, 40.0);
        assert!(bounds.contains(&Point::new(15.0, 25.0)));
        assert!(!bounds.contains(&Point::new(5.0, 25.0)));
    }
}
