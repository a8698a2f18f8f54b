use crate::{
    core::{
        bounds::Bounds,
        geo::{LatLng, LatLngBounds, Point},
    },
    hotspots::HotspotAnchor,
};

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A spatial item that can be indexed via an R-tree
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub id: String,
    pub bounds: Bounds,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(id: String, bounds: Bounds, data: T) -> Self {
        Self { id, bounds, data }
    }

    /// Planar bounds are indexed as `x = lng`, `y = lat`
    pub fn from_lat_lng_bounds(id: String, bounds: &LatLngBounds, data: T) -> Self {
        let bounds =
            Bounds::from_coords(bounds.west(), bounds.south(), bounds.east(), bounds.north());
        Self::new(id, bounds, data)
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for SpatialItem<T> {}

// --- rstar integration -------------------------------------------------------------------------

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min.x, self.bounds.min.y],
            [self.bounds.max.x, self.bounds.max.y],
        )
    }
}

impl<T> PointDistance for SpatialItem<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let center = self.bounds.center();
        let dx = center.x - point[0];
        let dy = center.y - point[1];
        dx * dx + dy * dy
    }

    fn contains_point(&self, point: &[f64; 2]) -> bool {
        self.bounds.contains(&Point::new(point[0], point[1]))
    }
}

/// R-tree based spatial index
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn new() -> Self {
        Self { rtree: RTree::new() }
    }

    pub fn bulk_load(items: Vec<SpatialItem<T>>) -> Self {
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    pub fn query(&self, bounds: &Bounds) -> Vec<&SpatialItem<T>> {
        let envelope = AABB::from_corners(
            [bounds.min.x, bounds.min.y],
            [bounds.max.x, bounds.max.y],
        );
        self.rtree.locate_in_envelope_intersecting(&envelope).collect()
    }

    /// Items whose bounds contain the point
    pub fn query_point(&self, point: &Point) -> Vec<&SpatialItem<T>> {
        self.rtree.locate_all_at_point(&[point.x, point.y]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }
}

impl<T> Default for SpatialIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit-testing for placed hotspots. Iteration keeps the order they were loaded in.
#[derive(Default)]
pub struct HotspotIndex {
    anchors: Vec<HotspotAnchor>,
    index: SpatialIndex<usize>,
}

impl HotspotIndex {
    pub fn new(anchors: Vec<HotspotAnchor>) -> Self {
        let items = anchors
            .iter()
            .enumerate()
            .map(|(i, anchor)| {
                SpatialItem::from_lat_lng_bounds(anchor.id.clone(), &anchor.bbox.to_bounds(), i)
            })
            .collect();
        Self {
            anchors,
            index: SpatialIndex::bulk_load(items),
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HotspotAnchor> {
        self.anchors.iter()
    }

    /// Every hotspot whose box contains the point, closest center first
    pub fn hits(&self, at: LatLng) -> Vec<&HotspotAnchor> {
        let point = [at.lng, at.lat];
        let mut hits = self.index.query_point(&Point::new(point[0], point[1]));
        hits.sort_by(|a, b| {
            a.distance_2(&point)
                .total_cmp(&b.distance_2(&point))
                .then(a.data.cmp(&b.data))
        });
        hits.into_iter().map(|item| &self.anchors[item.data]).collect()
    }

    /// The hotspot under a click; overlapping boxes go to the one centered closest
    pub fn hit_test(&self, at: LatLng) -> Option<&HotspotAnchor> {
        self.hits(at).into_iter().next()
    }

    /// Hotspots whose box touches a planar viewport, in load order
    pub fn visible_in(&self, viewport: &LatLngBounds) -> Vec<&HotspotAnchor> {
        let bounds = Bounds::from_coords(
            viewport.west(),
            viewport.south(),
            viewport.east(),
            viewport.north(),
        );
        let mut found: Vec<usize> = self
            .index
            .query(&bounds)
            .into_iter()
            .map(|item| item.data)
            .collect();
        found.sort_unstable();
        found.into_iter().map(|i| &self.anchors[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotspots::PlanarBox;

    fn anchor(id: &str, south: f64, north: f64, west: f64, east: f64) -> HotspotAnchor {
        let bbox = PlanarBox { south, north, west, east };
        HotspotAnchor {
            id: id.to_string(),
            name: None,
            center: bbox.to_bounds().center(),
            bbox,
        }
    }

    #[test]
    fn test_hit_test() {
        let index = HotspotIndex::new(vec![
            anchor("M31", 40.0, 42.0, -170.0, -168.0),
            anchor("M42", -6.0, -4.0, -97.0, -95.0),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.hit_test(LatLng::new(41.0, -169.0)).unwrap().id, "M31");
        assert_eq!(index.hit_test(LatLng::new(-5.0, -96.0)).unwrap().id, "M42");
        assert!(index.hit_test(LatLng::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_overlap_prefers_closest_center() {
        let index = HotspotIndex::new(vec![
            anchor("M8", -26.0, -22.0, 90.0, 94.0),
            anchor("M20", -24.0, -20.0, 89.0, 93.0),
        ]);
        // both points fall inside both boxes
        assert_eq!(index.hit_test(LatLng::new(-22.5, 91.2)).unwrap().id, "M20");
        assert_eq!(index.hit_test(LatLng::new(-23.8, 92.0)).unwrap().id, "M8");
        let ids: Vec<_> = index
            .hits(LatLng::new(-22.5, 91.2))
            .into_iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["M20", "M8"]);
    }

    #[test]
    fn test_iteration_keeps_load_order() {
        let index = HotspotIndex::new(vec![
            anchor("M42", -6.0, -4.0, -97.0, -95.0),
            anchor("M31", 40.0, 42.0, -170.0, -168.0),
            anchor("M1", 21.0, 23.0, -97.0, -95.0),
        ]);
        let ids: Vec<_> = index.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["M42", "M31", "M1"]);
    }

    #[test]
    fn test_visible_in_viewport() {
        let index = HotspotIndex::new(vec![
            anchor("M31", 40.0, 42.0, -170.0, -168.0),
            anchor("M42", -6.0, -4.0, -97.0, -95.0),
        ]);
        let viewport = LatLngBounds::from_coords(-10.0, -100.0, 10.0, -90.0);
        let visible = index.visible_in(&viewport);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "M42");
    }
}
