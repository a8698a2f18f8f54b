pub mod index;

pub use index::{HotspotIndex, SpatialIndex, SpatialItem};
