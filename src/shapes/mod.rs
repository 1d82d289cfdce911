pub mod line_segment;
pub mod polygon;

pub use line_segment::{LineSegment, SegmentHit};
pub use polygon::{Intersection, Polygon};
