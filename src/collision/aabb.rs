// Axis-aligned bounds used to skip edge tests between far-apart polygons

use crate::math::Vector2D;

/// An Axis-Aligned Bounding Box defined by its minimum and maximum corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vector2D,
    pub max: Vector2D,
}

impl AABB {
    /// Creates a new AABB, ordering the corners if needed.
    pub fn new(min: Vector2D, max: Vector2D) -> Self {
        AABB {
            min: Vector2D::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vector2D::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Checks if this AABB overlaps or touches another AABB.
    ///
    /// Touching counts: two polygons meeting at a single corner still have a
    /// boundary crossing to report.
    pub fn overlaps(&self, other: &AABB) -> bool {
        let x_overlap = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y_overlap = self.max.y >= other.min.y && self.min.y <= other.max.y;
        x_overlap && y_overlap
    }

    /// Smallest AABB containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Vector2D]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min_pt = *first;
        let mut max_pt = *first;
        for point in rest {
            min_pt.x = min_pt.x.min(point.x);
            min_pt.y = min_pt.y.min(point.y);
            max_pt.x = max_pt.x.max(point.x);
            max_pt.y = max_pt.y.max(point.y);
        }
        Some(AABB::new(min_pt, max_pt))
    }
}
