use crate::math::Vector2D;

/// Denominator below which two segments are treated as parallel.
const PARALLEL_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vector2D,
    pub b: Vector2D,
}

/// Where two segments cross: the point, and its parameter along each segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub point: Vector2D,
    /// Parameter along `self`, in `[0, 1)`.
    pub t: f64,
    /// Parameter along `other`, in `[0, 1)`.
    pub u: f64,
}

impl LineSegment {
    pub fn new(a: Vector2D, b: Vector2D) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Direction vector of the segment (from a to b).
    pub fn direction(&self) -> Vector2D {
        self.b - self.a
    }

    /// Point at parameter `t` (0 at `a`, 1 at `b`).
    pub fn point_at(&self, t: f64) -> Vector2D {
        self.a + self.direction() * t
    }

    /// Crossing point of two segments.
    ///
    /// Parameters are half-open (`0 <= t < 1`) so that a crossing exactly on
    /// a shared polygon vertex is reported once, by the edge that starts there.
    /// Parallel and collinear segments never report a crossing.
    pub fn intersect(&self, other: &LineSegment) -> Option<SegmentHit> {
        let d1 = self.direction();
        let d2 = other.direction();
        let delta_start = other.a - self.a;

        let denominator = d1.cross(d2);
        if denominator.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = delta_start.cross(d2) / denominator;
        let u = delta_start.cross(d1) / denominator;

        if (0.0..1.0).contains(&t) && (0.0..1.0).contains(&u) {
            Some(SegmentHit {
                point: self.point_at(t),
                t,
                u,
            })
        } else {
            None
        }
    }
}
