use crate::collision::AABB;
use crate::math::Vector2D;

use super::line_segment::LineSegment;

/// A crossing between two polygon boundaries, in parametric coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Boundary coordinate on the polygon that was queried.
    pub alpha: f64,
    /// Boundary coordinate on the other polygon.
    pub beta: f64,
}

/// A closed polygon in world coordinates.
///
/// The boundary is implicitly closed: edge `i` runs from vertex `i` to vertex
/// `i + 1`, and the last edge returns to vertex 0. A repeated first vertex is
/// tolerated and simply produces a zero-length edge.
///
/// Points on the boundary are addressed by `alpha` in `[0, n)`: the integer
/// part selects the edge, the fractional part the position along it.
///
/// Winding: vertices are expected counter-clockwise with the y axis pointing
/// up. `normal_at` then points outward. (On a y-down screen the same
/// vertices appear clockwise.) Self-intersecting polygons are allowed; their
/// normals are whatever the local edge direction gives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<Vector2D>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vector2D>) -> Self {
        Polygon { vertices }
    }

    /// Axis-aligned rectangle centred on `center`, wound counter-clockwise.
    pub fn rectangle(center: Vector2D, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Polygon::new(vec![
            center + Vector2D::new(-hw, -hh),
            center + Vector2D::new(hw, -hh),
            center + Vector2D::new(hw, hh),
            center + Vector2D::new(-hw, hh),
        ])
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.vertices.push(Vector2D::new(x, y));
    }

    /// Number of edges, which is also the upper bound of `alpha`.
    pub fn edge_count(&self) -> usize {
        if self.vertices.len() < 2 {
            0
        } else {
            self.vertices.len()
        }
    }

    /// Edge `index`, from vertex `index` to the next one (wrapping).
    pub fn edge(&self, index: usize) -> LineSegment {
        let n = self.vertices.len();
        LineSegment::new(self.vertices[index % n], self.vertices[(index + 1) % n])
    }

    pub fn translate(&mut self, delta: Vector2D) {
        if delta.is_zero() {
            return;
        }
        for v in self.vertices.iter_mut() {
            *v += delta;
        }
    }

    /// Rotates every vertex by `angle` radians around `center`.
    pub fn rotate(&mut self, angle: f64, center: Vector2D) {
        if angle == 0.0 {
            return;
        }
        for v in self.vertices.iter_mut() {
            *v = v.rotate_about(angle, center);
        }
    }

    /// Splits `alpha` into an edge index and a fraction along that edge.
    /// `alpha` wraps around, so `n` addresses the same point as `0`.
    fn locate(&self, alpha: f64) -> (usize, f64) {
        let n = self.edge_count() as f64;
        let wrapped = alpha.rem_euclid(n);
        let index = wrapped.floor();
        ((index as usize) % self.edge_count(), wrapped - index)
    }

    /// Point on the boundary at parametric coordinate `alpha`.
    /// Returns `None` for a polygon with fewer than two vertices.
    pub fn point_at(&self, alpha: f64) -> Option<Vector2D> {
        if self.edge_count() == 0 {
            return None;
        }
        let (index, frac) = self.locate(alpha);
        Some(self.edge(index).point_at(frac))
    }

    /// Unit outward normal of the edge containing `alpha`: the edge direction
    /// turned a quarter clockwise. Zero for a degenerate edge.
    pub fn normal_at(&self, alpha: f64) -> Option<Vector2D> {
        if self.edge_count() == 0 {
            return None;
        }
        let (index, _) = self.locate(alpha);
        let dir = self.edge(index).direction();
        Some(Vector2D::new(dir.y, -dir.x).normalize())
    }

    pub fn bounding_box(&self) -> Option<AABB> {
        AABB::from_points(&self.vertices)
    }

    /// Up to `max_count` boundary crossings with `other`, in the order they
    /// are met while sweeping this polygon's edges (and, for each of them,
    /// the other polygon's edges).
    pub fn intersections(&self, other: &Polygon, max_count: usize) -> Vec<Intersection> {
        let mut found = Vec::new();
        if max_count == 0 || self.edge_count() == 0 || other.edge_count() == 0 {
            return found;
        }

        // Cheap reject on disjoint extents
        if let (Some(mine), Some(theirs)) = (self.bounding_box(), other.bounding_box()) {
            if !mine.overlaps(&theirs) {
                return found;
            }
        }

        for i in 0..self.edge_count() {
            let edge = self.edge(i);
            for j in 0..other.edge_count() {
                if let Some(hit) = edge.intersect(&other.edge(j)) {
                    found.push(Intersection {
                        alpha: i as f64 + hit.t,
                        beta: j as f64 + hit.u,
                    });
                    if found.len() >= max_count {
                        return found;
                    }
                }
            }
        }
        found
    }

    /// Signed area (shoelace); positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Centroid for uniform density. Falls back to the vertex average for
    /// degenerate (zero-area) polygons.
    pub fn centroid(&self) -> Vector2D {
        let n = self.vertices.len();
        if n == 0 {
            return Vector2D::ZERO;
        }

        let mut centroid = Vector2D::ZERO;
        let mut signed_area_sum = 0.0;
        let origin = self.vertices[0];

        for i in 1..n.saturating_sub(1) {
            let v2 = self.vertices[i];
            let v3 = self.vertices[i + 1];
            let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_area;
        }

        if signed_area_sum.abs() < 1e-10 {
            let mut avg = Vector2D::ZERO;
            for v in &self.vertices {
                avg += *v;
            }
            avg / n as f64
        } else {
            centroid / signed_area_sum
        }
    }

    /// Moment of inertia about the centroid for the given areal density.
    pub fn moment_of_inertia(&self, density: f64) -> f64 {
        let n = self.vertices.len();
        if n < 3 || density <= 0.0 {
            return 0.0;
        }

        let mut about_origin = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            about_origin +=
                v1.cross(v2) * (v1.length_squared() + v1.dot(v2) + v2.length_squared());
        }
        let about_origin = (about_origin / 12.0).abs() * density;

        // Parallel axis theorem back to the centroid
        let mass = self.area() * density;
        (about_origin - mass * self.centroid().length_squared()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-9;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 0.0),
            Vector2D::new(1.0, 1.0),
            Vector2D::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_point_at_interpolates_edges() {
        let square = unit_square();
        let p = square.point_at(0.5).unwrap();
        assert!((p.x - 0.5).abs() < EPSILON && p.y.abs() < EPSILON);

        let p = square.point_at(2.25).unwrap();
        assert!((p.x - 0.75).abs() < EPSILON);
        assert!((p.y - 1.0).abs() < EPSILON);

        // alpha wraps: n addresses vertex 0
        let p = square.point_at(4.0).unwrap();
        assert!(p.x.abs() < EPSILON && p.y.abs() < EPSILON);
    }

    #[test]
    fn test_normal_points_outward_for_ccw() {
        let square = unit_square();
        assert!(square.is_counter_clockwise());

        let bottom = square.normal_at(0.5).unwrap();
        assert!(bottom.x.abs() < EPSILON && (bottom.y + 1.0).abs() < EPSILON);
        let right = square.normal_at(1.5).unwrap();
        assert!((right.x - 1.0).abs() < EPSILON && right.y.abs() < EPSILON);
        let top = square.normal_at(2.5).unwrap();
        assert!(top.x.abs() < EPSILON && (top.y - 1.0).abs() < EPSILON);
        let left = square.normal_at(3.5).unwrap();
        assert!((left.x + 1.0).abs() < EPSILON && left.y.abs() < EPSILON);
    }

    #[test]
    fn test_normal_points_inward_for_cw() {
        let mut verts = unit_square().vertices;
        verts.reverse();
        let square = Polygon::new(verts);
        assert!(!square.is_counter_clockwise());
        // Edge 0 now runs down the left side; its normal faces +x, into the square
        let n = square.normal_at(0.5).unwrap();
        assert!((n.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_empty_polygon_has_no_points() {
        let empty = Polygon::default();
        assert!(empty.point_at(0.0).is_none());
        assert!(empty.normal_at(0.0).is_none());
        assert!(empty.intersections(&unit_square(), 2).is_empty());
    }

    #[test]
    fn test_translate_and_rotate() {
        let mut square = unit_square();
        square.translate(Vector2D::new(2.0, 3.0));
        assert_eq!(square.vertices[0], Vector2D::new(2.0, 3.0));

        square.rotate(PI / 2.0, Vector2D::new(2.0, 3.0));
        let v1 = square.vertices[1];
        assert!((v1.x - 2.0).abs() < EPSILON);
        assert!((v1.y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_intersections_in_sweep_order() {
        let a = Polygon::rectangle(Vector2D::new(1.0, 1.0), 2.0, 2.0);
        let b = Polygon::rectangle(Vector2D::new(2.0, 1.0), 2.0, 1.0);

        let all = a.intersections(&b, 10);
        assert_eq!(all.len(), 2);
        // Both crossings lie on a's right edge (edge 1), bottom one first
        assert!((all[0].alpha - 1.25).abs() < EPSILON);
        assert!((all[1].alpha - 1.75).abs() < EPSILON);
        // ... and on b's bottom (edge 0) and top (edge 2) edges
        assert!((all[0].beta - 0.5).abs() < EPSILON);
        assert!((all[1].beta - 2.5).abs() < EPSILON);
    }

    #[test]
    fn test_intersections_respects_max_count() {
        let a = Polygon::rectangle(Vector2D::ZERO, 2.0, 2.0);
        let b = Polygon::rectangle(Vector2D::ZERO, 1.0, 3.0);
        assert_eq!(a.intersections(&b, 10).len(), 4);
        assert_eq!(a.intersections(&b, 2).len(), 2);
        assert_eq!(a.intersections(&b, 1).len(), 1);
        assert!(a.intersections(&b, 0).is_empty());
    }

    #[test]
    fn test_intersections_disjoint() {
        let a = Polygon::rectangle(Vector2D::ZERO, 1.0, 1.0);
        let b = Polygon::rectangle(Vector2D::new(10.0, 0.0), 1.0, 1.0);
        assert!(a.intersections(&b, 2).is_empty());
    }

    #[test]
    fn test_contained_polygon_has_no_crossings() {
        let outer = Polygon::rectangle(Vector2D::ZERO, 10.0, 10.0);
        let inner = Polygon::rectangle(Vector2D::ZERO, 1.0, 1.0);
        assert!(outer.intersections(&inner, 2).is_empty());
    }

    #[test]
    fn test_area_centroid_inertia() {
        let square = Polygon::rectangle(Vector2D::new(10.0, -5.0), 1.0, 1.0);
        assert!((square.area() - 1.0).abs() < EPSILON);
        let c = square.centroid();
        assert!((c.x - 10.0).abs() < EPSILON);
        assert!((c.y + 5.0).abs() < EPSILON);
        // Unit square, density 2: m (w^2 + h^2) / 12 = 2 * 2 / 12
        assert!((square.moment_of_inertia(2.0) - 1.0 / 3.0).abs() < EPSILON);
    }
}
