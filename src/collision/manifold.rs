use crate::math::Vector2D;

/// Contact geometry between two polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Contact point in world coordinates.
    pub point: Vector2D,
    /// Unit normal, pointing away from the first object's polygon.
    pub normal: Vector2D,
    /// Boundary coordinate of the contact on the first polygon.
    pub alpha: f64,
    /// Boundary coordinate of the contact on the second polygon.
    pub beta: f64,
}

impl Collision {
    /// The same contact seen from the second object: reversed normal,
    /// swapped boundary coordinates.
    pub fn mirrored(&self) -> Collision {
        Collision {
            point: self.point,
            normal: self.normal.reverse(),
            alpha: self.beta,
            beta: self.alpha,
        }
    }
}
