use crate::math::Vector2D;

/// A force vector with an optional point of application (world coordinates).
///
/// Summing forces discards the points, so a summed force has `point: None`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Force {
    pub vec: Vector2D,
    pub point: Option<Vector2D>,
}

impl Force {
    pub fn new(vec: Vector2D) -> Self {
        Force { vec, point: None }
    }

    pub fn at(vec: Vector2D, point: Vector2D) -> Self {
        Force {
            vec,
            point: Some(point),
        }
    }

    /// Torque this force produces about `center`. Point-less forces act
    /// through the centre and produce none.
    pub fn torque_about(&self, center: Vector2D) -> f64 {
        match self.point {
            Some(p) => (p - center).cross(self.vec),
            None => 0.0,
        }
    }
}
