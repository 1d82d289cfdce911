//! Defines physical material properties.

/// Surface properties of an object affecting collisions and sliding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Friction coefficient used while the object is at rest.
    pub static_friction: f64,
    /// Friction coefficient used while the object is moving.
    pub dynamic_friction: f64,
}

impl Material {
    /// Creates a new material, clamping each coefficient to its valid range.
    pub fn new(restitution: f64, static_friction: f64, dynamic_friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            static_friction: static_friction.max(0.0),
            dynamic_friction: dynamic_friction.max(0.0),
        }
    }

    /// Restitution used when two materials meet: the sum of both
    /// coefficients, clamped to [0, 1].
    pub fn combined_restitution(&self, other: &Material) -> f64 {
        (self.restitution + other.restitution).clamp(0.0, 1.0)
    }
}

impl Default for Material {
    /// Default material properties (moderate restitution, light friction).
    fn default() -> Self {
        Material {
            restitution: 0.2,
            static_friction: 0.2,
            dynamic_friction: 0.1,
        }
    }
}
