use std::f64::consts::{PI, TAU};

use super::vector2d::Vector2D;

/// Bounds a direction so that it falls within a single period, `[-PI, PI)`.
///
/// Values already in range are returned untouched, which makes the function
/// idempotent bit-for-bit.
pub fn bound_direction(dir: f64) -> f64 {
    if (-PI..PI).contains(&dir) || !dir.is_finite() {
        return dir;
    }

    let mut bounded = (dir + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU
    if bounded >= PI {
        bounded -= TAU;
    }
    if bounded < -PI {
        bounded = -PI;
    }
    bounded
}

/// A rigid frame: rotation by `direction` followed by translation to `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector2D,
    pub direction: f64,
}

impl Transform {
    pub fn new(position: Vector2D, direction: f64) -> Self {
        Self { position, direction }
    }

    /// The world frame (no translation, no rotation).
    pub fn identity() -> Self {
        Self::new(Vector2D::ZERO, 0.0)
    }

    /// Maps a point from this frame into the enclosing frame (rotation then translation).
    pub fn apply(self, point: Vector2D) -> Vector2D {
        point.rotate(self.direction) + self.position
    }

    /// Maps a point from the enclosing frame into this frame.
    pub fn apply_inverse(self, point: Vector2D) -> Vector2D {
        (point - self.position).rotate(-self.direction)
    }

    /// Composes a frame expressed in this frame's coordinates, giving the
    /// resulting frame in the enclosing coordinates.
    pub fn compose(self, local: Transform) -> Transform {
        Transform::new(
            self.apply(local.position),
            bound_direction(self.direction + local.direction),
        )
    }

    /// Inverse of `compose`: expresses `global` relative to this frame.
    pub fn relative(self, global: Transform) -> Transform {
        Transform::new(
            self.apply_inverse(global.position),
            bound_direction(global.direction - self.direction),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_bound_direction_in_range_untouched() {
        assert_eq!(bound_direction(0.0), 0.0);
        assert_eq!(bound_direction(-PI), -PI);
        assert_eq!(bound_direction(1.0), 1.0);
    }

    #[test]
    fn test_bound_direction_wraps() {
        assert!((bound_direction(PI) - (-PI)).abs() < EPSILON);
        assert!((bound_direction(PI + 0.1) - (-PI + 0.1)).abs() < EPSILON);
        assert!((bound_direction(-PI - 0.1) - (PI - 0.1)).abs() < EPSILON);
        assert!(bound_direction(2.0 * PI).abs() < EPSILON);
        assert!((bound_direction(7.0 * PI / 2.0) - (-PI / 2.0)).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_combined() {
        // Rotate (1,0) by 90 degrees to (0,1), then translate by (10,5)
        let t = Transform::new(Vector2D::new(10.0, 5.0), PI / 2.0);
        let p = t.apply(Vector2D::new(1.0, 0.0));
        assert!((p.x - 10.0).abs() < EPSILON);
        assert!((p.y - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_transform_apply_inverse_round_trip() {
        let t = Transform::new(Vector2D::new(10.0, 5.0), PI / 4.0);
        let local = Vector2D::new(1.0, 1.0);
        let back = t.apply_inverse(t.apply(local));
        assert!((back.x - local.x).abs() < EPSILON);
        assert!((back.y - local.y).abs() < EPSILON);
    }

    #[test]
    fn test_transform_compose_and_relative() {
        let parent = Transform::new(Vector2D::new(250.0, 250.0), PI / 2.0);
        let child_local = Transform::new(Vector2D::new(30.0, 0.0), 0.25);
        let child_global = parent.compose(child_local);

        // Child sits 30 units "ahead" of the parent, i.e. along +y after rotation
        assert!((child_global.position.x - 250.0).abs() < EPSILON);
        assert!((child_global.position.y - 280.0).abs() < EPSILON);
        assert!((child_global.direction - (PI / 2.0 + 0.25)).abs() < EPSILON);

        let recovered = parent.relative(child_global);
        assert!((recovered.position.x - 30.0).abs() < EPSILON);
        assert!(recovered.position.y.abs() < EPSILON);
        assert!((recovered.direction - 0.25).abs() < EPSILON);
    }

    proptest! {
        #[test]
        fn prop_bound_direction_in_range(dir in -1.0e6f64..1.0e6f64) {
            let bounded = bound_direction(dir);
            prop_assert!(bounded >= -PI);
            prop_assert!(bounded < PI);
        }

        #[test]
        fn prop_bound_direction_idempotent(dir in -1.0e6f64..1.0e6f64) {
            let once = bound_direction(dir);
            prop_assert_eq!(bound_direction(once), once);
        }

        #[test]
        fn prop_bound_direction_same_angle(dir in -100.0f64..100.0f64) {
            let bounded = bound_direction(dir);
            prop_assert!((bounded.sin() - dir.sin()).abs() < 1e-9);
            prop_assert!((bounded.cos() - dir.cos()).abs() < 1e-9);
        }
    }
}
