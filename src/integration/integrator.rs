use crate::math::Vector2D;
use crate::states::Dynamics;

/// Rigid motion produced by one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement {
    pub translation: Vector2D,
    pub rotation: f64,
}

/// Integrates the velocities of `body` forward by `dt` seconds using
/// semi-implicit Euler, and returns how far the body moves.
///
/// `force` and `torque` are the net loads for the step (friction already
/// removed). Friction may stop a body but never reverses it: a velocity
/// that would flip direction within the step is set to zero instead.
pub fn integrate(body: &mut Dynamics, force: Vector2D, torque: f64, dt: f64) -> Displacement {
    if dt <= 0.0 {
        return Displacement::default();
    }

    // --- Linear Motion --- //
    let old_velocity = body.velocity();
    let mut velocity = old_velocity + force * (body.inverse_mass() * dt);
    if velocity.dot(old_velocity) < 0.0 {
        velocity = Vector2D::ZERO;
    }
    let velocity = body.clamp_speed(velocity);
    body.set_velocity(velocity);

    // --- Angular Motion --- //
    let old_angular = body.angular_velocity();
    let mut angular = old_angular + torque * body.inverse_moment() * dt;
    if angular * old_angular < 0.0 {
        angular = 0.0;
    }
    if body.is_fixed() {
        angular = 0.0;
    }
    body.set_angular_velocity(angular);

    Displacement {
        translation: velocity * dt,
        rotation: angular * dt,
    }
}
