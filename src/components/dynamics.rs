use crate::collision::{collides, Collision};
use crate::integration::integrate;
use crate::math::Vector2D;
use crate::objects::{ObjectState, SimulatorObject};
use crate::states::{Contact, Dynamics};
use crate::world::SimulatorState;

use super::Component;

/// Moves root objects that carry [`Dynamics`]: resolves collisions between
/// them, removes floor friction and integrates the forces accumulated in
/// `current`.
///
/// Only contacts are reset in `next`. Forces other components add to `next`
/// during the same tick are left for the following one, whichever side of
/// this component they run on.
///
/// A body at rest stays put while the applied force is within its static
/// friction limit.
#[derive(Debug, Clone)]
pub struct DynamicsComponent {
    gravity: f64,
}

impl DynamicsComponent {
    pub fn new(gravity: f64) -> Self {
        DynamicsComponent { gravity }
    }

    /// Collision response between two roots. Velocity changes and contact
    /// records go into `next`.
    fn resolve(&self, a: &SimulatorObject, b: &SimulatorObject, next: &mut SimulatorState) {
        let (Some(dyn_a), Some(dyn_b)) = (a.state::<Dynamics>(), b.state::<Dynamics>()) else {
            return;
        };
        if dyn_a.is_fixed() && dyn_b.is_fixed() {
            return;
        }
        let Some(collision) = collides(a, b) else {
            return;
        };

        let impulse = impulse_magnitude(a, dyn_a, b, dyn_b, &collision);
        log::debug!(
            "collision between {} and {} at {:?}, impulse {:.4}",
            a.id(),
            b.id(),
            collision.point,
            impulse
        );

        let push = collision.normal * impulse;
        if let Some(next_dyn) = next.object_mut(a.id()).and_then(|o| o.state_mut::<Dynamics>()) {
            let r = collision.point - a.position();
            next_dyn.set_velocity(next_dyn.velocity() - push * dyn_a.inverse_mass());
            next_dyn.set_angular_velocity(
                next_dyn.angular_velocity() - r.cross(push) * dyn_a.inverse_moment(),
            );
            next_dyn.add_contact(Contact {
                collision,
                other: b.id(),
                impulse,
            });
        }
        if let Some(next_dyn) = next.object_mut(b.id()).and_then(|o| o.state_mut::<Dynamics>()) {
            let r = collision.point - b.position();
            next_dyn.set_velocity(next_dyn.velocity() + push * dyn_b.inverse_mass());
            next_dyn.set_angular_velocity(
                next_dyn.angular_velocity() + r.cross(push) * dyn_b.inverse_moment(),
            );
            next_dyn.add_contact(Contact {
                collision: collision.mirrored(),
                other: a.id(),
                impulse,
            });
        }
    }
}

/// Scalar impulse along the contact normal (pointing from `a` to `b`), using
/// the combined restitution of both objects. Zero when the objects are
/// already separating.
fn impulse_magnitude(
    a: &SimulatorObject,
    dyn_a: &Dynamics,
    b: &SimulatorObject,
    dyn_b: &Dynamics,
    collision: &Collision,
) -> f64 {
    let normal = collision.normal;
    let r_a = collision.point - a.position();
    let r_b = collision.point - b.position();

    // Velocities at the contact point
    let v_a = dyn_a.velocity() + Vector2D::new(-r_a.y, r_a.x) * dyn_a.angular_velocity();
    let v_b = dyn_b.velocity() + Vector2D::new(-r_b.y, r_b.x) * dyn_b.angular_velocity();
    let relative_velocity_normal = (v_b - v_a).dot(normal);
    if relative_velocity_normal > 0.0 {
        return 0.0;
    }

    let e = dyn_a.combined_restitution(dyn_b);
    let ra_perp_dot_n = r_a.cross(normal);
    let rb_perp_dot_n = r_b.cross(normal);
    let effective_mass_normal = dyn_a.inverse_mass()
        + dyn_b.inverse_mass()
        + ra_perp_dot_n * ra_perp_dot_n * dyn_a.inverse_moment()
        + rb_perp_dot_n * rb_perp_dot_n * dyn_b.inverse_moment();
    if effective_mass_normal <= 0.0 || !effective_mass_normal.is_finite() {
        return 0.0;
    }

    -(1.0 + e) * relative_velocity_normal / effective_mass_normal
}

impl Component for DynamicsComponent {
    fn name(&self) -> &'static str {
        "dynamics"
    }

    fn apply(&self, current: &SimulatorState, next: &mut SimulatorState, delta_ms: i32) {
        if delta_ms <= 0 {
            return;
        }
        let dt = f64::from(delta_ms) / 1000.0;

        let bodies: Vec<&SimulatorObject> = current
            .objects()
            .iter()
            .filter(|o| o.has_state(Dynamics::NAME))
            .collect();

        // 1. Start the next tick from the current velocities
        for body in &bodies {
            let Some(dynamics) = body.state::<Dynamics>() else {
                continue;
            };
            let Some(next_dyn) = next.object_mut(body.id()).and_then(|o| o.state_mut::<Dynamics>())
            else {
                continue;
            };
            next_dyn.clear_contacts();
            next_dyn.set_velocity(dynamics.velocity());
            next_dyn.set_angular_velocity(dynamics.angular_velocity());
        }

        // 2. Collisions between every pair of bodies
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                self.resolve(a, b, next);
            }
        }

        // 3. Integrate the forces accumulated for this tick
        for body in &bodies {
            let Some(dynamics) = body.state::<Dynamics>() else {
                continue;
            };
            let center = body.position();
            let torque = dynamics.net_torque(center);
            let applied = dynamics.force_sum().vec;
            let net = if dynamics.velocity().is_zero()
                && applied.length() <= dynamics.static_friction_limit(self.gravity)
            {
                Vector2D::ZERO
            } else {
                dynamics.subtract_friction(applied, self.gravity)
            };

            let Some(next_body) = next.corresponding_mut(body) else {
                continue;
            };
            let Some(next_dyn) = next_body.state_mut::<Dynamics>() else {
                continue;
            };
            let step = integrate(next_dyn, net, torque, dt);
            next_body.set_pose(center + step.translation, body.direction() + step.rotation);
        }
    }
}
