use crate::common::Force;
use crate::math::Vector2D;
use crate::objects::{ObjectState, SimulatorObject};
use crate::states::{Dynamics, Omnidrive};
use crate::world::SimulatorState;

use super::Component;

/// Drives objects carrying an [`Omnidrive`] towards their target velocity.
///
/// With [`Dynamics`], the drive becomes a force and torque for the next
/// tick. They are sized from the velocity the body will reach once the
/// loads already pending in `current` are integrated, so the drive does not
/// overshoot by one tick. Without dynamics the object is moved kinematically
/// at the target velocity.
#[derive(Debug, Clone)]
pub struct OmnidriveComponent {
    force_gain: f64,
}

impl OmnidriveComponent {
    /// `force_gain` is the fraction of the velocity error corrected per tick.
    pub fn new(force_gain: f64) -> Self {
        OmnidriveComponent { force_gain }
    }
}

/// Velocities of `object` after this tick's pending loads, friction and
/// contacts aside.
fn settled_velocities(object: &SimulatorObject, dynamics: &Dynamics, dt: f64) -> (Vector2D, f64) {
    let velocity = dynamics.velocity() + dynamics.force_sum().vec * (dynamics.inverse_mass() * dt);
    let angular = dynamics.angular_velocity()
        + dynamics.net_torque(object.position()) * dynamics.inverse_moment() * dt;
    (velocity, angular)
}

impl Component for OmnidriveComponent {
    fn name(&self) -> &'static str {
        "omnidrive"
    }

    fn apply(&self, current: &SimulatorState, next: &mut SimulatorState, delta_ms: i32) {
        if delta_ms <= 0 {
            return;
        }
        let dt = f64::from(delta_ms) / 1000.0;

        for object in current.objects_with(Omnidrive::NAME) {
            let Some(drive) = object.state::<Omnidrive>() else {
                continue;
            };
            let Some(next_object) = next.corresponding_mut(object) else {
                continue;
            };
            if let Some(next_drive) = next_object.state_mut::<Omnidrive>() {
                *next_drive = drive.clone();
            }

            // Target expressed in world coordinates
            let target = drive.target_velocity().rotate(object.direction());
            let target_angular = drive.target_angular_velocity();

            match object.state::<Dynamics>() {
                Some(dynamics) if dynamics.is_fixed() => {}
                Some(dynamics) => {
                    let Some(next_dyn) = next_object.state_mut::<Dynamics>() else {
                        continue;
                    };
                    let (velocity, angular) = settled_velocities(object, dynamics, dt);
                    let gain = self.force_gain / dt;
                    let force = (target - velocity) * (gain * dynamics.mass());
                    let torque = (target_angular - angular) * gain * dynamics.moment_of_inertia();
                    next_dyn.add_force(Force::new(force));
                    next_dyn.add_torque(torque);
                }
                None => {
                    let pose = object.global_transform();
                    next_object.set_pose(
                        pose.position + target * dt,
                        pose.direction + target_angular * dt,
                    );
                }
            }
        }
    }
}
