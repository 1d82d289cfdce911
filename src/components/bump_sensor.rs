use crate::objects::ObjectState;
use crate::states::{Bump, BumpSensor, Dynamics};
use crate::world::SimulatorState;

use super::Component;

/// Turns the contacts recorded on an object's dynamics into bump readings.
///
/// A sensor reads the dynamics of its own object, or of the root it hangs
/// from (contacts are recorded on roots).
#[derive(Debug, Clone, Default)]
pub struct BumpSensorComponent;

impl BumpSensorComponent {
    pub fn new() -> Self {
        BumpSensorComponent
    }
}

impl Component for BumpSensorComponent {
    fn name(&self) -> &'static str {
        "bump"
    }

    fn apply(&self, current: &SimulatorState, next: &mut SimulatorState, delta_ms: i32) {
        if delta_ms <= 0 {
            return;
        }

        for sensor in current.objects_with(BumpSensor::NAME) {
            let dynamics = sensor.state::<Dynamics>().or_else(|| {
                current
                    .root_of(sensor.id())
                    .and_then(|root| root.state::<Dynamics>())
            });
            let Some(next_sensor) = next
                .corresponding_mut(sensor)
                .and_then(|o| o.state_mut::<BumpSensor>())
            else {
                continue;
            };

            next_sensor.clear();
            let Some(dynamics) = dynamics else {
                continue;
            };
            for contact in dynamics.contacts() {
                next_sensor.add_bump(Bump {
                    point: contact.collision.point,
                    normal: contact.collision.normal,
                    magnitude: contact.impulse,
                });
            }
        }
    }
}
