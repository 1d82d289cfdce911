use crate::objects::ObjectState;
use crate::states::{Accelerometer, Dynamics};
use crate::world::SimulatorState;

use super::Component;

/// Estimates acceleration from the change in velocity between two ticks.
#[derive(Debug, Clone, Default)]
pub struct AccelerometerComponent;

impl AccelerometerComponent {
    pub fn new() -> Self {
        AccelerometerComponent
    }
}

impl Component for AccelerometerComponent {
    fn name(&self) -> &'static str {
        "accelerometer"
    }

    /// Writes `(velocity - previous sample) * 1000 / delta_ms` into the next
    /// reading and keeps the current velocity as the next sample. Sensors
    /// without [`Dynamics`] on the same object are skipped.
    fn apply(&self, current: &SimulatorState, next: &mut SimulatorState, delta_ms: i32) {
        if delta_ms <= 0 {
            return;
        }

        for sensor in current.objects_with(Accelerometer::NAME) {
            let (Some(reading), Some(dynamics)) =
                (sensor.state::<Accelerometer>(), sensor.state::<Dynamics>())
            else {
                continue;
            };
            let Some(next_reading) = next
                .corresponding_mut(sensor)
                .and_then(|o| o.state_mut::<Accelerometer>())
            else {
                continue;
            };

            let velocity = dynamics.velocity();
            let acceleration = (velocity - reading.velocity_sample()) * (1000.0 / f64::from(delta_ms));
            next_reading.set_value(acceleration);
            next_reading.set_velocity_sample(velocity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2D;
    use crate::objects::SimulatorObject;

    fn sensor_world(velocity: Vector2D) -> (SimulatorState, SimulatorState) {
        let mut dynamics = Dynamics::new(1.0, 1.0);
        dynamics.set_velocity(velocity);
        let robot = SimulatorObject::new("robot", 1)
            .with_state(dynamics)
            .unwrap()
            .with_state(Accelerometer::new(9.81))
            .unwrap();
        let mut current = SimulatorState::new();
        current.add_object(robot).unwrap();
        let next = current.clone();
        (current, next)
    }

    fn reading(state: &SimulatorState) -> &Accelerometer {
        state.object(1).unwrap().state::<Accelerometer>().unwrap()
    }

    #[test]
    fn test_acceleration_estimate() {
        let (current, mut next) = sensor_world(Vector2D::new(1.0, 0.0));
        AccelerometerComponent::new().apply(&current, &mut next, 1000);
        assert_eq!(reading(&next).value(), Vector2D::new(1.0, 0.0));
        assert_eq!(reading(&next).velocity_sample(), Vector2D::new(1.0, 0.0));
        assert_eq!(reading(&next).z_value(), 9.81);
    }

    #[test]
    fn test_short_tick_scales_up() {
        let (current, mut next) = sensor_world(Vector2D::new(0.5, -0.25));
        AccelerometerComponent::new().apply(&current, &mut next, 250);
        assert_eq!(reading(&next).value(), Vector2D::new(2.0, -1.0));
    }

    #[test]
    fn test_zero_delta_writes_nothing() {
        let (current, mut next) = sensor_world(Vector2D::new(1.0, 0.0));
        AccelerometerComponent::new().apply(&current, &mut next, 0);
        assert_eq!(reading(&next).value(), Vector2D::ZERO);
        assert_eq!(reading(&next).velocity_sample(), Vector2D::ZERO);
    }

    #[test]
    fn test_sensor_without_dynamics_is_skipped() {
        let mut current = SimulatorState::new();
        current
            .add_object(
                SimulatorObject::new("loose", 1)
                    .with_state(Accelerometer::new(9.81))
                    .unwrap(),
            )
            .unwrap();
        let mut next = current.clone();
        AccelerometerComponent::new().apply(&current, &mut next, 10);
        assert!(next.deep_equals(&current));
    }

    #[test]
    fn test_missing_next_object_is_skipped() {
        let (current, _) = sensor_world(Vector2D::new(1.0, 0.0));
        let mut next = SimulatorState::new();
        AccelerometerComponent::new().apply(&current, &mut next, 10);
        assert!(next.objects().is_empty());
    }
}
