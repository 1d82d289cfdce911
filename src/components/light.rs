use crate::math::Vector2D;
use crate::objects::{ObjectId, ObjectState};
use crate::states::{LightSensor, LightSource};
use crate::world::SimulatorState;

use super::Component;

/// Sums the light every source in the world casts on each light sensor.
#[derive(Debug, Clone, Default)]
pub struct LightComponent;

impl LightComponent {
    pub fn new() -> Self {
        LightComponent
    }
}

impl Component for LightComponent {
    fn name(&self) -> &'static str {
        "light"
    }

    fn apply(&self, current: &SimulatorState, next: &mut SimulatorState, delta_ms: i32) {
        if delta_ms <= 0 {
            return;
        }

        let sources: Vec<(ObjectId, Vector2D, f64)> = current
            .objects_with(LightSource::NAME)
            .into_iter()
            .filter_map(|o| {
                o.state::<LightSource>()
                    .map(|s| (o.id(), o.position(), s.intensity))
            })
            .collect();

        for sensor in current.objects_with(LightSensor::NAME) {
            let position = sensor.position();
            let direction = sensor.direction();
            let value: f64 = sources
                .iter()
                .filter(|(id, _, _)| *id != sensor.id())
                .map(|&(_, at, intensity)| {
                    LightSensor::reading_from(position, direction, at, intensity)
                })
                .sum();

            if let Some(next_sensor) = next
                .corresponding_mut(sensor)
                .and_then(|o| o.state_mut::<LightSensor>())
            {
                next_sensor.set_value(value);
            }
        }
    }
}
