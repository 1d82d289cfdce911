use bytes::{BufMut, Bytes, BytesMut};

use crate::config::DrawConfig;
use crate::draw::{Canvas, Color};
use crate::math::Vector2D;
use crate::objects::{ObjectState, SimulatorObject};

/// A point light emitting from its owner's position.
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
    pub intensity: f64,
}

impl LightSource {
    pub fn new(intensity: f64) -> Self {
        LightSource {
            intensity: intensity.max(0.0),
        }
    }
}

impl ObjectState for LightSource {
    const NAME: &'static str = "light_source";

    fn draw(&self, canvas: &mut dyn Canvas, owner: &SimulatorObject, _config: &DrawConfig) {
        canvas.draw_circle(owner.position(), 0.05, Color::YELLOW);
    }
}

/// A directional light sensor facing along its owner's direction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightSensor {
    value: f64,
}

impl LightSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Light received from one source: `intensity * max(0, cos phi) /
    /// max(d^2, 1)`, with `phi` between the sensor heading and the bearing
    /// to the source. A source exactly at the sensor counts as straight
    /// ahead.
    pub fn reading_from(
        sensor_position: Vector2D,
        sensor_direction: f64,
        source_position: Vector2D,
        intensity: f64,
    ) -> f64 {
        let bearing = source_position - sensor_position;
        let distance_squared = bearing.length_squared();
        let cos_phi = if distance_squared == 0.0 {
            1.0
        } else {
            Vector2D::from_angle(sensor_direction).dot(bearing.normalize())
        };
        intensity * cos_phi.max(0.0) / distance_squared.max(1.0)
    }
}

impl ObjectState for LightSensor {
    const NAME: &'static str = "light_sensor";

    fn draw(&self, canvas: &mut dyn Canvas, owner: &SimulatorObject, _config: &DrawConfig) {
        let at = owner.position();
        canvas.draw_line(at, at + Vector2D::from_angle(owner.direction()) * 0.05, Color::BLUE);
    }

    /// The reading as a little-endian f64.
    fn snapshot(&self) -> Option<Bytes> {
        let mut buf = BytesMut::with_capacity(8);
        buf.put_f64_le(self.value);
        Some(buf.freeze())
    }
}
