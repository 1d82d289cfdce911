use bytes::{BufMut, Bytes, BytesMut};

use crate::math::Vector2D;
use crate::objects::ObjectState;

/// A two-axis accelerometer plus a fixed vertical reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Accelerometer {
    value: Vector2D,
    z: f64,
    velocity_sample: Vector2D,
}

impl Accelerometer {
    /// A sensor at rest, reading `gravity` on the vertical axis.
    pub fn new(gravity: f64) -> Self {
        Accelerometer {
            value: Vector2D::ZERO,
            z: gravity,
            velocity_sample: Vector2D::ZERO,
        }
    }

    pub fn value(&self) -> Vector2D {
        self.value
    }

    pub fn set_value(&mut self, value: Vector2D) {
        self.value = value;
    }

    pub fn z_value(&self) -> f64 {
        self.z
    }

    /// Velocity seen on the previous tick.
    pub fn velocity_sample(&self) -> Vector2D {
        self.velocity_sample
    }

    pub fn set_velocity_sample(&mut self, velocity: Vector2D) {
        self.velocity_sample = velocity;
    }

    /// Resets the reading and the velocity sample to zero.
    pub fn clear(&mut self) {
        self.value = Vector2D::ZERO;
        self.velocity_sample = Vector2D::ZERO;
    }
}

impl ObjectState for Accelerometer {
    const NAME: &'static str = "accelerometer";

    /// x, y and z acceleration, as little-endian f64.
    fn snapshot(&self) -> Option<Bytes> {
        let mut buf = BytesMut::with_capacity(3 * 8);
        buf.put_f64_le(self.value.x);
        buf.put_f64_le(self.value.y);
        buf.put_f64_le(self.z);
        Some(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_clear() {
        let mut sensor = Accelerometer::new(9.81);
        assert_eq!(sensor.value(), Vector2D::ZERO);
        assert_eq!(sensor.z_value(), 9.81);

        sensor.set_value(Vector2D::new(1.0, 2.0));
        sensor.set_velocity_sample(Vector2D::new(3.0, 4.0));
        sensor.clear();
        assert_eq!(sensor.value(), Vector2D::ZERO);
        assert_eq!(sensor.velocity_sample(), Vector2D::ZERO);
        assert_eq!(sensor.z_value(), 9.81);
    }
}
