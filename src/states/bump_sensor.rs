use bytes::{BufMut, Bytes, BytesMut};

use crate::config::DrawConfig;
use crate::draw::{Canvas, Color};
use crate::math::Vector2D;
use crate::objects::{ObjectState, SimulatorObject};

/// One bump felt during the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bump {
    pub point: Vector2D,
    /// Unit normal, pointing away from the sensing object.
    pub normal: Vector2D,
    /// Impulse magnitude of the contact.
    pub magnitude: f64,
}

/// Touch sensor covering the owner's whole shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BumpSensor {
    bumps: Vec<Bump>,
}

impl BumpSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bumps(&self) -> &[Bump] {
        &self.bumps
    }

    pub fn add_bump(&mut self, bump: Bump) {
        self.bumps.push(bump);
    }

    pub fn clear(&mut self) {
        self.bumps.clear();
    }
}

impl ObjectState for BumpSensor {
    const NAME: &'static str = "bump";

    fn clear_transient(&mut self) {
        self.clear();
    }

    fn draw(&self, canvas: &mut dyn Canvas, _owner: &SimulatorObject, _config: &DrawConfig) {
        for bump in &self.bumps {
            canvas.draw_circle(bump.point, 0.02, Color::RED);
        }
    }

    /// Bump count as a little-endian i32, then point (x, y), normal (x, y)
    /// and magnitude of each bump as little-endian f64.
    fn snapshot(&self) -> Option<Bytes> {
        let mut buf = BytesMut::with_capacity(4 + self.bumps.len() * 5 * 8);
        buf.put_i32_le(self.bumps.len() as i32);
        for bump in &self.bumps {
            buf.put_f64_le(bump.point.x);
            buf.put_f64_le(bump.point.y);
            buf.put_f64_le(bump.normal.x);
            buf.put_f64_le(bump.normal.y);
            buf.put_f64_le(bump.magnitude);
        }
        Some(buf.freeze())
    }
}
