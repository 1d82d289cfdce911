use bytes::{BufMut, Bytes, BytesMut};

use crate::config::DrawConfig;
use crate::draw::{Canvas, Color};
use crate::error::DropError;
use crate::math::Vector2D;
use crate::objects::{ObjectState, SimulatorObject};

pub const LED_COUNT: usize = 16;

/// Display mode requested for the LED ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedMode {
    #[default]
    None,
    Clear,
    Battery,
    Ball,
    Error,
    Emergency,
    Busy,
    /// Show the colours given in the command.
    Custom,
}

impl TryFrom<i32> for LedMode {
    type Error = DropError;

    fn try_from(value: i32) -> Result<Self, <LedMode as TryFrom<i32>>::Error> {
        Ok(match value {
            0 => LedMode::None,
            1 => LedMode::Clear,
            2 => LedMode::Battery,
            3 => LedMode::Ball,
            4 => LedMode::Error,
            5 => LedMode::Emergency,
            6 => LedMode::Busy,
            7 => LedMode::Custom,
            _ => {
                return Err(DropError::InvalidMode {
                    field: "LED mode",
                    value,
                })
            }
        })
    }
}

impl From<LedMode> for i32 {
    fn from(mode: LedMode) -> i32 {
        mode as i32
    }
}

/// The robot's ring of RGB LEDs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leds {
    pub mode: LedMode,
    pub colors: [Color; LED_COUNT],
}

impl Leds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a command. `Clear` switches every LED off; the colours are
    /// only taken over in `Custom` mode.
    pub fn set(&mut self, mode: LedMode, colors: &[Color; LED_COUNT]) {
        self.mode = mode;
        match mode {
            LedMode::Clear => self.colors = [Color::BLACK; LED_COUNT],
            LedMode::Custom => self.colors = *colors,
            _ => {}
        }
    }
}

impl ObjectState for Leds {
    const NAME: &'static str = "leds";

    fn draw(&self, canvas: &mut dyn Canvas, owner: &SimulatorObject, _config: &DrawConfig) {
        const RING_RADIUS: f64 = 0.15;
        let center = owner.position();
        let heading = owner.direction();
        for (i, color) in self.colors.iter().enumerate() {
            let angle = heading + i as f64 * std::f64::consts::TAU / LED_COUNT as f64;
            let at = center + Vector2D::from_angle(angle) * RING_RADIUS;
            canvas.draw_circle(at, 0.01, *color);
        }
    }

    /// Mode as a little-endian i32, then 16 RGB triples.
    fn snapshot(&self) -> Option<Bytes> {
        let mut buf = BytesMut::with_capacity(4 + 3 * LED_COUNT);
        buf.put_i32_le(self.mode.into());
        for c in &self.colors {
            buf.put_u8(c.r);
            buf.put_u8(c.g);
            buf.put_u8(c.b);
        }
        Some(buf.freeze())
    }
}
