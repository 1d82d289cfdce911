//! Capabilities that can be attached to a simulator object.

pub mod accelerometer;
pub mod bump_sensor;
pub mod dynamics;
pub mod leds;
pub mod light;
pub mod omnidrive;

pub use accelerometer::Accelerometer;
pub use bump_sensor::{Bump, BumpSensor};
pub use dynamics::{Contact, Dynamics};
pub use leds::{LedMode, Leds, LED_COUNT};
pub use light::{LightSensor, LightSource};
pub use omnidrive::{MotorMode, Omnidrive};
