//! The per-tick update pipeline.
//!
//! Every component reads the world from `current` and writes its results
//! into the matching objects of `next`. An object present in `current` but
//! missing from `next` is skipped without error.

pub mod accelerometer;
pub mod bump_sensor;
pub mod dynamics;
pub mod light;
pub mod omnidrive;

use crate::world::SimulatorState;

pub use accelerometer::AccelerometerComponent;
pub use bump_sensor::BumpSensorComponent;
pub use dynamics::DynamicsComponent;
pub use light::LightComponent;
pub use omnidrive::OmnidriveComponent;

/// One stage of the update pipeline.
pub trait Component {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Advances one aspect of the world by `delta_ms` milliseconds.
    fn apply(&self, current: &SimulatorState, next: &mut SimulatorState, delta_ms: i32);
}
