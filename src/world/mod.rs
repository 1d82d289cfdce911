pub mod engine;
pub mod state;

pub use engine::Engine;
pub use state::SimulatorState;
