pub mod simulator_object;
pub mod state;

pub use simulator_object::{ObjectId, SimulatorObject};
pub use state::{AnyState, ObjectState};
