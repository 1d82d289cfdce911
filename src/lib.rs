pub mod collision;
pub mod common;
pub mod components;
pub mod config;
pub mod draw;
pub mod drops;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod states;
pub mod world;

// Re-export key types for easier use
pub use collision::{collides, Collision};
pub use common::{Force, Material};
pub use components::Component;
pub use config::SimConfig;
pub use draw::{Canvas, Color, NullCanvas};
pub use drops::{ControlDrop, DropMessage, DropQueue, FrameCodec};
pub use error::{ConfigError, DropError, ObjectError};
pub use math::{bound_direction, Transform, Vector2D};
pub use objects::{AnyState, ObjectId, ObjectState, SimulatorObject};
pub use shapes::{Intersection, LineSegment, Polygon};
pub use world::{Engine, SimulatorState};
