pub mod transform;
pub mod vector2d;

pub use transform::{bound_direction, Transform};
pub use vector2d::Vector2D;
