pub mod aabb;
pub mod detection;
pub mod manifold;

pub use aabb::AABB;
pub use detection::collides;
pub use manifold::Collision;
