pub mod force;
pub mod material;

pub use force::Force;
pub use material::Material;
