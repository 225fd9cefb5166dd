pub mod material;
pub mod mesh;

pub use material::{AlphaMode, BlendFactor, DepthFunc, Material, Side};
pub use mesh::Mesh;
