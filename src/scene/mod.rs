pub mod camera;
pub mod light;
pub mod scene;

use slotmap::new_key_type;

pub use camera::Camera;
pub use light::Light;
pub use scene::Scene;

new_key_type! {
    pub struct MeshKey;
    pub struct MaterialKey;
}
