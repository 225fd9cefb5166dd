pub mod controller;
pub mod quality;

pub use controller::{AvatarController, HAIRCUT_MESH_NAME};
pub use quality::{LevelStep, MAX_RENDER_PASSES, MIN_RENDER_PASSES, PassGovernor};
