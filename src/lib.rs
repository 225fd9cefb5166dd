#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod app;
pub mod assets;
pub mod avatar;
pub mod config;
pub mod errors;
pub mod resources;
pub mod scene;

pub use app::{Viewer, create_scene};
#[cfg(feature = "http")]
pub use assets::HttpAssetReader;
pub use assets::{AssetContainer, AssetReader, FileAssetReader};
pub use avatar::{AvatarController, LevelStep, PassGovernor};
pub use config::{CameraConfig, ViewerConfig};
pub use errors::{Result, ViewerError};
pub use resources::{AlphaMode, BlendFactor, DepthFunc, Material, Mesh, Side};
pub use scene::{Camera, Light, MaterialKey, MeshKey, Scene};
