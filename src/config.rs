//! Viewer Configuration
//!
//! Plain serde structures mirroring the JSON configuration consumed by the
//! viewer: `{ "camera": { "pos": {x,y,z}, "lookAt": {x,y,z} } }`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A `{x, y, z}` triple as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VecConfig {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl VecConfig {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<VecConfig> for Vec3 {
    fn from(v: VecConfig) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for VecConfig {
    fn from(v: Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

/// Camera placement: eye position and look-at target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub pos: VecConfig,
    #[serde(rename = "lookAt")]
    pub look_at: VecConfig,
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
}

impl ViewerConfig {
    /// Parses a configuration from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                pos: VecConfig::new(0.0, 0.0, 3.0),
                look_at: VecConfig::new(0.0, 0.0, 0.0),
            },
        }
    }
}
