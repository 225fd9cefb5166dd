//! Material Data Layer
//!
//! A material here is a plain description of render state: face side,
//! transparency, blending and depth settings. The viewer never submits GPU
//! work itself; these parameters are the contract handed to whichever
//! renderer displays the scene, and the hair render-pass variants depend on
//! reproducing them exactly.

use uuid::Uuid;

/// Which faces of a triangle are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// How the material's alpha channel is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// Alpha is ignored; the surface is fully opaque.
    Opaque,
    /// Classic source-alpha blending.
    Combine,
}

/// Depth comparison function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    Less,
    LessEqual,
}

/// Destination blend factor override, used by the blended hair pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    One,
    OneMinusDstColor,
}

/// Render-state description of a surface.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,

    // Pipeline-affecting settings
    pub side: Side,
    pub transparent: bool,
    pub depth_test: bool,
    pub depth_write: bool,
    pub depth_func: DepthFunc,

    // Shading parameters
    pub opacity: f32,
    pub alpha_mode: AlphaMode,
    pub alpha_test: Option<f32>,
    pub roughness: f32,
    pub smooth_shading: bool,
    pub blend_dst: Option<BlendFactor>,
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            side: Side::Front,
            transparent: false,
            depth_test: true,
            depth_write: true,
            depth_func: DepthFunc::LessEqual,
            opacity: 1.0,
            alpha_mode: AlphaMode::Opaque,
            alpha_test: None,
            roughness: 1.0,
            smooth_shading: false,
            blend_dst: None,
        }
    }

    /// Clones every render parameter under a new name and identity.
    #[must_use]
    pub fn clone_named(&self, name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            ..self.clone()
        }
    }
}
