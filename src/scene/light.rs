use glam::Vec3;
use uuid::Uuid;

/// Hemispheric fill light: sky colour fading to ground along `up`.
///
/// The viewer lights the avatar with a single one of these; no shadows.
#[derive(Debug, Clone)]
pub struct Light {
    pub uuid: Uuid,
    pub color: Vec3,
    pub intensity: f32,
    pub up: Vec3,
}

impl Light {
    #[must_use]
    pub fn new_hemispheric(color: Vec3, intensity: f32, up: Vec3) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            color,
            intensity,
            up,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new_hemispheric(Vec3::ONE, 1.0, Vec3::Y)
    }
}
