use uuid::Uuid;

use crate::scene::MaterialKey;

/// A mesh instance: a named, toggleable scene object bound to a material.
///
/// Geometry lives with the host renderer; the viewer only tracks identity,
/// visibility and the material binding, which is all the hair-pass logic
/// needs.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub uuid: Uuid,
    pub name: String,
    pub visible: bool,
    pub material: MaterialKey,
}

impl Mesh {
    #[must_use]
    pub fn new(name: impl Into<String>, material: MaterialKey) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            visible: true,
            material,
        }
    }

    /// Clones this mesh under a new name with a different material binding.
    ///
    /// Clones start invisible: hair-pass variants are toggled on only when
    /// the matching render-pass level is selected.
    #[must_use]
    pub fn clone_named(&self, name: impl Into<String>, material: MaterialKey) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            visible: false,
            material,
        }
    }
}
