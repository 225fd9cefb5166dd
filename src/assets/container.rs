//! Asset Container
//!
//! The avatar export format is a JSON document describing named meshes and
//! the materials they bind:
//!
//! ```json
//! {
//!   "materials": [
//!     { "name": "hair", "side": "front", "opacity": 1.0 }
//!   ],
//!   "meshes": [
//!     { "name": "haircut", "material": "hair" }
//!   ]
//! }
//! ```
//!
//! Loading instantiates the document into the scene's pools and returns an
//! [`AssetContainer`] tracking every created key. Like a host engine's
//! asset container, loaded meshes are *not* attached to the scene until
//! [`AssetContainer::add_all_to_scene`] is called.

use std::collections::HashMap;

use serde::Deserialize;

use crate::assets::io::AssetReader;
use crate::errors::{Result, ViewerError};
use crate::resources::{Material, Mesh, Side};
use crate::scene::{MaterialKey, MeshKey, Scene};

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ContainerDoc {
    #[serde(default)]
    materials: Vec<MaterialDoc>,
    #[serde(default)]
    meshes: Vec<MeshDoc>,
}

#[derive(Debug, Deserialize)]
struct MaterialDoc {
    name: String,
    #[serde(default)]
    side: Option<String>,
    #[serde(default)]
    opacity: Option<f32>,
    #[serde(default)]
    roughness: Option<f32>,
    #[serde(default)]
    transparent: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct MeshDoc {
    name: String,
    material: String,
    #[serde(default = "default_visible")]
    visible: bool,
}

fn default_visible() -> bool {
    true
}

fn parse_side(name: &str, value: &str) -> Result<Side> {
    match value {
        "front" => Ok(Side::Front),
        "back" => Ok(Side::Back),
        "double" => Ok(Side::Double),
        other => Err(ViewerError::LoadFailed(format!(
            "material `{name}` has unknown side `{other}`"
        ))),
    }
}

// ============================================================================
// AssetContainer
// ============================================================================

/// Handles to everything a single model load created in the scene pools.
///
/// The mesh list grows when hair-pass variants are synthesized after load;
/// disposal releases variants together with the loaded originals.
#[derive(Debug, Default)]
pub struct AssetContainer {
    pub meshes: Vec<MeshKey>,
    pub materials: Vec<MaterialKey>,
}

impl AssetContainer {
    /// Reads, parses and instantiates a model into the scene pools.
    pub async fn load<R: AssetReader>(reader: &R, uri: &str, scene: &mut Scene) -> Result<Self> {
        let bytes = reader.read_bytes(uri).await?;
        let doc: ContainerDoc = serde_json::from_slice(&bytes)?;
        Self::instantiate(doc, scene)
    }

    fn instantiate(doc: ContainerDoc, scene: &mut Scene) -> Result<Self> {
        let mut container = Self::default();
        let mut by_name: HashMap<String, MaterialKey> = HashMap::new();

        for entry in doc.materials {
            let mut material = Material::new(entry.name.clone());
            if let Some(side) = &entry.side {
                material.side = parse_side(&entry.name, side)?;
            }
            if let Some(opacity) = entry.opacity {
                material.opacity = opacity;
            }
            if let Some(roughness) = entry.roughness {
                material.roughness = roughness;
            }
            if let Some(transparent) = entry.transparent {
                material.transparent = transparent;
            }

            let key = scene.add_material(material);
            by_name.insert(entry.name, key);
            container.materials.push(key);
        }

        for entry in doc.meshes {
            let material = *by_name.get(&entry.material).ok_or_else(|| {
                ViewerError::LoadFailed(format!(
                    "mesh `{}` references unknown material `{}`",
                    entry.name, entry.material
                ))
            })?;
            let mut mesh = Mesh::new(entry.name, material);
            mesh.visible = entry.visible;
            container.meshes.push(scene.add_mesh(mesh));
        }

        log::debug!(
            "instantiated asset container: {} meshes, {} materials",
            container.meshes.len(),
            container.materials.len()
        );
        Ok(container)
    }

    /// Attaches every container mesh to the scene.
    pub fn add_all_to_scene(&self, scene: &mut Scene) {
        for &key in &self.meshes {
            scene.attach(key);
        }
    }

    /// Detaches every container mesh from the scene, keeping it pooled.
    pub fn remove_all_from_scene(&self, scene: &mut Scene) {
        for &key in &self.meshes {
            scene.detach(key);
        }
    }

    /// Releases every mesh and material this container created.
    pub fn dispose(self, scene: &mut Scene) {
        for &key in &self.meshes {
            if let Some(mesh) = scene.mesh(key) {
                let material = mesh.material;
                scene.remove_material(material);
            }
            scene.remove_mesh(key);
        }
        for &key in &self.materials {
            scene.remove_material(key);
        }
    }
}
