use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec3;
use slotmap::SlotMap;

use crate::resources::{Material, Mesh};
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::{MaterialKey, MeshKey};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph data layer.
///
/// Owns the mesh and material pools plus the camera and light. Pool
/// membership and scene membership are separate: a loaded container's
/// meshes sit in the pools until explicitly attached, mirroring how a
/// host engine's asset container is added to the scene as a second step.
pub struct Scene {
    pub id: u32,

    pub meshes: SlotMap<MeshKey, Mesh>,
    pub materials: SlotMap<MaterialKey, Material>,

    /// Meshes currently attached to (rendered as part of) the scene.
    attached: Vec<MeshKey>,

    pub background: Vec3,
    pub camera: Camera,
    pub light: Light,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            meshes: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            attached: Vec::new(),
            background: Vec3::ZERO,
            camera: Camera::default(),
            light: Light::default(),
        }
    }

    // ========================================================================
    // Pool management
    // ========================================================================

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    /// Detaches and drops a mesh from the pool. Stale keys are ignored.
    pub fn remove_mesh(&mut self, key: MeshKey) {
        self.detach(key);
        self.meshes.remove(key);
    }

    /// Drops a material from the pool. Stale keys are ignored.
    pub fn remove_material(&mut self, key: MaterialKey) {
        self.materials.remove(key);
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    #[inline]
    pub fn mesh_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    #[inline]
    #[must_use]
    pub fn material(&self, key: MaterialKey) -> Option<&Material> {
        self.materials.get(key)
    }

    #[inline]
    pub fn material_mut(&mut self, key: MaterialKey) -> Option<&mut Material> {
        self.materials.get_mut(key)
    }

    // ========================================================================
    // Scene membership
    // ========================================================================

    /// Attaches a pooled mesh to the scene. Attaching an already attached
    /// or unknown mesh is a no-op.
    pub fn attach(&mut self, key: MeshKey) {
        if self.meshes.contains_key(key) && !self.attached.contains(&key) {
            self.attached.push(key);
        }
    }

    /// Detaches a mesh from the scene without dropping it from the pool.
    pub fn detach(&mut self, key: MeshKey) {
        self.attached.retain(|&k| k != key);
    }

    #[must_use]
    pub fn is_attached(&self, key: MeshKey) -> bool {
        self.attached.contains(&key)
    }

    #[must_use]
    pub fn attached_meshes(&self) -> &[MeshKey] {
        &self.attached
    }

    /// Finds a pooled mesh by name.
    #[must_use]
    pub fn find_mesh_by_name(&self, name: &str) -> Option<MeshKey> {
        self.meshes
            .iter()
            .find_map(|(key, mesh)| (mesh.name == name).then_some(key))
    }
}
