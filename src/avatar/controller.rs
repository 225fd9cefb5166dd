//! Avatar Controller
//!
//! Owns the loaded avatar model and drives hair translucency rendering.
//! Real translucent hair needs depth peeling or OIT; the viewer fakes it by
//! keeping up to three pre-built variants of the haircut mesh (1, 2 and 3
//! render passes worth of clones with differently configured materials) and
//! toggling which family is visible. The per-frame [`PassGovernor`] decides
//! when to move between families based on observed frame timing.

use crate::assets::{AssetContainer, AssetReader};
use crate::avatar::quality::{MIN_RENDER_PASSES, PassGovernor};
use crate::errors::{Result, ViewerError};
use crate::resources::{AlphaMode, BlendFactor, DepthFunc, Material, Side};
use crate::scene::{MaterialKey, MeshKey, Scene};

/// Name identifying the haircut mesh inside a loaded model.
pub const HAIRCUT_MESH_NAME: &str = "haircut";

pub struct AvatarController {
    busy: bool,
    render_passes: u32,

    model: Option<AssetContainer>,
    haircut: Option<MeshKey>,

    // 2-pass variant set
    haircut2a: Option<MeshKey>,
    haircut2b: Option<MeshKey>,

    // 3-pass variant set
    haircut3a: Option<MeshKey>,
    haircut3b: Option<MeshKey>,
    haircut3c: Option<MeshKey>,

    prev_timestamp: f64,
    governor: PassGovernor,
}

impl Default for AvatarController {
    fn default() -> Self {
        Self::new()
    }
}

impl AvatarController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            busy: false,
            render_passes: MIN_RENDER_PASSES,
            model: None,
            haircut: None,
            haircut2a: None,
            haircut2b: None,
            haircut3a: None,
            haircut3b: None,
            haircut3c: None,
            prev_timestamp: 0.0,
            governor: PassGovernor::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn busy(&self) -> bool {
        self.busy
    }

    #[inline]
    #[must_use]
    pub fn render_passes(&self) -> u32 {
        self.render_passes
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> Option<&AssetContainer> {
        self.model.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn haircut(&self) -> Option<MeshKey> {
        self.haircut
    }

    #[inline]
    #[must_use]
    pub fn governor(&self) -> &PassGovernor {
        &self.governor
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Replaces the currently displayed avatar with one loaded from `uri`.
    ///
    /// The previous model (if any) is detached and fully released before
    /// the new one takes its place. If the loaded model contains a mesh
    /// named [`HAIRCUT_MESH_NAME`], the 2-pass and 3-pass hair variant sets
    /// are synthesized from it; a model without one is valid and simply has
    /// no hair-pass behavior.
    ///
    /// `on_ready` is invoked once the model is in place; it is *not*
    /// invoked on failure. A second load while one is in flight is rejected
    /// with [`ViewerError::LoadInProgress`].
    pub async fn load_model<R, F>(
        &mut self,
        reader: &R,
        uri: &str,
        scene: &mut Scene,
        on_ready: F,
    ) -> Result<()>
    where
        R: AssetReader,
        F: FnOnce(&mut Self),
    {
        if self.busy {
            return Err(ViewerError::LoadInProgress);
        }
        self.busy = true;

        match self.load_model_inner(reader, uri, scene).await {
            Ok(()) => {
                on_ready(self);
                self.busy = false;
                Ok(())
            }
            Err(err) => {
                log::error!("Error loading model from `{uri}`: {err}");
                self.busy = false;
                Err(err)
            }
        }
    }

    async fn load_model_inner<R: AssetReader>(
        &mut self,
        reader: &R,
        uri: &str,
        scene: &mut Scene,
    ) -> Result<()> {
        let container = AssetContainer::load(reader, uri, scene).await?;

        self.remove_from_scene(scene);
        self.clear_model(scene);

        self.haircut = container
            .meshes
            .iter()
            .copied()
            .find(|&key| scene.mesh(key).is_some_and(|m| m.name == HAIRCUT_MESH_NAME));
        self.model = Some(container);

        if self.haircut.is_some() {
            self.prepare_haircut(scene);
        }
        Ok(())
    }

    /// Detaches and releases the current model and all derived variants.
    pub fn clear_model(&mut self, scene: &mut Scene) {
        if let Some(model) = self.model.take() {
            model.dispose(scene);
        }
        self.haircut = None;
        self.haircut2a = None;
        self.haircut2b = None;
        self.haircut3a = None;
        self.haircut3b = None;
        self.haircut3c = None;
    }

    /// Attaches every model mesh to the scene.
    pub fn add_to_scene(&self, scene: &mut Scene) {
        if let Some(model) = &self.model {
            model.add_all_to_scene(scene);
        }
    }

    /// Detaches every model mesh from the scene without releasing it.
    pub fn remove_from_scene(&self, scene: &mut Scene) {
        if let Some(model) = &self.model {
            model.remove_all_from_scene(scene);
        }
    }

    // ========================================================================
    // Hair variant synthesis
    // ========================================================================

    fn prepare_haircut(&mut self, scene: &mut Scene) {
        self.prepare_haircut_for_2_passes(scene);
        self.prepare_haircut_for_3_passes(scene);
    }

    fn prepare_haircut_for_2_passes(&mut self, scene: &mut Scene) {
        let Some(base) = self.haircut_base_material(scene) else {
            return;
        };

        let mut material2a = Self::clone_haircut_material(&base, "material2a", Side::Double);
        material2a.opacity = 0.8;
        material2a.alpha_mode = AlphaMode::Combine;
        material2a.depth_func = DepthFunc::Less;
        material2a.depth_test = true;
        material2a.depth_write = false;
        material2a.roughness = 0.6;
        material2a.blend_dst = Some(BlendFactor::OneMinusDstColor);
        material2a.smooth_shading = true;

        let mut material2b = Self::clone_haircut_material(&base, "material2b", Side::Front);
        material2b.opacity = 0.8;
        material2b.alpha_mode = AlphaMode::Combine;
        material2b.depth_test = true;
        material2b.alpha_test = Some(0.65);

        self.haircut2a = self.create_haircut_clone(scene, "haircut2a", material2a);
        self.haircut2b = self.create_haircut_clone(scene, "haircut2b", material2b);
    }

    fn prepare_haircut_for_3_passes(&mut self, scene: &mut Scene) {
        let Some(base) = self.haircut_base_material(scene) else {
            return;
        };

        let mut material3a = Self::clone_haircut_material(&base, "material3a", Side::Back);
        material3a.depth_write = false;

        let mut material3b = Self::clone_haircut_material(&base, "material3b", Side::Front);
        material3b.depth_write = false;

        // Cloned directly rather than through the helper: the closing
        // double-sided pass writes depth and stays opaque.
        let mut material3c = base.clone_named("material3c");
        material3c.side = Side::Double;
        material3c.depth_write = true;

        self.haircut3a = self.create_haircut_clone(scene, "haircut3a", material3a);
        self.haircut3b = self.create_haircut_clone(scene, "haircut3b", material3b);
        self.haircut3c = self.create_haircut_clone(scene, "haircut3c", material3c);
    }

    fn haircut_base_material(&self, scene: &Scene) -> Option<Material> {
        let haircut = self.haircut?;
        let material = scene.mesh(haircut)?.material;
        scene.material(material).cloned()
    }

    fn clone_haircut_material(base: &Material, name: &str, side: Side) -> Material {
        let mut material = base.clone_named(name);
        material.side = side;
        material.transparent = true;
        material
    }

    /// Clones the haircut mesh (invisible) under a new material and records
    /// both in the owning container so disposal releases them.
    fn create_haircut_clone(
        &mut self,
        scene: &mut Scene,
        name: &str,
        material: Material,
    ) -> Option<MeshKey> {
        let haircut = self.haircut?;
        let material: MaterialKey = scene.add_material(material);
        let clone = scene.mesh(haircut)?.clone_named(name, material);
        let key = scene.add_mesh(clone);

        if let Some(model) = &mut self.model {
            model.meshes.push(key);
            model.materials.push(material);
        }
        Some(key)
    }

    // ========================================================================
    // Render-pass level
    // ========================================================================

    /// Selects which haircut variant family is visible.
    ///
    /// Level 1 shows the original haircut, level 2 the blended pair, level
    /// 3 the back/front/double triple. Without a haircut the level is still
    /// recorded but nothing changes visibly.
    pub fn set_haircut_render_passes(&mut self, passes: u32, scene: &mut Scene) {
        self.render_passes = passes;

        let Some(haircut) = self.haircut else {
            return;
        };

        Self::set_visible(scene, Some(haircut), passes == 1);
        Self::set_visible(scene, self.haircut2a, passes == 2);
        Self::set_visible(scene, self.haircut2b, passes == 2);
        Self::set_visible(scene, self.haircut3a, passes == 3);
        Self::set_visible(scene, self.haircut3b, passes == 3);
        Self::set_visible(scene, self.haircut3c, passes == 3);
    }

    fn set_visible(scene: &mut Scene, key: Option<MeshKey>, visible: bool) {
        if let Some(mesh) = key.and_then(|k| scene.mesh_mut(k)) {
            mesh.visible = visible;
        }
    }

    // ========================================================================
    // Frame sampling
    // ========================================================================

    /// Per-frame entry point: samples the timestamp (milliseconds) against
    /// the previous one and feeds the governor.
    pub fn on_frame(&mut self, scene: &mut Scene, timestamp: f64) {
        let delta = timestamp - self.prev_timestamp;
        self.prev_timestamp = timestamp;
        self.tick(scene, delta);
    }

    /// Advances the governor by one frame delta and applies any resulting
    /// level step. Steps that clamp at the level bounds change nothing but
    /// still consume the filled streak.
    pub fn tick(&mut self, scene: &mut Scene, delta: f64) {
        self.governor.record(delta);

        if let Some(step) = self.governor.take_step() {
            let next = step.apply(self.render_passes);
            if next != self.render_passes {
                log::debug!("haircut render passes: {} -> {next}", self.render_passes);
                self.set_haircut_render_passes(next, scene);
            }
        }
    }
}
