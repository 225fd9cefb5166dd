//! Scene Bootstrap & Frame Loop
//!
//! [`create_scene`] builds the standard avatar stage from a
//! [`ViewerConfig`]: neutral grey background, a perspective camera placed
//! per configuration and a single hemispheric fill light.
//!
//! [`Viewer`] is the explicit tick driver standing in for a host engine's
//! render loop: whatever drives the render cycle calls
//! [`Viewer::advance`] with the current timestamp and every registered
//! per-frame callback runs in order.

use glam::Vec3;

use crate::config::ViewerConfig;
use crate::scene::{Camera, Light, Scene};

/// Per-frame callback: scene plus the frame timestamp in milliseconds.
pub type UpdateFn = Box<dyn FnMut(&mut Scene, f64)>;

pub struct Viewer {
    pub scene: Scene,
    update_fns: Vec<UpdateFn>,
}

impl Viewer {
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            scene: create_scene(config),
            update_fns: Vec::new(),
        }
    }

    /// Registers a per-frame callback. Callbacks run in registration order.
    pub fn register_update<F>(&mut self, f: F)
    where
        F: FnMut(&mut Scene, f64) + 'static,
    {
        self.update_fns.push(Box::new(f));
    }

    /// Runs one frame: invokes every registered callback with `timestamp`.
    pub fn advance(&mut self, timestamp: f64) {
        for update in &mut self.update_fns {
            update(&mut self.scene, timestamp);
        }
    }
}

/// Builds the avatar stage scene from a configuration.
#[must_use]
pub fn create_scene(config: &ViewerConfig) -> Scene {
    let mut scene = Scene::new();
    scene.background = Vec3::splat(160.0 / 256.0);

    let mut camera = Camera::new_perspective(45.0, 16.0 / 9.0, 0.1, 100.0);
    camera.set_position(config.camera.pos.into());
    camera.set_target(config.camera.look_at.into());
    scene.camera = camera;

    scene.light = Light::new_hemispheric(Vec3::ONE, 1.0, Vec3::Y);

    scene
}
