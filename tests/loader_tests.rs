//! Avatar Loader Tests
//!
//! Tests for:
//! - AssetContainer: JSON parsing, pool instantiation, disposal
//! - AvatarController::load_model: haircut discovery, variant synthesis,
//!   busy flag, completion callback, failure policy
//! - Hair variant material parameters (the visual contract)
//! - Render-pass visibility toggling

use std::collections::HashMap;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

use avatarview::assets::AssetContainer;
use avatarview::{
    AlphaMode, AssetReader, AvatarController, BlendFactor, DepthFunc, Result, Scene, Side,
    ViewerError,
};
use pollster::block_on;

// ============================================================================
// Test readers & fixtures
// ============================================================================

struct MemoryReader(HashMap<String, Vec<u8>>);

impl MemoryReader {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(uri, body)| ((*uri).to_string(), body.as_bytes().to_vec()))
                .collect(),
        )
    }
}

impl AssetReader for MemoryReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        self.0
            .get(uri)
            .cloned()
            .ok_or_else(|| ViewerError::AssetNotFound(uri.to_string()))
    }
}

/// Reader whose futures never resolve, for in-flight tests.
struct StallReader;

impl AssetReader for StallReader {
    fn read_bytes(&self, _uri: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send {
        std::future::pending()
    }
}

const AVATAR_JSON: &str = r#"{
    "materials": [
        { "name": "skin", "side": "front", "roughness": 0.9 },
        { "name": "hair", "side": "front", "opacity": 1.0 }
    ],
    "meshes": [
        { "name": "body", "material": "skin" },
        { "name": "haircut", "material": "hair" }
    ]
}"#;

const BALD_JSON: &str = r#"{
    "materials": [{ "name": "skin" }],
    "meshes": [{ "name": "body", "material": "skin" }]
}"#;

fn avatar_reader() -> MemoryReader {
    MemoryReader::new(&[("avatar.json", AVATAR_JSON), ("bald.json", BALD_JSON)])
}

fn load(
    controller: &mut AvatarController,
    scene: &mut Scene,
    uri: &str,
) -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let reader = avatar_reader();
    block_on(controller.load_model(&reader, uri, scene, |_| {}))
}

fn material_of<'a>(scene: &'a Scene, mesh_name: &str) -> &'a avatarview::Material {
    let key = scene.find_mesh_by_name(mesh_name).expect("mesh exists");
    let mesh = scene.mesh(key).unwrap();
    scene.material(mesh.material).unwrap()
}

fn poll_once<F: Future>(fut: &mut Pin<Box<F>>) -> Poll<F::Output> {
    let waker = Waker::noop();
    let mut cx = Context::from_waker(waker);
    fut.as_mut().poll(&mut cx)
}

// ============================================================================
// AssetContainer
// ============================================================================

#[test]
fn container_instantiates_into_pools_unattached() {
    let mut scene = Scene::new();
    let reader = avatar_reader();
    let container = block_on(AssetContainer::load(&reader, "avatar.json", &mut scene)).unwrap();

    assert_eq!(container.meshes.len(), 2);
    assert_eq!(container.materials.len(), 2);
    assert_eq!(scene.meshes.len(), 2);
    assert!(scene.attached_meshes().is_empty());
}

#[test]
fn container_add_and_remove_from_scene() {
    let mut scene = Scene::new();
    let reader = avatar_reader();
    let container = block_on(AssetContainer::load(&reader, "avatar.json", &mut scene)).unwrap();

    container.add_all_to_scene(&mut scene);
    assert_eq!(scene.attached_meshes().len(), 2);

    container.remove_all_from_scene(&mut scene);
    assert!(scene.attached_meshes().is_empty());
    // Detached, not released
    assert_eq!(scene.meshes.len(), 2);
}

#[test]
fn container_dispose_releases_meshes_and_materials() {
    let mut scene = Scene::new();
    let reader = avatar_reader();
    let container = block_on(AssetContainer::load(&reader, "avatar.json", &mut scene)).unwrap();

    container.dispose(&mut scene);
    assert!(scene.meshes.is_empty());
    assert!(scene.materials.is_empty());
}

#[test]
fn container_rejects_unknown_material_reference() {
    let mut scene = Scene::new();
    let reader = MemoryReader::new(&[(
        "bad.json",
        r#"{ "meshes": [{ "name": "body", "material": "missing" }] }"#,
    )]);
    let err = block_on(AssetContainer::load(&reader, "bad.json", &mut scene)).unwrap_err();
    assert!(matches!(err, ViewerError::LoadFailed(_)));
}

#[test]
fn container_rejects_malformed_json() {
    let mut scene = Scene::new();
    let reader = MemoryReader::new(&[("broken.json", "{ not json")]);
    let err = block_on(AssetContainer::load(&reader, "broken.json", &mut scene)).unwrap_err();
    assert!(matches!(err, ViewerError::Json(_)));
}

// ============================================================================
// Loading & haircut discovery
// ============================================================================

#[test]
fn load_without_haircut_completes_with_no_variants() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "bald.json").unwrap();

    assert!(controller.haircut().is_none());
    assert_eq!(scene.meshes.len(), 1);

    // Level changes are visibility no-ops without a haircut
    controller.set_haircut_render_passes(3, &mut scene);
    assert_eq!(controller.render_passes(), 3);
    let body = scene.find_mesh_by_name("body").unwrap();
    assert!(scene.mesh(body).unwrap().visible);
}

#[test]
fn load_with_haircut_synthesizes_five_variants() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "avatar.json").unwrap();

    assert!(controller.haircut().is_some());
    // 2 loaded meshes + 5 clones, 2 loaded materials + 5 clones
    assert_eq!(scene.meshes.len(), 7);
    assert_eq!(scene.materials.len(), 7);
    for name in ["haircut2a", "haircut2b", "haircut3a", "haircut3b", "haircut3c"] {
        let key = scene.find_mesh_by_name(name).expect("variant exists");
        assert!(!scene.mesh(key).unwrap().visible, "{name} must start hidden");
    }
}

#[test]
fn load_leaves_original_haircut_at_loader_default_visibility() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "avatar.json").unwrap();

    // Load does not re-sync visibility to the current level; the original
    // haircut keeps whatever the loader produced.
    let haircut = controller.haircut().unwrap();
    assert!(scene.mesh(haircut).unwrap().visible);
}

#[test]
fn reload_disposes_previous_model() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "avatar.json").unwrap();
    let old_haircut = controller.haircut().unwrap();
    controller.add_to_scene(&mut scene);
    assert_eq!(scene.attached_meshes().len(), 7);

    load(&mut controller, &mut scene, "avatar.json").unwrap();
    assert_eq!(scene.meshes.len(), 7);
    assert_eq!(scene.materials.len(), 7);
    assert!(scene.mesh(old_haircut).is_none());
    assert!(scene.attached_meshes().is_empty());
}

#[test]
fn reload_keeps_level_but_not_visibility_sync() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "avatar.json").unwrap();
    controller.set_haircut_render_passes(2, &mut scene);

    load(&mut controller, &mut scene, "avatar.json").unwrap();
    assert_eq!(controller.render_passes(), 2);
    // Fresh model: original haircut at loader default, variants hidden,
    // even though the level says 2-pass.
    let haircut = controller.haircut().unwrap();
    assert!(scene.mesh(haircut).unwrap().visible);
    let h2a = scene.find_mesh_by_name("haircut2a").unwrap();
    assert!(!scene.mesh(h2a).unwrap().visible);
}

#[test]
fn clear_model_releases_everything() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "avatar.json").unwrap();
    controller.clear_model(&mut scene);

    assert!(controller.model().is_none());
    assert!(controller.haircut().is_none());
    assert!(scene.meshes.is_empty());
    assert!(scene.materials.is_empty());
}

// ============================================================================
// Busy flag, callback & failure policy
// ============================================================================

#[test]
fn callback_runs_while_busy_and_busy_clears_after() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    let reader = avatar_reader();

    let mut called = false;
    block_on(controller.load_model(&reader, "avatar.json", &mut scene, |c| {
        called = true;
        assert!(c.busy());
        assert!(c.haircut().is_some());
    }))
    .unwrap();

    assert!(called);
    assert!(!controller.busy());
}

#[test]
fn failed_load_clears_busy_and_skips_callback() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    let reader = avatar_reader();

    let mut called = false;
    let err = block_on(controller.load_model(&reader, "missing.json", &mut scene, |_| {
        called = true;
    }))
    .unwrap_err();

    assert!(matches!(err, ViewerError::AssetNotFound(_)));
    assert!(!called);
    assert!(!controller.busy());
}

#[test]
fn failed_load_leaves_previous_model_in_place() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();

    load(&mut controller, &mut scene, "avatar.json").unwrap();
    let haircut = controller.haircut().unwrap();

    let reader = avatar_reader();
    let result = block_on(controller.load_model(&reader, "missing.json", &mut scene, |_| {}));
    assert!(result.is_err());

    // The read failed before the old model was touched
    assert_eq!(controller.haircut(), Some(haircut));
    assert!(scene.mesh(haircut).is_some());
}

#[test]
fn overlapping_load_is_rejected() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    let reader = StallReader;

    {
        let mut fut = Box::pin(controller.load_model(&reader, "avatar.json", &mut scene, |_| {}));
        assert!(poll_once(&mut fut).is_pending());
    }

    // The abandoned load left the controller busy; a second request is
    // rejected without touching anything.
    assert!(controller.busy());
    let reader = avatar_reader();
    let err =
        block_on(controller.load_model(&reader, "avatar.json", &mut scene, |_| {})).unwrap_err();
    assert!(matches!(err, ViewerError::LoadInProgress));
    assert!(controller.model().is_none());
}

// ============================================================================
// Visual contract: variant material parameters
// ============================================================================

#[test]
fn two_pass_materials_match_contract() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    load(&mut controller, &mut scene, "avatar.json").unwrap();

    let m2a = material_of(&scene, "haircut2a");
    assert_eq!(m2a.name, "material2a");
    assert_eq!(m2a.side, Side::Double);
    assert!(m2a.transparent);
    assert_eq!(m2a.opacity, 0.8);
    assert_eq!(m2a.alpha_mode, AlphaMode::Combine);
    assert_eq!(m2a.depth_func, DepthFunc::Less);
    assert!(m2a.depth_test);
    assert!(!m2a.depth_write);
    assert_eq!(m2a.roughness, 0.6);
    assert_eq!(m2a.blend_dst, Some(BlendFactor::OneMinusDstColor));
    assert!(m2a.smooth_shading);

    let m2b = material_of(&scene, "haircut2b");
    assert_eq!(m2b.name, "material2b");
    assert_eq!(m2b.side, Side::Front);
    assert!(m2b.transparent);
    assert_eq!(m2b.opacity, 0.8);
    assert_eq!(m2b.alpha_mode, AlphaMode::Combine);
    assert!(m2b.depth_test);
    assert_eq!(m2b.alpha_test, Some(0.65));
}

#[test]
fn three_pass_materials_match_contract() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    load(&mut controller, &mut scene, "avatar.json").unwrap();

    let m3a = material_of(&scene, "haircut3a");
    assert_eq!(m3a.side, Side::Back);
    assert!(m3a.transparent);
    assert!(!m3a.depth_write);

    let m3b = material_of(&scene, "haircut3b");
    assert_eq!(m3b.side, Side::Front);
    assert!(m3b.transparent);
    assert!(!m3b.depth_write);

    // The closing double-sided pass writes depth and is cloned without the
    // transparency override.
    let m3c = material_of(&scene, "haircut3c");
    assert_eq!(m3c.side, Side::Double);
    assert!(!m3c.transparent);
    assert!(m3c.depth_write);
}

#[test]
fn variant_materials_inherit_base_parameters() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    load(&mut controller, &mut scene, "avatar.json").unwrap();

    // 3a keeps the base roughness; only 2a overrides it
    let m3a = material_of(&scene, "haircut3a");
    assert_eq!(m3a.roughness, 1.0);
}

// ============================================================================
// Render-pass visibility
// ============================================================================

#[test]
fn exactly_one_variant_family_visible_per_level() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    load(&mut controller, &mut scene, "avatar.json").unwrap();

    let groups: [(u32, &[&str]); 3] = [
        (1, &["haircut"]),
        (2, &["haircut2a", "haircut2b"]),
        (3, &["haircut3a", "haircut3b", "haircut3c"]),
    ];
    let all = ["haircut", "haircut2a", "haircut2b", "haircut3a", "haircut3b", "haircut3c"];

    for (level, visible_names) in groups {
        controller.set_haircut_render_passes(level, &mut scene);
        for name in all {
            let key = scene.find_mesh_by_name(name).unwrap();
            let expected = visible_names.contains(&name);
            assert_eq!(
                scene.mesh(key).unwrap().visible,
                expected,
                "level {level}, mesh {name}"
            );
        }
    }
}

#[test]
fn governor_step_switches_variant_visibility() {
    let mut scene = Scene::new();
    let mut controller = AvatarController::new();
    load(&mut controller, &mut scene, "avatar.json").unwrap();
    controller.set_haircut_render_passes(1, &mut scene);

    for _ in 0..34 {
        controller.tick(&mut scene, 30.0);
    }
    assert_eq!(controller.render_passes(), 2);

    let haircut = controller.haircut().unwrap();
    let h2a = scene.find_mesh_by_name("haircut2a").unwrap();
    assert!(!scene.mesh(haircut).unwrap().visible);
    assert!(scene.mesh(h2a).unwrap().visible);
}
