//! Asset Model Loader Tests
//!
//! Tests for:
//! - Scene selection (settings, declared default, first scene)
//! - Structural errors: missing scene, roots, attributes and broken hierarchies
//! - Mesh ordering (depth-first pre-order) and node relationships
//! - Clip validation and name lookups
//! - LoadSettings serde round-trip

use glam::{Quat, Vec3};
use myth_animator::animation::TargetPath;
use myth_animator::assets::{
    AssetDescription, AssetModel, ChannelDescription, ChannelValues, ClipDescription,
    NodeDescription, PrimitiveDescription, SceneDescription,
};
use myth_animator::errors::{AssetLoadError, MalformedAssetError};
use myth_animator::resources::IndexData;
use myth_animator::scene::Transform;
use myth_animator::settings::LoadSettings;

// ============================================================================
// Fixtures
// ============================================================================

/// Triangle whose first position encodes `tag`, so meshes can be told apart.
fn tagged_triangle(tag: f32) -> PrimitiveDescription {
    PrimitiveDescription::new(
        vec![[tag, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0.0, 0.0, 1.0]; 3],
        vec![0_u16, 1, 2],
    )
}

fn leaf(tag: f32) -> NodeDescription {
    NodeDescription::new(Transform::IDENTITY).with_primitive(tagged_triangle(tag))
}

fn single_node() -> AssetDescription {
    AssetDescription::with_roots(vec![leaf(0.0).named("root")], vec![0])
}

fn expect_err(desc: AssetDescription) -> AssetLoadError {
    match AssetModel::load(desc) {
        Ok(_) => panic!("load unexpectedly succeeded"),
        Err(e) => e,
    }
}

// ============================================================================
// Scene Selection
// ============================================================================

#[test]
fn no_scene_is_rejected() {
    let desc = AssetDescription {
        nodes: vec![leaf(0.0)],
        ..AssetDescription::default()
    };
    assert_eq!(expect_err(desc), AssetLoadError::NoScene);
}

#[test]
fn empty_scene_roots_are_rejected() {
    let desc = AssetDescription::with_roots(vec![leaf(0.0)], Vec::new());
    assert_eq!(expect_err(desc), AssetLoadError::NoSceneRoot { scene: 0 });
}

fn two_scenes() -> AssetDescription {
    AssetDescription {
        name: Some("stage".to_string()),
        nodes: vec![leaf(1.0), leaf(2.0)],
        scenes: vec![
            SceneDescription {
                name: Some("a".to_string()),
                roots: vec![0],
            },
            SceneDescription {
                name: Some("b".to_string()),
                roots: vec![1],
            },
        ],
        default_scene: Some(1),
        clips: Vec::new(),
    }
}

#[test]
fn declared_default_scene_is_used() {
    let model = AssetModel::load(two_scenes()).unwrap();
    assert_eq!(model.roots(), &[1]);
    assert_eq!(model.name(), Some("stage"));
}

#[test]
fn first_scene_is_used_without_default() {
    let mut desc = two_scenes();
    desc.default_scene = None;
    let model = AssetModel::load(desc).unwrap();
    assert_eq!(model.roots(), &[0]);
}

#[test]
fn settings_scene_overrides_default() {
    let settings = LoadSettings {
        scene: Some(0),
        ..LoadSettings::default()
    };
    let model = AssetModel::load_with(two_scenes(), &settings).unwrap();
    assert_eq!(model.roots(), &[0]);
}

#[test]
fn missing_requested_scene_is_rejected() {
    let settings = LoadSettings {
        scene: Some(5),
        ..LoadSettings::default()
    };
    let err = AssetModel::load_with(two_scenes(), &settings).unwrap_err();
    assert_eq!(err, AssetLoadError::SceneNotFound { index: 5, count: 2 });
}

// ============================================================================
// Mesh Attributes
// ============================================================================

#[test]
fn missing_positions_are_rejected() {
    let mut prim = tagged_triangle(0.0);
    prim.positions = None;
    let desc = AssetDescription::with_roots(
        vec![NodeDescription::new(Transform::IDENTITY).with_primitive(prim)],
        vec![0],
    );
    assert_eq!(
        expect_err(desc),
        AssetLoadError::MissingPositions {
            node: 0,
            primitive: 0
        }
    );
}

#[test]
fn missing_normals_are_rejected() {
    let mut prim = tagged_triangle(0.0);
    prim.normals = None;
    let desc = AssetDescription::with_roots(
        vec![
            NodeDescription::new(Transform::IDENTITY)
                .with_primitive(tagged_triangle(1.0))
                .with_primitive(prim),
        ],
        vec![0],
    );
    assert_eq!(
        expect_err(desc),
        AssetLoadError::MissingNormals {
            node: 0,
            primitive: 1
        }
    );
}

#[test]
fn missing_indices_are_rejected() {
    let mut prim = tagged_triangle(0.0);
    prim.indices = None;
    let desc = AssetDescription::with_roots(
        vec![NodeDescription::new(Transform::IDENTITY).with_primitive(prim)],
        vec![0],
    );
    assert!(matches!(expect_err(desc), AssetLoadError::MissingIndices { .. }));
}

#[test]
fn malformed_primitive_carries_builder_error() {
    let mut prim = tagged_triangle(0.0);
    prim.indices = Some(IndexData::U8(vec![0, 1, 2]));
    let desc = AssetDescription::with_roots(
        vec![NodeDescription::new(Transform::IDENTITY).with_primitive(prim)],
        vec![0],
    );
    match expect_err(desc) {
        AssetLoadError::MalformedPrimitive { node, source, .. } => {
            assert_eq!(node, 0);
            assert!(matches!(source, MalformedAssetError::UnsupportedIndexEncoding(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn meshes_are_numbered_in_preorder() {
    // Declared out of order: 0 -> [2, 1], 2 -> [3]
    let nodes = vec![
        leaf(0.0).with_children([2, 1]),
        leaf(1.0),
        leaf(2.0).with_children([3]),
        leaf(3.0),
    ];
    let model = AssetModel::load(AssetDescription::with_roots(nodes, vec![0])).unwrap();

    let tags: Vec<f32> = model.meshes().iter().map(|m| m.vertices()[0].position[0]).collect();
    assert_eq!(tags, vec![0.0, 2.0, 3.0, 1.0]);
    assert_eq!(model.nodes()[1].meshes(), &[3]);
    assert_eq!(model.first_primitive().unwrap().vertices()[0].position[0], 0.0);
}

#[test]
fn parent_and_children_are_recorded() {
    let nodes = vec![leaf(0.0).with_children([1, 2]), leaf(1.0), leaf(2.0)];
    let model = AssetModel::load(AssetDescription::with_roots(nodes, vec![0])).unwrap();

    assert_eq!(model.nodes()[0].parent(), None);
    assert_eq!(model.nodes()[0].children(), &[1, 2]);
    assert_eq!(model.nodes()[2].parent(), Some(0));
}

#[test]
fn out_of_range_root_is_rejected() {
    let desc = AssetDescription::with_roots(vec![leaf(0.0)], vec![3]);
    assert_eq!(
        expect_err(desc),
        AssetLoadError::NodeIndexOutOfRange { index: 3, count: 1 }
    );
}

#[test]
fn out_of_range_child_is_rejected() {
    let desc = AssetDescription::with_roots(vec![leaf(0.0).with_children([7])], vec![0]);
    assert_eq!(
        expect_err(desc),
        AssetLoadError::NodeIndexOutOfRange { index: 7, count: 1 }
    );
}

#[test]
fn cycle_is_rejected() {
    let nodes = vec![leaf(0.0).with_children([1]), leaf(1.0).with_children([0])];
    let desc = AssetDescription::with_roots(nodes, vec![0]);
    assert_eq!(expect_err(desc), AssetLoadError::NodeVisitedTwice { node: 0 });
}

#[test]
fn shared_child_is_rejected() {
    let nodes = vec![
        leaf(0.0).with_children([2]),
        leaf(1.0).with_children([2]),
        leaf(2.0),
    ];
    let desc = AssetDescription::with_roots(nodes, vec![0, 1]);
    assert_eq!(expect_err(desc), AssetLoadError::NodeVisitedTwice { node: 2 });
}

#[test]
fn unreachable_nodes_stay_inert() {
    let nodes = vec![leaf(0.0), leaf(1.0)];
    let model = AssetModel::load(AssetDescription::with_roots(nodes, vec![0])).unwrap();

    assert_eq!(model.nodes().len(), 2);
    assert_eq!(model.meshes().len(), 1);
    assert!(model.nodes()[1].meshes().is_empty());
}

// ============================================================================
// Clips
// ============================================================================

#[test]
fn clips_are_loaded_with_duration() {
    let desc = single_node().with_clip(ClipDescription::new(
        "spin",
        vec![
            ChannelDescription::rotation(
                0,
                vec![0.0, 1.0, 2.5],
                vec![Quat::IDENTITY, Quat::from_rotation_y(1.0), Quat::from_rotation_y(2.0)],
            ),
            ChannelDescription::translation(0, vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::Y]),
        ],
    ));
    let model = AssetModel::load(desc).unwrap();

    let clip = model.clip(0).unwrap();
    assert_eq!(clip.name, "spin");
    assert_eq!(clip.duration, 2.5);
    assert_eq!(clip.tracks.len(), 2);
    assert_eq!(clip.tracks[0].meta.target, TargetPath::Rotation);
}

#[test]
fn channel_target_out_of_range_is_rejected() {
    let desc = single_node().with_clip(ClipDescription::new(
        "bad",
        vec![ChannelDescription::translation(4, vec![0.0], vec![Vec3::ZERO])],
    ));
    assert_eq!(
        expect_err(desc),
        AssetLoadError::ChannelTargetOutOfRange {
            clip: "bad".to_string(),
            channel: 0,
            node: 4
        }
    );
}

#[test]
fn channel_value_type_mismatch_is_rejected() {
    let desc = single_node().with_clip(ClipDescription::new(
        "bad",
        vec![ChannelDescription {
            target_node: 0,
            property: TargetPath::Rotation,
            times: vec![0.0],
            values: ChannelValues::Vector3(vec![Vec3::ZERO]),
        }],
    ));
    match expect_err(desc) {
        AssetLoadError::MalformedChannel { source, .. } => assert_eq!(
            source,
            MalformedAssetError::ChannelValueType {
                property: "rotation",
                found: "vec3"
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unsorted_channel_is_rejected() {
    let desc = single_node().with_clip(ClipDescription::new(
        "bad",
        vec![
            ChannelDescription::scale(0, vec![0.0, 1.0], vec![Vec3::ONE, Vec3::ONE]),
            ChannelDescription::scale(0, vec![1.0, 0.5], vec![Vec3::ONE, Vec3::ONE]),
        ],
    ));
    match expect_err(desc) {
        AssetLoadError::MalformedChannel { channel, source, .. } => {
            assert_eq!(channel, 1);
            assert!(matches!(source, MalformedAssetError::UnsortedKeyframes { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mismatched_channel_lengths_are_rejected() {
    let desc = single_node().with_clip(ClipDescription::new(
        "bad",
        vec![ChannelDescription::translation(0, vec![0.0, 1.0, 2.0], vec![Vec3::ZERO])],
    ));
    match expect_err(desc) {
        AssetLoadError::MalformedChannel { source, .. } => assert_eq!(
            source,
            MalformedAssetError::KeyframeCountMismatch { times: 3, values: 1 }
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn lookups_resolve_first_name() {
    let nodes = vec![
        leaf(0.0).named("hips").with_children([1, 2]),
        leaf(1.0).named("hand"),
        leaf(2.0).named("hand"),
    ];
    let desc = AssetDescription::with_roots(nodes, vec![0])
        .with_clip(ClipDescription::new("idle", Vec::new()))
        .with_clip(ClipDescription::new("run", Vec::new()))
        .with_clip(ClipDescription::new("idle", Vec::new()));
    let model = AssetModel::load(desc).unwrap();

    assert_eq!(model.node_index("hand"), Some(1));
    assert_eq!(model.node_index("tail"), None);
    assert_eq!(model.clip_index("idle"), Some(0));
    assert_eq!(model.clip_index("run"), Some(1));
    assert_eq!(model.clip_index("jump"), None);
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_default_autoplays_default_scene() {
    let settings = LoadSettings::default();
    assert_eq!(settings.scene, None);
    assert!(settings.autoplay);
}

#[test]
fn settings_deserialize_with_defaults() {
    let settings: LoadSettings = serde_json::from_str(r#"{ "scene": 2 }"#).unwrap();
    assert_eq!(settings.scene, Some(2));
    assert!(settings.autoplay);

    let json = serde_json::to_string(&LoadSettings {
        scene: None,
        autoplay: false,
    })
    .unwrap();
    let back: LoadSettings = serde_json::from_str(&json).unwrap();
    assert!(!back.autoplay);
}

#[test]
fn autoplay_setting_is_recorded_on_model() {
    let settings = LoadSettings {
        autoplay: false,
        ..LoadSettings::default()
    };
    let model = AssetModel::load_with(single_node(), &settings).unwrap();
    assert!(!model.autoplay());
}
