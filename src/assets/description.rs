//! Decoded Asset Description
//!
//! The hand-off format between a container decoder (glTF or anything else)
//! and [`AssetModel::load`](crate::assets::AssetModel::load). Everything here
//! is plain typed arrays: the decoder has already resolved buffers, accessors
//! and file paths.
//!
//! Indices refer to positions in the enclosing `nodes` array. Nothing is
//! validated until the description is loaded.

use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::resources::mesh::IndexData;
use crate::scene::transform::Transform;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDescription {
    pub name: Option<String>,
    pub nodes: Vec<NodeDescription>,
    pub scenes: Vec<SceneDescription>,
    /// Scene to use when the caller does not pick one.
    pub default_scene: Option<usize>,
    pub clips: Vec<ClipDescription>,
}

impl AssetDescription {
    /// A description with exactly one scene rooted at `roots`.
    #[must_use]
    pub fn with_roots(nodes: Vec<NodeDescription>, roots: Vec<usize>) -> Self {
        Self {
            name: None,
            nodes,
            scenes: vec![SceneDescription { name: None, roots }],
            default_scene: Some(0),
            clips: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clip(mut self, clip: ClipDescription) -> Self {
        self.clips.push(clip);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    pub name: Option<String>,
    /// Root nodes in declaration order.
    pub roots: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeDescription {
    pub name: Option<String>,
    pub transform: Transform,
    pub children: Vec<usize>,
    pub primitives: Vec<PrimitiveDescription>,
}

impl NodeDescription {
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = usize>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_primitive(mut self, primitive: PrimitiveDescription) -> Self {
        self.primitives.push(primitive);
        self
    }
}

/// Attribute bundle of one mesh primitive. `None` means the accessor is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveDescription {
    pub positions: Option<Vec<[f32; 3]>>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub indices: Option<IndexData>,
}

impl PrimitiveDescription {
    #[must_use]
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        indices: impl Into<IndexData>,
    ) -> Self {
        Self {
            positions: Some(positions),
            normals: Some(normals),
            indices: Some(indices.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipDescription {
    pub name: String,
    pub channels: Vec<ChannelDescription>,
}

impl ClipDescription {
    #[must_use]
    pub fn new(name: impl Into<String>, channels: Vec<ChannelDescription>) -> Self {
        Self {
            name: name.into(),
            channels,
        }
    }
}

/// Keyframe outputs, typed by the decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValues {
    Vector3(Vec<Vec3>),
    Quaternion(Vec<Quat>),
    Scalar(Vec<f32>),
}

impl ChannelValues {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ChannelValues::Vector3(_) => "vec3",
            ChannelValues::Quaternion(_) => "quaternion",
            ChannelValues::Scalar(_) => "scalar",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDescription {
    pub target_node: usize,
    pub property: TargetPath,
    pub times: Vec<f32>,
    pub values: ChannelValues,
}

impl ChannelDescription {
    #[must_use]
    pub fn translation(target_node: usize, times: Vec<f32>, values: Vec<Vec3>) -> Self {
        Self {
            target_node,
            property: TargetPath::Translation,
            times,
            values: ChannelValues::Vector3(values),
        }
    }

    #[must_use]
    pub fn scale(target_node: usize, times: Vec<f32>, values: Vec<Vec3>) -> Self {
        Self {
            target_node,
            property: TargetPath::Scale,
            times,
            values: ChannelValues::Vector3(values),
        }
    }

    #[must_use]
    pub fn rotation(target_node: usize, times: Vec<f32>, values: Vec<Quat>) -> Self {
        Self {
            target_node,
            property: TargetPath::Rotation,
            times,
            values: ChannelValues::Quaternion(values),
        }
    }
}
