use rustc_hash::FxHashMap;

use crate::animation::clip::AnimationClip;
use crate::assets::description::AssetDescription;
use crate::assets::loader::ModelLoader;
use crate::errors::AssetLoadError;
use crate::resources::mesh::{MeshIndex, MeshPrimitive};
use crate::scene::NodeIndex;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::settings::LoadSettings;

/// The loaded, immutable description of one asset.
///
/// Holds the node arena, the mesh primitives attached to nodes and the clip
/// catalogue. An `AssetModel` is never mutated after loading; share it
/// between instances with an `Arc` and give each instance its own pose
/// buffer (see [`AnimatedInstance`](crate::scene::AnimatedInstance)).
#[derive(Debug, Clone)]
pub struct AssetModel {
    pub(crate) name: Option<String>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeIndex>,
    pub(crate) meshes: Vec<MeshPrimitive>,
    pub(crate) clips: Vec<AnimationClip>,
    pub(crate) autoplay: bool,

    pub(crate) node_lookup: FxHashMap<String, NodeIndex>,
    pub(crate) clip_lookup: FxHashMap<String, usize>,
}

impl AssetModel {
    /// Loads a model with [`LoadSettings::default`].
    pub fn load(desc: AssetDescription) -> Result<Self, AssetLoadError> {
        Self::load_with(desc, &LoadSettings::default())
    }

    /// Loads a model. Any structural or array-level problem fails the whole
    /// load; no partially built model is returned.
    pub fn load_with(desc: AssetDescription, settings: &LoadSettings) -> Result<Self, AssetLoadError> {
        ModelLoader::new(settings).load(desc)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Every node of the asset, indexed by [`NodeIndex`].
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Root nodes of the loaded scene, in declaration order.
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[MeshPrimitive] {
        &self.meshes
    }

    #[inline]
    #[must_use]
    pub fn mesh(&self, index: MeshIndex) -> Option<&MeshPrimitive> {
        self.meshes.get(index)
    }

    #[inline]
    #[must_use]
    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }

    #[inline]
    #[must_use]
    pub fn clip(&self, index: usize) -> Option<&AnimationClip> {
        self.clips.get(index)
    }

    /// Index of the first clip named `name`.
    #[must_use]
    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clip_lookup.get(name).copied()
    }

    /// Index of the first node named `name`.
    #[must_use]
    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_lookup.get(name).copied()
    }

    /// Whether new instances start playing clip 0.
    #[must_use]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Rest-pose local transforms, indexed by node.
    #[must_use]
    pub fn rest_pose(&self) -> Vec<Transform> {
        self.nodes.iter().map(|n| n.transform).collect()
    }

    /// First primitive of the first mesh-bearing node in traversal order.
    ///
    /// Convenience for static single-mesh assets.
    #[must_use]
    pub fn first_primitive(&self) -> Option<&MeshPrimitive> {
        self.meshes.first()
    }
}
