use crate::resources::mesh::MeshIndex;
use crate::scene::NodeIndex;
use crate::scene::transform::Transform;

/// One element of an asset's node forest.
///
/// # Design Principles
///
/// - Nodes live in a flat arena owned by the [`AssetModel`] and are addressed
///   by [`NodeIndex`]; hierarchy edges are index lists, never pointers
/// - `parent` is a lookup only; ownership flows from the arena
/// - The transform stored here is the rest pose. Animated state lives in each
///   instance's own pose buffer, so a `Node` is never mutated after load
///
/// [`AssetModel`]: crate::assets::AssetModel
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Option<String>,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,

    // === Spatial Data ===
    /// Rest-pose local transform.
    pub transform: Transform,

    // === Geometry ===
    /// Primitives drawn at this node, as indices into the model's mesh list.
    pub(crate) meshes: Vec<MeshIndex>,
}

impl Node {
    #[must_use]
    pub fn new(transform: Transform) -> Self {
        Self {
            name: None,
            parent: None,
            children: Vec::new(),
            transform,
            meshes: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[MeshIndex] {
        &self.meshes
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(Transform::IDENTITY)
    }
}
