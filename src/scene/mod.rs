//! Scene graph module
//!
//! - Node: arena node (hierarchy, rest transform, attached meshes)
//! - Transform: local TRS transform
//! - TransformSystem: world-matrix composition and draw submission
//! - AnimatedInstance: shared model plus per-instance pose and playhead
//! - Placement / SceneObject: world placement of an instance

pub mod node;
pub mod transform;
pub mod transform_system;
pub mod instance;
pub mod placement;

pub use node::Node;
pub use transform::Transform;
pub use transform_system::DrawSubmission;
pub use instance::AnimatedInstance;
pub use placement::{Placement, SceneObject};

/// Stable index of a node within its owning model.
pub type NodeIndex = usize;
