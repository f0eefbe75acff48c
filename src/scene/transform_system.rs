//! Transform System
//!
//! Walks an asset's node forest, composes world matrices from a pose buffer
//! and emits one [`DrawSubmission`] per mesh primitive.
//!
//! # Composition Order
//!
//! glam matrices act on column vectors, so the world matrix of a node is
//! `parent_world * local`: the local transform is applied first, in the
//! node's own frame, and the result is then placed into the parent's frame.
//! For a root, the parent is the caller-supplied `base_world`. In row-vector
//! notation this is the familiar `local * parent_world`.
//!
//! # Traversal
//!
//! Depth-first, pre-order, roots in declaration order and children in the
//! order stored on the node. The walk uses an explicit stack, so arbitrarily
//! deep hierarchies cannot overflow the call stack. Nothing is mutated.

use glam::{Affine3A, Mat3, Mat4};

use crate::assets::AssetModel;
use crate::resources::mesh::{MeshIndex, MeshPrimitive};
use crate::scene::NodeIndex;
use crate::scene::transform::Transform;

/// One draw call handed to the renderer.
///
/// Borrowed from the model; consume it immediately.
#[derive(Debug, Clone, Copy)]
pub struct DrawSubmission<'a> {
    pub node: NodeIndex,
    pub mesh_index: MeshIndex,
    pub mesh: &'a MeshPrimitive,
    pub world_matrix: Affine3A,
    /// Inverse-transpose of the upper-left 3x3 of `world_matrix`.
    pub normal_matrix: Mat3,
}

impl DrawSubmission<'_> {
    /// World matrix as `Mat4`, for uniform upload.
    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }
}

/// Normal matrix of `world`: inverse-transpose of its linear part.
///
/// Keeps normals perpendicular to surfaces under non-uniform scale. The
/// linear part is normalized by its largest entry before inversion, so the
/// singularity test is independent of overall scale: a node scaled down to
/// `1e-13` still gets its exact inverse-transpose. A singular linear part
/// (zero scale on some axis) yields the identity.
#[must_use]
pub fn normal_matrix(world: &Affine3A) -> Mat3 {
    let linear = Mat3::from(world.matrix3);
    let largest = linear
        .abs()
        .to_cols_array()
        .into_iter()
        .fold(0.0_f32, f32::max);
    if largest == 0.0 || !largest.is_finite() {
        return Mat3::IDENTITY;
    }

    let inv_largest = largest.recip();
    let unit = linear * inv_largest;
    let det = unit.determinant();
    if !det.is_finite() || det.abs() <= SINGULAR_EPSILON {
        return Mat3::IDENTITY;
    }

    // inverse(L) = inverse(L / s) / s
    let inverse = unit.inverse() * inv_largest;
    if !inverse.is_finite() {
        return Mat3::IDENTITY;
    }
    inverse.transpose()
}

/// Determinant threshold for a linear part whose largest entry is 1.
const SINGULAR_EPSILON: f32 = 1e-6;

/// Visits every node reachable from the model's roots with its world matrix.
///
/// `pose` supplies local transforms by node index; nodes beyond its length
/// fall back to the rest pose stored on the node.
pub fn walk_hierarchy<F>(model: &AssetModel, pose: &[Transform], base_world: Affine3A, mut visit: F)
where
    F: FnMut(NodeIndex, &Affine3A),
{
    let nodes = model.nodes();

    // Work stack: (node, parent world matrix)
    let mut stack: Vec<(NodeIndex, Affine3A)> = Vec::with_capacity(64);
    for &root in model.roots().iter().rev() {
        stack.push((root, base_world));
    }

    while let Some((index, parent_world)) = stack.pop() {
        let Some(node) = nodes.get(index) else {
            continue;
        };

        let local = pose.get(index).unwrap_or(&node.transform).local_matrix();
        let world = parent_world * local;

        visit(index, &world);

        // Push in reverse to keep declaration order
        for &child in node.children().iter().rev() {
            stack.push((child, world));
        }
    }
}

/// Emits one [`DrawSubmission`] per mesh primitive, in traversal order.
pub fn traverse<'a, F>(model: &'a AssetModel, pose: &[Transform], base_world: Affine3A, mut submit: F)
where
    F: FnMut(DrawSubmission<'a>),
{
    walk_hierarchy(model, pose, base_world, move |index, world| {
        let node = &model.nodes()[index];
        if node.meshes().is_empty() {
            return;
        }

        let normal = normal_matrix(world);
        for &mesh_index in node.meshes() {
            let Some(mesh) = model.mesh(mesh_index) else {
                continue;
            };
            submit(DrawSubmission {
                node: index,
                mesh_index,
                mesh,
                world_matrix: *world,
                normal_matrix: normal,
            });
        }
    });
}

/// World matrix of every node; `None` for nodes the scene roots do not reach.
#[must_use]
pub fn compute_world_matrices(
    model: &AssetModel,
    pose: &[Transform],
    base_world: Affine3A,
) -> Vec<Option<Affine3A>> {
    let mut worlds = vec![None; model.nodes().len()];
    walk_hierarchy(model, pose, base_world, |index, world| {
        worlds[index] = Some(*world);
    });
    worlds
}
