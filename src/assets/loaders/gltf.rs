//! glTF Decoding Adapter
//!
//! Turns a glTF 2.0 document into an [`AssetDescription`]. Only what the
//! animator consumes is read: node hierarchy and transforms, `POSITION`,
//! `NORMAL` and index accessors, scenes and TRS animation channels.
//! Materials, textures, skins and morph targets are ignored.
//!
//! Nothing is validated here beyond what the `gltf` crate already checks;
//! missing accessors show up as `None` and are rejected by
//! [`AssetModel::load`](crate::assets::AssetModel::load).

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use gltf::animation::Interpolation;
use gltf::mesh::util::ReadIndices;

use crate::animation::binding::TargetPath;
use crate::assets::description::{
    AssetDescription, ChannelDescription, ChannelValues, ClipDescription, NodeDescription,
    PrimitiveDescription, SceneDescription,
};
use crate::errors::MythAnimatorError;
use crate::resources::mesh::IndexData;
use crate::scene::transform::Transform;

pub struct GltfLoader<'a> {
    buffers: &'a [gltf::buffer::Data],
}

impl<'a> GltfLoader<'a> {
    /// Imports a `.gltf` / `.glb` file, resolving external buffers next to it.
    ///
    /// Images are never resolved or decoded.
    pub fn load_file(path: impl AsRef<Path>) -> Result<AssetDescription, MythAnimatorError> {
        let path = path.as_ref();
        let asset = gltf::Gltf::open(path)?;
        let buffers = gltf::import_buffers(&asset.document, path.parent(), asset.blob)?;

        let mut desc = GltfLoader::describe(&asset.document, &buffers);
        if desc.name.is_none() {
            desc.name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        }
        Ok(desc)
    }

    /// Imports a glTF document from memory. External buffers must be data URIs
    /// or the GLB binary chunk. Images are never resolved or decoded.
    pub fn load_slice(bytes: &[u8]) -> Result<AssetDescription, MythAnimatorError> {
        let asset = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&asset.document, None, asset.blob)?;
        Ok(GltfLoader::describe(&asset.document, &buffers))
    }

    /// Converts an already imported document.
    #[must_use]
    pub fn describe(document: &gltf::Document, buffers: &'a [gltf::buffer::Data]) -> AssetDescription {
        let loader = Self { buffers };

        let nodes = document.nodes().map(|n| loader.describe_node(&n)).collect();

        let scenes = document
            .scenes()
            .map(|s| SceneDescription {
                name: s.name().map(str::to_string),
                roots: s.nodes().map(|n| n.index()).collect(),
            })
            .collect();

        let clips = document
            .animations()
            .map(|a| loader.describe_animation(&a))
            .collect();

        AssetDescription {
            name: None,
            nodes,
            scenes,
            default_scene: document.default_scene().map(|s| s.index()),
            clips,
        }
    }

    fn buffer_data(&self, buffer: &gltf::Buffer<'_>) -> Option<&'a [u8]> {
        self.buffers.get(buffer.index()).map(|data| data.0.as_slice())
    }

    fn describe_node(&self, node: &gltf::Node<'_>) -> NodeDescription {
        let transform = match node.transform() {
            gltf::scene::Transform::Matrix { matrix } => {
                Transform::from_matrix(Mat4::from_cols_array_2d(&matrix))
            }
            gltf::scene::Transform::Decomposed {
                translation,
                rotation,
                scale,
            } => Transform::from_trs(
                Vec3::from_array(translation),
                Quat::from_array(rotation),
                Vec3::from_array(scale),
            ),
        };

        let primitives = node
            .mesh()
            .map(|mesh| {
                mesh.primitives()
                    .map(|p| self.describe_primitive(&p))
                    .collect()
            })
            .unwrap_or_default();

        NodeDescription {
            name: node.name().map(str::to_string),
            transform,
            children: node.children().map(|c| c.index()).collect(),
            primitives,
        }
    }

    fn describe_primitive(&self, primitive: &gltf::Primitive<'_>) -> PrimitiveDescription {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "Primitive {} uses {:?}; indices are passed through as a triangle list",
                primitive.index(),
                primitive.mode()
            );
        }

        let reader = primitive.reader(|buffer| self.buffer_data(&buffer));

        let indices = reader.read_indices().map(|read| match read {
            ReadIndices::U8(iter) => IndexData::U8(iter.collect()),
            ReadIndices::U16(iter) => IndexData::U16(iter.collect()),
            ReadIndices::U32(iter) => IndexData::U32(iter.collect()),
        });

        PrimitiveDescription {
            positions: reader.read_positions().map(Iterator::collect),
            normals: reader.read_normals().map(Iterator::collect),
            indices,
        }
    }

    fn describe_animation(&self, animation: &gltf::Animation<'_>) -> ClipDescription {
        let name = animation
            .name()
            .map_or_else(|| format!("animation_{}", animation.index()), str::to_string);

        let mut channels = Vec::new();
        for channel in animation.channels() {
            let reader = channel.reader(|buffer| self.buffer_data(&buffer));
            let target_node = channel.target().node().index();
            let interpolation = channel.sampler().interpolation();

            let times: Vec<f32> = reader
                .read_inputs()
                .map(Iterator::collect)
                .unwrap_or_default();

            let Some(outputs) = reader.read_outputs() else {
                log::warn!("Clip '{name}': channel on node {target_node} has no output data");
                continue;
            };

            let (property, values) = match outputs {
                ReadOutputs::Translations(iter) => (
                    TargetPath::Translation,
                    ChannelValues::Vector3(keyframe_values(iter.map(Vec3::from_array), interpolation)),
                ),
                ReadOutputs::Scales(iter) => (
                    TargetPath::Scale,
                    ChannelValues::Vector3(keyframe_values(iter.map(Vec3::from_array), interpolation)),
                ),
                ReadOutputs::Rotations(rotations) => (
                    TargetPath::Rotation,
                    ChannelValues::Quaternion(keyframe_values(
                        rotations.into_f32().map(Quat::from_array),
                        interpolation,
                    )),
                ),
                ReadOutputs::MorphTargetWeights(weights) => {
                    let weights = keyframe_values(weights.into_f32(), interpolation);
                    if weights.len() != times.len() {
                        log::debug!(
                            "Clip '{name}': skipping multi-target morph weights on node {target_node}"
                        );
                        continue;
                    }
                    (TargetPath::Weights, ChannelValues::Scalar(weights))
                }
            };

            channels.push(ChannelDescription {
                target_node,
                property,
                times,
                values,
            });
        }

        ClipDescription { name, channels }
    }
}

/// Collapses sampler outputs to one value per keyframe.
///
/// Step samplers are sampled linearly. Cubic spline samplers store
/// `(in_tangent, value, out_tangent)` triplets; only the values are kept.
fn keyframe_values<T>(iter: impl Iterator<Item = T>, interpolation: Interpolation) -> Vec<T> {
    match interpolation {
        Interpolation::Linear => iter.collect(),
        Interpolation::Step => {
            log::warn!("STEP interpolation is sampled linearly");
            iter.collect()
        }
        Interpolation::CubicSpline => {
            log::warn!("CUBICSPLINE interpolation is reduced to its keyframe values");
            iter.skip(1).step_by(3).collect()
        }
    }
}
