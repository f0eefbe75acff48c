//! Asset Model Loader
//!
//! Builds an [`AssetModel`] from an [`AssetDescription`]:
//!
//! 1. Select the scene (explicit setting, then the declared default, then the
//!    first scene)
//! 2. Walk the hierarchy from every root, depth-first, visiting each node
//!    exactly once and building its mesh primitives
//! 3. Validate and convert animation channels into typed keyframe tracks
//!
//! Loading is fail-fast: the first problem aborts with an [`AssetLoadError`].

use rustc_hash::FxHashMap;

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::tracks::KeyframeTrack;
use crate::assets::description::{
    AssetDescription, ChannelDescription, ChannelValues, ClipDescription, PrimitiveDescription,
};
use crate::assets::model::AssetModel;
use crate::errors::{AssetLoadError, MalformedAssetError};
use crate::resources::mesh::MeshPrimitive;
use crate::scene::NodeIndex;
use crate::scene::node::Node;
use crate::settings::LoadSettings;

pub(crate) struct ModelLoader<'a> {
    settings: &'a LoadSettings,
    nodes: Vec<Node>,
    meshes: Vec<MeshPrimitive>,
}

impl<'a> ModelLoader<'a> {
    pub(crate) fn new(settings: &'a LoadSettings) -> Self {
        Self {
            settings,
            nodes: Vec::new(),
            meshes: Vec::new(),
        }
    }

    pub(crate) fn load(mut self, desc: AssetDescription) -> Result<AssetModel, AssetLoadError> {
        let scene_index = self.select_scene(&desc)?;
        let roots = desc.scenes[scene_index].roots.clone();
        if roots.is_empty() {
            return Err(AssetLoadError::NoSceneRoot { scene: scene_index });
        }

        self.nodes = desc
            .nodes
            .iter()
            .map(|d| {
                let mut node = Node::new(d.transform);
                node.name.clone_from(&d.name);
                node
            })
            .collect();

        let visited = self.build_hierarchy(&desc, &roots)?;
        if visited < self.nodes.len() {
            log::debug!(
                "{} of {} nodes are not reachable from scene {scene_index}",
                self.nodes.len() - visited,
                self.nodes.len()
            );
        }

        let node_count = self.nodes.len();
        let clips = desc
            .clips
            .into_iter()
            .map(|clip| load_clip(clip, node_count))
            .collect::<Result<Vec<_>, _>>()?;

        let mut node_lookup = FxHashMap::default();
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(name) = &node.name {
                node_lookup.entry(name.clone()).or_insert(index);
            }
        }

        let mut clip_lookup = FxHashMap::default();
        for (index, clip) in clips.iter().enumerate() {
            clip_lookup.entry(clip.name.clone()).or_insert(index);
        }

        log::info!(
            "Loaded model '{}': {} nodes, {} roots, {} primitives, {} clips",
            desc.name.as_deref().unwrap_or("<unnamed>"),
            self.nodes.len(),
            roots.len(),
            self.meshes.len(),
            clips.len()
        );

        Ok(AssetModel {
            name: desc.name,
            nodes: self.nodes,
            roots,
            meshes: self.meshes,
            clips,
            autoplay: self.settings.autoplay,
            node_lookup,
            clip_lookup,
        })
    }

    fn select_scene(&self, desc: &AssetDescription) -> Result<usize, AssetLoadError> {
        let count = desc.scenes.len();
        if count == 0 {
            return Err(AssetLoadError::NoScene);
        }

        let index = self.settings.scene.or(desc.default_scene).unwrap_or(0);
        if index >= count {
            return Err(AssetLoadError::SceneNotFound { index, count });
        }
        Ok(index)
    }

    /// Depth-first walk with an explicit stack. Returns the number of nodes visited.
    fn build_hierarchy(
        &mut self,
        desc: &AssetDescription,
        roots: &[NodeIndex],
    ) -> Result<usize, AssetLoadError> {
        let count = self.nodes.len();
        let mut visited = vec![false; count];
        let mut visited_count = 0;

        // (node, parent)
        let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = Vec::with_capacity(64);
        for &root in roots.iter().rev() {
            stack.push((root, None));
        }

        while let Some((index, parent)) = stack.pop() {
            if index >= count {
                return Err(AssetLoadError::NodeIndexOutOfRange { index, count });
            }
            if visited[index] {
                return Err(AssetLoadError::NodeVisitedTwice { node: index });
            }
            visited[index] = true;
            visited_count += 1;

            let node_desc = &desc.nodes[index];

            for (primitive, prim_desc) in node_desc.primitives.iter().enumerate() {
                let mesh = build_primitive(prim_desc, index, primitive)?;
                log::debug!(
                    "Node {index} primitive {primitive}: {} vertices, {} triangles",
                    mesh.vertex_count(),
                    mesh.triangle_count()
                );
                self.nodes[index].meshes.push(self.meshes.len());
                self.meshes.push(mesh);
            }

            let node = &mut self.nodes[index];
            node.parent = parent;
            node.children.clone_from(&node_desc.children);

            for &child in node_desc.children.iter().rev() {
                stack.push((child, Some(index)));
            }
        }

        Ok(visited_count)
    }
}

fn build_primitive(
    desc: &PrimitiveDescription,
    node: NodeIndex,
    primitive: usize,
) -> Result<MeshPrimitive, AssetLoadError> {
    let positions = desc
        .positions
        .as_deref()
        .ok_or(AssetLoadError::MissingPositions { node, primitive })?;
    let normals = desc
        .normals
        .as_deref()
        .ok_or(AssetLoadError::MissingNormals { node, primitive })?;
    let indices = desc
        .indices
        .as_ref()
        .ok_or(AssetLoadError::MissingIndices { node, primitive })?;

    MeshPrimitive::build(positions, normals, indices).map_err(|source| {
        AssetLoadError::MalformedPrimitive {
            node,
            primitive,
            source,
        }
    })
}

fn load_clip(clip: ClipDescription, node_count: usize) -> Result<AnimationClip, AssetLoadError> {
    let ClipDescription { name, channels } = clip;
    let mut tracks = Vec::with_capacity(channels.len());

    for (channel_index, channel) in channels.into_iter().enumerate() {
        if channel.target_node >= node_count {
            return Err(AssetLoadError::ChannelTargetOutOfRange {
                clip: name,
                channel: channel_index,
                node: channel.target_node,
            });
        }

        if channel.property == TargetPath::Weights {
            log::debug!("Clip '{name}' channel {channel_index}: morph weights are kept but not applied");
        }

        match build_track(channel) {
            Ok(track) => tracks.push(track),
            Err(source) => {
                return Err(AssetLoadError::MalformedChannel {
                    clip: name,
                    channel: channel_index,
                    source,
                });
            }
        }
    }

    let clip = AnimationClip::new(name, tracks);
    if clip.duration <= 0.0 {
        log::warn!("Clip '{}' has zero duration; it will hold a static pose", clip.name);
    } else {
        log::debug!(
            "Clip '{}': {} tracks, {:.3}s",
            clip.name,
            clip.tracks.len(),
            clip.duration
        );
    }
    Ok(clip)
}

fn build_track(channel: ChannelDescription) -> Result<Track, MalformedAssetError> {
    let ChannelDescription {
        target_node,
        property,
        times,
        values,
    } = channel;

    let data = match (property, values) {
        (TargetPath::Translation | TargetPath::Scale, ChannelValues::Vector3(v)) => {
            TrackData::Vector3(KeyframeTrack::new(times, v)?)
        }
        (TargetPath::Rotation, ChannelValues::Quaternion(v)) => {
            TrackData::Quaternion(KeyframeTrack::new(times, v)?)
        }
        (TargetPath::Weights, ChannelValues::Scalar(v)) => {
            TrackData::Scalar(KeyframeTrack::new(times, v)?)
        }
        (property, values) => {
            return Err(MalformedAssetError::ChannelValueType {
                property: property.as_str(),
                found: values.kind(),
            });
        }
    };

    Ok(Track {
        meta: TrackMeta {
            node: target_node,
            target: property,
        },
        data,
    })
}
