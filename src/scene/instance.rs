use std::sync::Arc;

use glam::Affine3A;

use crate::animation::player::{AnimationPlayer, PlaybackState};
use crate::assets::AssetModel;
use crate::errors::{MythAnimatorError, PlaybackError};
use crate::scene::NodeIndex;
use crate::scene::transform::Transform;
use crate::scene::transform_system::{self, DrawSubmission};

/// One playable instantiation of a shared [`AssetModel`].
///
/// The model (hierarchy, meshes, clips) is shared read-only through an `Arc`.
/// Everything that changes per frame, the playhead and the local transform
/// of every node, is owned here, so instances sharing a model never alias
/// animation state.
///
/// Per frame: [`advance`](Self::advance) first, then
/// [`draw`](Self::draw) / [`traverse`](Self::traverse). Both run to
/// completion on the calling thread; an instance used from several threads
/// must be synchronized externally.
#[derive(Debug, Clone)]
pub struct AnimatedInstance {
    model: Arc<AssetModel>,
    player: AnimationPlayer,
    pose: Vec<Transform>,
}

impl AnimatedInstance {
    /// Creates an instance in the rest pose. Starts clip 0 if the model was
    /// loaded with autoplay and has clips.
    #[must_use]
    pub fn new(model: Arc<AssetModel>) -> Self {
        let pose = model.rest_pose();
        let player = if model.autoplay() && !model.clips().is_empty() {
            log::debug!("Autoplaying clip 0 '{}'", model.clips()[0].name);
            AnimationPlayer::starting_at(0)
        } else {
            AnimationPlayer::new()
        };

        Self {
            model,
            player,
            pose,
        }
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &Arc<AssetModel> {
        &self.model
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.player.state()
    }

    #[inline]
    #[must_use]
    pub fn current_clip(&self) -> Option<usize> {
        self.player.current_clip()
    }

    #[inline]
    #[must_use]
    pub fn playhead(&self) -> Option<f32> {
        self.player.playhead()
    }

    /// Per-node local transforms, indexed by [`NodeIndex`].
    #[inline]
    #[must_use]
    pub fn pose(&self) -> &[Transform] {
        &self.pose
    }

    #[inline]
    #[must_use]
    pub fn local_transform(&self, node: NodeIndex) -> Option<&Transform> {
        self.pose.get(node)
    }

    /// (Re)starts clip `index` from time 0.
    pub fn play(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.player.play(self.model.clips(), index)
    }

    /// Starts the first clip named `name`.
    pub fn play_named(&mut self, name: &str) -> Result<(), MythAnimatorError> {
        let index = self
            .model
            .clip_index(name)
            .ok_or_else(|| MythAnimatorError::ClipNotFound(name.to_string()))?;
        self.play(index)?;
        Ok(())
    }

    /// Stops playback. The last sampled pose is kept.
    pub fn stop(&mut self) {
        self.player.stop();
    }

    /// Restores every node to the model's rest pose.
    pub fn reset_pose(&mut self) {
        for (slot, node) in self.pose.iter_mut().zip(self.model.nodes()) {
            *slot = node.transform;
        }
    }

    /// Advances the playhead by `dt` seconds and resamples the active clip.
    pub fn advance(&mut self, dt: f32) -> Result<(), PlaybackError> {
        self.player.advance(self.model.clips(), dt, &mut self.pose)
    }

    /// Streams draw submissions to `submit`, in traversal order.
    pub fn draw<'a, F>(&'a self, base_world: Affine3A, submit: F)
    where
        F: FnMut(DrawSubmission<'a>),
    {
        transform_system::traverse(&self.model, &self.pose, base_world, submit);
    }

    /// Collects the draw submissions of this frame.
    #[must_use]
    pub fn traverse(&self, base_world: Affine3A) -> Vec<DrawSubmission<'_>> {
        let mut submissions = Vec::with_capacity(self.model.meshes().len());
        self.draw(base_world, |s| submissions.push(s));
        submissions
    }

    /// World matrix of every node for the current pose.
    #[must_use]
    pub fn world_matrices(&self, base_world: Affine3A) -> Vec<Option<Affine3A>> {
        transform_system::compute_world_matrices(&self.model, &self.pose, base_world)
    }
}
