use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, TrackData};
use crate::errors::PlaybackError;
use crate::scene::transform::Transform;

/// Playback state of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackState {
    /// No clip selected.
    #[default]
    Stopped,
    /// Playing clip `clip`; `time` is always in `[0, duration)`.
    Playing { clip: usize, time: f32 },
}

/// Per-instance playhead.
///
/// The player owns no animation data: callers pass the clip catalogue and
/// the pose buffer on every call, so one shared set of clips can drive any
/// number of independent players.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    state: PlaybackState,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A player already on clip `clip` at time 0. `clip` must be a valid index.
    #[must_use]
    pub(crate) fn starting_at(clip: usize) -> Self {
        Self {
            state: PlaybackState::Playing { clip, time: 0.0 },
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn current_clip(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Playing { clip, .. } => Some(clip),
            PlaybackState::Stopped => None,
        }
    }

    /// Elapsed seconds within the current clip; `None` when stopped.
    #[must_use]
    pub fn playhead(&self) -> Option<f32> {
        match self.state {
            PlaybackState::Playing { time, .. } => Some(time),
            PlaybackState::Stopped => None,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// (Re)starts clip `index` from time 0.
    ///
    /// An out-of-range index leaves the current state untouched.
    pub fn play(&mut self, clips: &[AnimationClip], index: usize) -> Result<(), PlaybackError> {
        if index >= clips.len() {
            log::warn!("Cannot play clip {index}: only {} clips", clips.len());
            return Err(PlaybackError::InvalidAnimationIndex {
                index,
                count: clips.len(),
            });
        }

        log::debug!("Playing clip {index} '{}'", clips[index].name);
        self.state = PlaybackState::Playing {
            clip: index,
            time: 0.0,
        };
        Ok(())
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// Core logic: advance time, wrap, then sample every track into `pose`.
    ///
    /// Each track replaces only the component it animates; the other
    /// components of that node keep whatever `pose` already holds. Tracks
    /// whose property the player does not apply (morph weights) are skipped.
    ///
    /// A negative or non-finite `dt` is rejected; the playhead and the pose
    /// are left unchanged.
    pub fn advance(
        &mut self,
        clips: &[AnimationClip],
        dt: f32,
        pose: &mut [Transform],
    ) -> Result<(), PlaybackError> {
        if dt < 0.0 {
            log::warn!("Rejected negative delta time {dt}");
            return Err(PlaybackError::NegativeDeltaTime(dt));
        }
        if !dt.is_finite() {
            log::warn!("Rejected non-finite delta time {dt}");
            return Err(PlaybackError::NonFiniteDeltaTime(dt));
        }

        let PlaybackState::Playing { clip: index, time } = self.state else {
            return Ok(());
        };

        let Some(clip) = clips.get(index) else {
            self.state = PlaybackState::Stopped;
            return Err(PlaybackError::InvalidAnimationIndex {
                index,
                count: clips.len(),
            });
        };

        // Standard loop: modulo. A zero-length clip holds time 0.
        let time = if clip.duration > 0.0 {
            (time + dt) % clip.duration
        } else {
            0.0
        };
        self.state = PlaybackState::Playing { clip: index, time };

        apply_clip(clip, time, pose);
        Ok(())
    }
}

/// Samples every track of `clip` at `time` and writes the results into `pose`.
pub fn apply_clip(clip: &AnimationClip, time: f32, pose: &mut [Transform]) {
    for track in &clip.tracks {
        let Some(transform) = pose.get_mut(track.meta.node) else {
            continue;
        };

        match (&track.data, track.meta.target) {
            (TrackData::Vector3(t), TargetPath::Translation) => {
                transform.set_position(t.sample(time));
            }
            (TrackData::Vector3(t), TargetPath::Scale) => {
                transform.set_scale(t.sample(time));
            }
            (TrackData::Quaternion(t), TargetPath::Rotation) => {
                transform.set_rotation(t.sample(time));
            }
            _ => {}
        }
    }
}
