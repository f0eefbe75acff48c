use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;
use crate::scene::NodeIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMeta {
    pub node: NodeIndex,
    pub target: TargetPath,
}

/// Keyframe data, tagged by value type so the blend rule is chosen once per
/// track instead of once per node per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
    Scalar(KeyframeTrack<f32>),
}

impl TrackData {
    #[must_use]
    pub fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(track) => track.end_time(),
            TrackData::Quaternion(track) => track.end_time(),
            TrackData::Scalar(track) => track.end_time(),
        }
    }
}

/// Complete track definition: metadata plus keyframe data.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Largest keyframe end time across all tracks, in seconds.
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: String, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);

        Self {
            name,
            duration,
            tracks,
        }
    }
}
