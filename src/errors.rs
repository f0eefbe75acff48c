//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! Errors are split by the stage that raises them:
//! - [`MalformedAssetError`]: the mesh buffer builder or the channel validator
//!   rejected inconsistent array data
//! - [`AssetLoadError`]: the asset description is structurally unusable
//!   (no scene, missing attributes, broken hierarchy)
//! - [`PlaybackError`]: a playback call violated its contract
//!
//! Load errors are always fatal for the asset being loaded: no partially
//! built model is ever returned. Playback errors leave the instance exactly
//! as it was before the call.
//!
//! [`MythAnimatorError`] wraps all of them for callers that just want `?`.
//!
//! ```rust,ignore
//! use myth_animator::errors::Result;
//!
//! fn spawn(desc: AssetDescription) -> Result<AnimatedInstance> {
//!     let model = Arc::new(AssetModel::load(desc)?);
//!     let mut instance = AnimatedInstance::new(model);
//!     instance.play(0)?;
//!     Ok(instance)
//! }
//! ```

use thiserror::Error;

/// Array-level inconsistencies found while building buffers or tracks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedAssetError {
    /// Position and normal arrays must describe the same vertices.
    #[error("attribute length mismatch: {positions} positions vs {normals} normals")]
    AttributeLengthMismatch { positions: usize, normals: usize },

    /// An index points past the end of the vertex array.
    #[error("index out of range at slot {slot}: {index} >= vertex count {vertex_count}")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Only 16-bit and 32-bit unsigned index components are accepted.
    #[error("unsupported index encoding: {0}")]
    UnsupportedIndexEncoding(&'static str),

    /// Keyframe times and values are parallel arrays.
    #[error("keyframe count mismatch: {times} times vs {values} values")]
    KeyframeCountMismatch { times: usize, values: usize },

    /// A channel needs at least one keyframe.
    #[error("animation channel has no keyframes")]
    EmptyChannel,

    /// Keyframe times must be non-decreasing.
    #[error("keyframe times are not sorted (key {index}: {time} < {previous})")]
    UnsortedKeyframes {
        index: usize,
        time: f32,
        previous: f32,
    },

    /// The value array type does not fit the animated property.
    #[error("channel targeting {property} carries {found} values")]
    ChannelValueType {
        property: &'static str,
        found: &'static str,
    },
}

/// Structural failures while turning an asset description into an [`AssetModel`].
///
/// [`AssetModel`]: crate::assets::AssetModel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetLoadError {
    /// The description declares no scene at all.
    #[error("asset has no scene")]
    NoScene,

    /// An explicitly requested scene does not exist.
    #[error("scene {index} not found (asset declares {count} scenes)")]
    SceneNotFound { index: usize, count: usize },

    /// The selected scene has no root nodes.
    #[error("scene {scene} has no root nodes")]
    NoSceneRoot { scene: usize },

    #[error("node {node} primitive {primitive}: POSITION attribute missing")]
    MissingPositions { node: usize, primitive: usize },

    #[error("node {node} primitive {primitive}: NORMAL attribute missing")]
    MissingNormals { node: usize, primitive: usize },

    #[error("node {node} primitive {primitive}: index accessor missing")]
    MissingIndices { node: usize, primitive: usize },

    /// A root or child reference is outside the node array.
    #[error("node index {index} out of range (asset declares {count} nodes)")]
    NodeIndexOutOfRange { index: usize, count: usize },

    /// A node was reached twice from the scene roots: a cycle or a shared child.
    #[error("node {node} is reachable more than once; the hierarchy is not a forest")]
    NodeVisitedTwice { node: usize },

    /// An animation channel targets a node that does not exist.
    #[error("clip '{clip}' channel {channel}: target node {node} out of range")]
    ChannelTargetOutOfRange {
        clip: String,
        channel: usize,
        node: usize,
    },

    #[error("node {node} primitive {primitive}: {source}")]
    MalformedPrimitive {
        node: usize,
        primitive: usize,
        #[source]
        source: MalformedAssetError,
    },

    #[error("clip '{clip}' channel {channel}: {source}")]
    MalformedChannel {
        clip: String,
        channel: usize,
        #[source]
        source: MalformedAssetError,
    },
}

/// Contract violations reported by the animation player.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PlaybackError {
    /// The clip index is outside the model's clip catalogue.
    #[error("invalid animation index {index} (model has {count} clips)")]
    InvalidAnimationIndex { index: usize, count: usize },

    /// Elapsed time must never be negative.
    #[error("negative delta time: {0}")]
    NegativeDeltaTime(f32),

    /// Elapsed time must be a finite number (NaN and +inf are rejected).
    #[error("non-finite delta time: {0}")]
    NonFiniteDeltaTime(f32),
}

/// The umbrella error type for the crate.
#[derive(Error, Debug)]
pub enum MythAnimatorError {
    #[error(transparent)]
    Malformed(#[from] MalformedAssetError),

    #[error(transparent)]
    AssetLoad(#[from] AssetLoadError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// No clip carries the requested name.
    #[error("animation clip not found: {0}")]
    ClipNotFound(String),

    /// glTF decoding error raised by the container parser.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),
}

/// Alias for `Result<T, MythAnimatorError>`.
pub type Result<T> = std::result::Result<T, MythAnimatorError>;
