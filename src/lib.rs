#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Keyframe animation playback and scene-graph traversal.
//!
//! Load an asset once into a shared, immutable [`AssetModel`], create one
//! [`AnimatedInstance`] per placed object, then every frame call
//! [`AnimatedInstance::advance`] followed by [`AnimatedInstance::draw`].
//!
//! ```rust,ignore
//! let model = Arc::new(AssetModel::load(GltfLoader::load_file("robot.glb")?)?);
//! let mut robot = AnimatedInstance::new(model.clone());
//! robot.play(1)?;
//!
//! // per frame
//! robot.advance(dt)?;
//! robot.draw(Placement::at(Vec3::X).world_matrix(), |draw| {
//!     renderer.submit(draw.mesh, draw.world_matrix_as_mat4(), draw.normal_matrix);
//! });
//! ```

pub mod resources;
pub mod assets;
pub mod scene;
pub mod errors;
pub mod settings;
pub mod animation;

pub use resources::{IndexData, MeshPrimitive, Vertex};
pub use assets::{AssetDescription, AssetModel};
pub use scene::{AnimatedInstance, DrawSubmission, Node, Placement, SceneObject, Transform};
pub use errors::{AssetLoadError, MalformedAssetError, MythAnimatorError, PlaybackError};
pub use settings::LoadSettings;
pub use animation::{AnimationClip, AnimationPlayer, PlaybackState, TargetPath};

#[cfg(feature = "gltf")]
pub use assets::GltfLoader;
