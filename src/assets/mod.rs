pub mod description;
mod loader;
pub mod loaders;
pub mod model;

pub use description::{
    AssetDescription, ChannelDescription, ChannelValues, ClipDescription, NodeDescription,
    PrimitiveDescription, SceneDescription,
};
pub use model::AssetModel;

#[cfg(feature = "gltf")]
pub use loaders::GltfLoader;
