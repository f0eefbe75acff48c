//! GPU-independent geometry resources.

pub mod mesh;

pub use mesh::{IndexData, MeshIndex, MeshPrimitive, Vertex};
