//! Mesh Buffer Builder
//!
//! Converts the planar attribute arrays handed over by the asset decoder into
//! a GPU-ready interleaved vertex buffer plus a 32-bit index buffer.
//!
//! # Vertex Layout
//!
//! | Offset | Attribute | Format      |
//! |--------|-----------|-------------|
//! | 0      | position  | `f32 x 3`   |
//! | 12     | normal    | `f32 x 3`   |
//!
//! Stride: 24 bytes. Vertex order is preserved, so source indices remain valid.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::errors::MalformedAssetError;

pub type MeshIndex = usize;

/// One interleaved vertex record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Size of one vertex record in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    #[inline]
    #[must_use]
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    #[must_use]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Index array as decoded from the source container, tagged by component width.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            IndexData::U8(v) => v.len(),
            IndexData::U16(v) => v.len(),
            IndexData::U32(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widens the indices to `u32`.
    ///
    /// 8-bit indices are rejected: only 16-bit and 32-bit unsigned components
    /// are a supported encoding.
    pub fn widen(&self) -> Result<Vec<u32>, MalformedAssetError> {
        match self {
            IndexData::U8(_) => Err(MalformedAssetError::UnsupportedIndexEncoding(
                "8-bit unsigned integer",
            )),
            IndexData::U16(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
            IndexData::U32(v) => Ok(v.clone()),
        }
    }
}

impl From<Vec<u16>> for IndexData {
    fn from(v: Vec<u16>) -> Self {
        IndexData::U16(v)
    }
}

impl From<Vec<u32>> for IndexData {
    fn from(v: Vec<u32>) -> Self {
        IndexData::U32(v)
    }
}

/// One drawable piece of geometry: interleaved vertices and a triangle list.
///
/// Owned by the [`AssetModel`](crate::assets::AssetModel) that built it and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPrimitive {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl MeshPrimitive {
    /// Builds the interleaved vertex buffer and the widened index buffer.
    ///
    /// Validation is limited to attribute lengths, index range and index
    /// encoding. Degenerate triangles are passed through untouched.
    pub fn build(
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        indices: &IndexData,
    ) -> Result<Self, MalformedAssetError> {
        if positions.len() != normals.len() {
            return Err(MalformedAssetError::AttributeLengthMismatch {
                positions: positions.len(),
                normals: normals.len(),
            });
        }

        let indices = indices.widen()?;
        let vertex_count = positions.len();

        if let Some((slot, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MalformedAssetError::IndexOutOfRange {
                slot,
                index,
                vertex_count,
            });
        }

        let vertices = positions
            .iter()
            .zip(normals)
            .map(|(&p, &n)| Vertex::new(p, n))
            .collect();

        Ok(Self { vertices, indices })
    }

    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw interleaved bytes, ready for a vertex buffer upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw `u32` index bytes, ready for an index buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// De-interleaves the position attribute.
    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// De-interleaves the normal attribute.
    pub fn normals(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_six_floats() {
        assert_eq!(Vertex::STRIDE, 24);
    }

    #[test]
    fn vertex_bytes_follow_interleaved_layout() {
        let prim = MeshPrimitive::build(
            &[[1.0, 2.0, 3.0]],
            &[[0.0, 0.0, 1.0]],
            &IndexData::U32(vec![0, 0, 0]),
        )
        .unwrap();

        let floats: &[f32] = bytemuck::cast_slice(prim.vertex_bytes());
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0]);
        assert_eq!(prim.index_bytes().len(), 12);
    }
}
