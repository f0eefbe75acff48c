use glam::{Affine3A, Mat4, Quat, Vec3};

/// Local transform of a node: translation, rotation and scale.
///
/// Nodes authored with a full matrix keep that matrix verbatim, so a node
/// that is never animated recomposes exactly (including shear the TRS
/// decomposition cannot express). Writing any single component switches the
/// transform to TRS composition, with the other two components taken from
/// the decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    /// Authored matrix, valid until a component is written.
    matrix: Option<Affine3A>,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        matrix: None,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[must_use]
    pub fn from_trs(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            matrix: None,
        }
    }

    /// Keeps `mat` as the exact local matrix and decomposes it for animation.
    #[must_use]
    pub fn from_matrix(mat: Mat4) -> Self {
        let affine = Affine3A::from_mat4(mat);
        let (scale, rotation, position) = affine.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
            matrix: Some(affine),
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.matrix = None;
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.matrix = None;
    }

    #[inline]
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.matrix = None;
    }

    /// `true` while the authored matrix is still in use.
    #[inline]
    #[must_use]
    pub fn is_matrix(&self) -> bool {
        self.matrix.is_some()
    }

    /// Local-to-parent matrix (scale, then rotation, then translation).
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        self.matrix.unwrap_or_else(|| {
            Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
