use std::sync::Arc;

use glam::{Affine3A, EulerRot, Quat, Vec3};

use crate::assets::AssetModel;
use crate::errors::PlaybackError;
use crate::scene::instance::AnimatedInstance;
use crate::scene::transform_system::DrawSubmission;

/// Where a game object sits in the world.
///
/// Produces the `base_world` matrix handed to traversal: scale first, then
/// rotation about X, Y and Z (in that order, angles in degrees), then
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Euler angles in degrees, applied X, then Y, then Z.
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl Placement {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation_degrees: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        // ZYX composes as Rz * Ry * Rx: X is applied first.
        Quat::from_euler(
            EulerRot::ZYX,
            self.rotation_degrees.z.to_radians(),
            self.rotation_degrees.y.to_radians(),
            self.rotation_degrees.x.to_radians(),
        )
    }

    #[must_use]
    pub fn world_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation(), self.position)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A named, placed, animated object.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub placement: Placement,
    pub instance: AnimatedInstance,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, model: Arc<AssetModel>, placement: Placement) -> Self {
        Self {
            name: name.into(),
            placement,
            instance: AnimatedInstance::new(model),
        }
    }

    pub fn play(&mut self, index: usize) -> Result<(), PlaybackError> {
        self.instance.play(index)
    }

    pub fn update(&mut self, dt: f32) -> Result<(), PlaybackError> {
        self.instance.advance(dt)
    }

    pub fn draw<'a, F>(&'a self, submit: F)
    where
        F: FnMut(DrawSubmission<'a>),
    {
        self.instance.draw(self.placement.world_matrix(), submit);
    }
}
