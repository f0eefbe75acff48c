use glam::{Quat, Vec3};

/// Value types a keyframe track can blend between.
///
/// Vectors blend linearly, rotations blend along the shortest arc. The
/// blend rule is picked statically from the value type, so one sampler
/// implementation serves every property kind.
pub trait Interpolatable: Copy + Sized {
    /// Blends from `start` to `end` by fraction `t`.
    fn interpolate(start: Self, end: Self, t: f32) -> Self;

    /// Brings a keyframe value returned verbatim into canonical form.
    ///
    /// Identity for vectors; rotations are renormalized if they drifted
    /// away from unit length.
    #[inline]
    fn settle(self) -> Self {
        self
    }
}

impl Interpolatable for f32 {
    #[inline]
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    #[inline]
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        // glam's slerp flips `end` when the dot product is negative (shortest arc)
        // but expects unit inputs.
        let start = start.settle();
        let end = end.settle();
        start.slerp(end, t).normalize()
    }

    #[inline]
    fn settle(self) -> Self {
        if self.is_normalized() {
            self
        } else {
            self.normalize()
        }
    }
}
