//! Keyframe Sampler
//!
//! Turns a query time into a value by locating the surrounding keyframes with
//! a binary search and blending them with the value type's
//! [`Interpolatable`] rule.

use crate::animation::values::Interpolatable;
use crate::errors::MalformedAssetError;

/// Samples parallel `times` / `values` arrays at `time`.
///
/// - A single keyframe is returned as-is.
/// - A query that hits a timestamp exactly returns that key's value without
///   blending (the first key wins when timestamps are duplicated).
/// - Otherwise the interval `[i0, i1]` is chosen with `i1` the first key at or
///   after `time`, clamped to `1..len`. Queries before the first key use the
///   first interval and queries past the last key use the last interval; the
///   blend fraction is not clamped.
/// - Two keys with equal timestamps blend with fraction `0`.
///
/// `times` must be sorted ascending. [`KeyframeTrack::new`] enforces every
/// precondition; build a track first when the arrays come from untrusted
/// input.
///
/// # Panics
///
/// Panics if `times` is empty or its length differs from `values`.
#[must_use]
pub fn sample<T: Interpolatable>(times: &[f32], values: &[T], time: f32) -> T {
    assert!(
        !times.is_empty() && times.len() == values.len(),
        "sample: {} times vs {} values",
        times.len(),
        values.len()
    );

    let len = times.len();
    if len == 1 {
        return values[0].settle();
    }

    // First index whose timestamp is >= time
    let idx = times.partition_point(|&t| t < time);
    if idx < len && times[idx] == time {
        return values[idx].settle();
    }

    let i1 = idx.clamp(1, len - 1);
    let i0 = i1 - 1;

    let t0 = times[i0];
    let t1 = times[i1];
    let f = if t1 == t0 { 0.0 } else { (time - t0) / (t1 - t0) };

    T::interpolate(values[i0], values[i1], f)
}

/// A validated time/value keyframe sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// Creates a track, checking the array invariants the sampler relies on.
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Result<Self, MalformedAssetError> {
        if times.len() != values.len() {
            return Err(MalformedAssetError::KeyframeCountMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(MalformedAssetError::EmptyChannel);
        }
        // Ties are legal; anything descending (or NaN) is not.
        if let Some(index) = times
            .windows(2)
            .position(|w| w[1] < w[0] || w[0].is_nan() || w[1].is_nan())
        {
            return Err(MalformedAssetError::UnsortedKeyframes {
                index: index + 1,
                time: times[index + 1],
                previous: times[index],
            });
        }
        Ok(Self { times, values })
    }

    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`: construction rejects empty tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Timestamp of the last keyframe.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    #[inline]
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        sample(&self.times, &self.values, time)
    }
}
