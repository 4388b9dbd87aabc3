//! Squared-Euclidean distance kernel.
//!
//! Squared distances preserve the ordering of true Euclidean distances, and
//! every consumer in this crate only compares distances, so the square root
//! is never taken.

/// Squared-Euclidean distance between two coordinate slices.
///
/// The slices must have equal length; this is checked only in debug builds
/// since the kernel sits in the innermost construction loops.
#[inline]
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
