//! Pluggable probability oracle.
//!
//! The coder narrows its interval using `P(bit = 1)` at each step but never
//! needs to know *how* that probability was derived, only that the same
//! function is used consistently by both encoder and decoder. [`ReferenceModel`]
//! implements the Laplace-smoothing oracle from the format; alternative
//! models (e.g. indexed by the full context bit-pattern rather than just its
//! population count) can implement [`ProbabilityModel`] directly without any
//! change to [`crate::coder`].

use crate::FIXED_SCALE;

/// A pure function from sliding-window state to a fixed-point `P(bit = 1)`.
///
/// Implementations must return a value in `[1, FIXED_SCALE - 1]` and must be
/// deterministic: the same `(count_ones, context_length)` pair always
/// produces the same result, since the encoder and decoder each call it
/// independently and must agree bit-for-bit.
pub trait ProbabilityModel {
    /// Estimate `P(bit = 1)` scaled by [`FIXED_SCALE`], given how many of
    /// the last `context_length` coded bits were 1.
    fn p1_fixed(&self, count_ones: usize, context_length: usize) -> u32;
}

/// The reference oracle: additive (Laplace) smoothing over the sliding
/// window's 1-bit count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceModel;

impl ProbabilityModel for ReferenceModel {
    fn p1_fixed(&self, count_ones: usize, context_length: usize) -> u32 {
        if context_length == 0 {
            return FIXED_SCALE / 2;
        }

        let numerator = (count_ones + 1) as u64;
        let denominator = (context_length + 2) as u64;
        let scale = FIXED_SCALE as u64;

        let mut p = (numerator * scale + denominator / 2) / denominator;
        p = p.clamp(1, scale - 1);
        p as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_context_is_half() {
        let m = ReferenceModel;
        assert_eq!(m.p1_fixed(0, 0), FIXED_SCALE / 2);
        assert_eq!(m.p1_fixed(7, 0), FIXED_SCALE / 2);
    }

    #[test]
    fn test_all_zeros_context_biases_low() {
        let m = ReferenceModel;
        let p = m.p1_fixed(0, 64);
        assert!(p < FIXED_SCALE / 2);
        assert!(p >= 1);
    }

    #[test]
    fn test_all_ones_context_biases_high() {
        let m = ReferenceModel;
        let p = m.p1_fixed(64, 64);
        assert!(p > FIXED_SCALE / 2);
        assert!(p < FIXED_SCALE);
    }

    #[test]
    fn test_output_always_in_bounds() {
        let m = ReferenceModel;
        for context_length in [1usize, 2, 3, 5, 64, 1000] {
            for count_ones in 0..=context_length {
                let p = m.p1_fixed(count_ones, context_length);
                assert!(p >= 1 && p < FIXED_SCALE, "p={p} out of bounds");
            }
        }
    }

    #[test]
    fn test_balanced_context_is_near_half() {
        let m = ReferenceModel;
        // count_ones == context_length / 2 should land close to FIXED_SCALE / 2.
        let p = m.p1_fixed(32, 64);
        let half = FIXED_SCALE as i64 / 2;
        assert!((p as i64 - half).abs() <= 1024);
    }
}
