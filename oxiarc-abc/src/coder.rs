//! The arithmetic coder's state machine: interval narrowing, bits-to-follow
//! carry handling, and renormalization.
//!
//! This mirrors the low-level role `oxiarc_lzma::range_coder` plays for
//! LZMA, but implements the classic bits-to-follow ("E1/E2/E3") binary
//! arithmetic coder rather than LZMA's carry-propagating range coder: the
//! interval is tracked as an inclusive `[low, high]` pair with explicit
//! straddle handling, instead of a single shrinking `range` plus a
//! deferred-byte cache.
//!
//! States, as named by the driving specification:
//! - `READY`: about to fold in the next input bit.
//! - `NARROWED`: the interval has been split and narrowed by that bit.
//! - `RENORM`: renormalization is in progress; may re-enter itself any
//!   number of times.
//! - `FLUSHED`: terminal, reached after the encoder's final-bits emission.
//!
//! The functions below don't reify those states as an enum; the states are
//! exactly the control-flow positions of [`step_encode`] and
//! [`decode_narrow_and_renorm`], but the doc comments on each function name
//! which state it implements.

use crate::bitio::{BitPacker, BitUnpacker};
use crate::{FIXED_SCALE, HALF, QUARTER, THREE_QUARTER, TOTAL_FREQUENCY};

/// Convert a fixed-point `P(bit = 1)` into the split point's scaled `P(bit =
/// 0)`, in the coder's `TOTAL_FREQUENCY` fixed-point domain.
#[inline]
pub fn scaled_p0_for(p1_fixed: u32) -> u32 {
    let p0_fixed = FIXED_SCALE - p1_fixed;
    let scaled = ((p0_fixed as u64 * TOTAL_FREQUENCY as u64) / FIXED_SCALE as u64) as u32;
    if scaled == TOTAL_FREQUENCY {
        TOTAL_FREQUENCY - 1
    } else {
        scaled
    }
}

/// Split point for the current interval, given `scaled_p0`.
#[inline]
fn split_point(low: u32, high: u32, scaled_p0: u32) -> u32 {
    let range = (high - low + 1) as u64;
    low + ((range * scaled_p0 as u64) / TOTAL_FREQUENCY as u64) as u32
}

/// Encode one bit: narrow the interval (`NARROWED`), then renormalize
/// (`RENORM`*), emitting bits through `packer` and tracking carry-straddle
/// bits in `bits_to_follow`.
pub fn step_encode(
    bit: u8,
    p1_fixed: u32,
    low: &mut u32,
    high: &mut u32,
    bits_to_follow: &mut usize,
    packer: &mut BitPacker,
) {
    let scaled_p0 = scaled_p0_for(p1_fixed);
    let split = split_point(*low, *high, scaled_p0);

    if bit == 0 {
        *high = split - 1;
    } else {
        *low = split;
    }
    debug_assert!(*low < *high, "coder interval collapsed after narrowing");

    loop {
        if *high < HALF {
            packer.emit(0);
            packer.emit_repeated(1, *bits_to_follow);
            *bits_to_follow = 0;
        } else if *low >= HALF {
            packer.emit(1);
            packer.emit_repeated(0, *bits_to_follow);
            *bits_to_follow = 0;
            *low -= HALF;
            *high -= HALF;
        } else if *low >= QUARTER && *high < THREE_QUARTER {
            *bits_to_follow += 1;
            *low -= QUARTER;
            *high -= QUARTER;
        } else {
            break;
        }
        *low <<= 1;
        *high = (*high << 1) | 1;
    }
}

/// Flush the encoder's final bits after the last input bit has been coded.
/// Terminal transition into `FLUSHED`.
pub fn finish_encode(low: u32, bits_to_follow: &mut usize, packer: &mut BitPacker) {
    *bits_to_follow += 1;
    if low < QUARTER {
        packer.emit(0);
        packer.emit_repeated(1, *bits_to_follow);
    } else {
        packer.emit(1);
        packer.emit_repeated(0, *bits_to_follow);
    }
    packer.flush();
}

/// Decide the next decoded bit from the current `value` relative to the
/// interval's split point (`NARROWED`, decode side). Returns `(bit,
/// split)`; narrowing itself is applied by [`decode_narrow_and_renorm`] so
/// callers can update the context ring with the decided bit first, matching
/// the ordering the format requires.
pub fn decode_decide(p1_fixed: u32, low: u32, high: u32, value: u32) -> (u8, u32) {
    let scaled_p0 = scaled_p0_for(p1_fixed);
    let split = split_point(low, high, scaled_p0);
    let range = (high - low + 1) as u64;
    let scaled_value = ((value - low + 1) as u64 * TOTAL_FREQUENCY as u64 - 1) / range;
    let bit = if scaled_value < scaled_p0 as u64 { 0 } else { 1 };
    (bit, split)
}

/// Apply the narrowing decided by [`decode_decide`] and renormalize
/// (`RENORM`*), pulling fresh bits into `value` through `reader`.
pub fn decode_narrow_and_renorm(
    bit: u8,
    split: u32,
    low: &mut u32,
    high: &mut u32,
    value: &mut u32,
    reader: &mut BitUnpacker,
) {
    if bit == 0 {
        *high = split - 1;
    } else {
        *low = split;
    }
    debug_assert!(*low < *high, "coder interval collapsed after narrowing");

    loop {
        if *high < HALF {
            // No value adjustment; falls through to the shared shift below.
        } else if *low >= HALF {
            *value -= HALF;
            *low -= HALF;
            *high -= HALF;
        } else if *low >= QUARTER && *high < THREE_QUARTER {
            *value -= QUARTER;
            *low -= QUARTER;
            *high -= QUARTER;
        } else {
            break;
        }
        *low <<= 1;
        *high = (*high << 1) | 1;
        *value = (*value << 1) | reader.read_bit() as u32;
    }
}

/// Load the decoder's initial `value` window from the first `PRECISION`
/// bits of the encoded stream.
pub fn init_decode_value(reader: &mut BitUnpacker) -> u32 {
    let mut value = 0u32;
    for _ in 0..crate::PRECISION {
        value = (value << 1) | reader.read_bit() as u32;
    }
    value
}
