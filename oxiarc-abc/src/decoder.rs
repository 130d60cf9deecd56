//! The decode driver: mirrors [`crate::encoder::encode`] bit-for-bit.
//!
//! Ordering note: the context ring is updated with the decoded bit *before*
//! narrowing and renormalization run, even though both the encoder and
//! decoder compute the split point (and thus the probability query) from
//! the context state *prior* to this bit. Pushing before or after narrowing
//! only matters for when the push becomes visible to the *next* step's
//! oracle query; since narrowing and renormalization never read
//! `count_ones`, either ordering is bit-exact as long as the push happens
//! strictly between deciding this bit and querying the oracle for the next
//! one. This placement matches the encoder's own ordering (step, then push)
//! as closely as the decode split (decide, then narrow) allows.

use crate::bitio::BitUnpacker;
use crate::coder::{decode_decide, decode_narrow_and_renorm, init_decode_value};
use crate::context::ContextRing;
use crate::error::{AbcError, Result};
use crate::model::{ProbabilityModel, ReferenceModel};
use crate::{MAX_CONTEXT_BITS, TOTAL_FREQUENCY};

/// Decode `decoded_bit_length` bits from `encoded` using `model` and a
/// sliding context of `context_length` bits (which must match the value
/// used at encode time).
///
/// Returns `ceil(decoded_bit_length / 8)` bytes; the first
/// `decoded_bit_length` bits (MSB-first) hold the recovered data and any
/// trailing bits of the last byte are zero.
pub fn decode<M: ProbabilityModel>(
    encoded: &[u8],
    decoded_bit_length: usize,
    context_length: usize,
    model: &M,
) -> Result<Vec<u8>> {
    if context_length > MAX_CONTEXT_BITS {
        return Err(AbcError::ContextTooLarge {
            requested: context_length,
            max: MAX_CONTEXT_BITS,
        });
    }

    let mut reader = BitUnpacker::new(encoded);
    let mut low = 0u32;
    let mut high = TOTAL_FREQUENCY - 1;
    let mut value = init_decode_value(&mut reader);
    let mut ring = ContextRing::new(context_length);
    let mut out = vec![0u8; decoded_bit_length.div_ceil(8)];

    for i in 0..decoded_bit_length {
        let p1_fixed = model.p1_fixed(ring.count_ones(), context_length);
        let (bit, split) = decode_decide(p1_fixed, low, high, value);
        ring.push(bit);
        decode_narrow_and_renorm(bit, split, &mut low, &mut high, &mut value, &mut reader);
        if bit == 1 {
            crate::bitio::set_bit(&mut out, i);
        }
    }

    Ok(out)
}

/// Decode using the reference probability model.
pub fn decode_bytes(
    encoded: &[u8],
    decoded_bit_length: usize,
    context_length: usize,
) -> Result<Vec<u8>> {
    decode(encoded, decoded_bit_length, context_length, &ReferenceModel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_bytes;

    #[test]
    fn test_decode_empty_is_empty() {
        let encoded = encode_bytes(&[], 0, 5).unwrap();
        let decoded = decode_bytes(&encoded, 0, 5).unwrap();
        assert_eq!(decoded, Vec::<u8>::new());
    }

    #[test]
    fn test_rejects_oversized_context() {
        let err = decode_bytes(&[0], 8, MAX_CONTEXT_BITS + 1).unwrap_err();
        assert_eq!(
            err,
            AbcError::ContextTooLarge {
                requested: MAX_CONTEXT_BITS + 1,
                max: MAX_CONTEXT_BITS,
            }
        );
    }

    #[test]
    fn test_partial_last_byte_trailing_zero() {
        let data = [0xABu8];
        let encoded = encode_bytes(&data, 5, 3).unwrap();
        let decoded = decode_bytes(&encoded, 5, 3).unwrap();
        assert_eq!(decoded.len(), 1);
        // Top 5 bits of 0xAB (10101011) are 10101; bottom 3 bits must be zero.
        assert_eq!(decoded[0] & 0b0000_0111, 0);
        assert_eq!(decoded[0] >> 3, 0xAB >> 3);
    }
}
