//! The encode driver: folds input bits through the coder and the context
//! ring, in strict coding order.

use crate::bitio::{bit_at, BitPacker};
use crate::coder::{finish_encode, step_encode};
use crate::context::ContextRing;
use crate::error::{AbcError, Result};
use crate::model::{ProbabilityModel, ReferenceModel};
use crate::{MAX_CONTEXT_BITS, TOTAL_FREQUENCY};

/// Encode the first `sequence_bit_length` bits of `sequence` (MSB-first)
/// using `model` and a sliding context of `context_length` bits.
///
/// `sequence_bit_length` may exceed `8 * sequence.len()`; bits past the end
/// of `sequence` are treated as `0`, matching the input bit reader's
/// out-of-range contract.
///
/// If the output buffer's growth fails to allocate, this aborts the
/// process rather than returning an error: that's how `Vec` surfaces
/// allocation failure in safe Rust, and there is no catchable error variant
/// for it here.
pub fn encode<M: ProbabilityModel>(
    sequence: &[u8],
    sequence_bit_length: usize,
    context_length: usize,
    model: &M,
) -> Result<Vec<u8>> {
    if context_length > MAX_CONTEXT_BITS {
        return Err(AbcError::ContextTooLarge {
            requested: context_length,
            max: MAX_CONTEXT_BITS,
        });
    }

    let mut low = 0u32;
    let mut high = TOTAL_FREQUENCY - 1;
    let mut bits_to_follow = 0usize;
    let mut packer = BitPacker::new();
    let mut ring = ContextRing::new(context_length);

    for i in 0..sequence_bit_length {
        let bit = bit_at(sequence, i);
        let p1_fixed = model.p1_fixed(ring.count_ones(), context_length);
        step_encode(bit, p1_fixed, &mut low, &mut high, &mut bits_to_follow, &mut packer);
        ring.push(bit);
    }

    finish_encode(low, &mut bits_to_follow, &mut packer);
    Ok(packer.into_bytes())
}

/// Encode using the reference probability model.
pub fn encode_bytes(
    sequence: &[u8],
    sequence_bit_length: usize,
    context_length: usize,
) -> Result<Vec<u8>> {
    encode(sequence, sequence_bit_length, context_length, &ReferenceModel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_still_emits_termination() {
        let encoded = encode_bytes(&[], 0, 5).unwrap();
        assert!(!encoded.is_empty());
    }

    #[test]
    fn test_rejects_oversized_context() {
        let err = encode_bytes(&[0], 8, MAX_CONTEXT_BITS + 1).unwrap_err();
        assert_eq!(
            err,
            AbcError::ContextTooLarge {
                requested: MAX_CONTEXT_BITS + 1,
                max: MAX_CONTEXT_BITS,
            }
        );
    }

    #[test]
    fn test_deterministic_output() {
        let data = b"determinism check";
        let a = encode_bytes(data, data.len() * 8, 6).unwrap();
        let b = encode_bytes(data, data.len() * 8, 6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_zero_input_compresses_well() {
        let data = vec![0x00u8; 100];
        let encoded = encode_bytes(&data, 800, 4).unwrap();
        assert!(encoded.len() < data.len());
    }

    #[test]
    fn test_all_one_input_compresses_well() {
        let data = vec![0xFFu8; 100];
        let encoded = encode_bytes(&data, 800, 4).unwrap();
        assert!(encoded.len() < data.len());
    }
}
