//! Encode then decode a short payload and report the compression ratio.
//!
//! Not part of the public API; a development aid for eyeballing the coder's
//! behavior on a handful of inputs without reaching for the benchmarks.

use oxiarc_abc::{decode_bytes, encode_bytes};

fn run(label: &str, data: &[u8], context_length: usize) {
    let bit_length = data.len() * 8;
    let encoded = encode_bytes(data, bit_length, context_length).unwrap();
    let decoded = decode_bytes(&encoded, bit_length, context_length).unwrap();
    assert_eq!(decoded, data);

    eprintln!(
        "{label}: {} bytes -> {} bytes (context_length={context_length}, ratio={:.2})",
        data.len(),
        encoded.len(),
        data.len() as f64 / encoded.len() as f64
    );
}

fn main() {
    run("ascii phrase", b"Hello, Glorious Coding!", 5);
    run("all zeros", &[0x00u8; 256], 4);
    run("all ones", &[0xFFu8; 256], 4);

    let mut pseudo_random = vec![0u8; 1024];
    let mut seed: u64 = 0x9E3779B97F4A7C15;
    for byte in &mut pseudo_random {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        *byte = (seed >> 56) as u8;
    }
    run("pseudo-random", &pseudo_random, 8);
}
