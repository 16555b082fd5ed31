//! Kani formal verification proofs for the intrinsics module.
//!
//! These proofs pin the algebraic identities the curve codecs rely on:
//! gray coding must invert exactly, bit access must be self-consistent,
//! and the key transforms must be involutions.
//!
//! Run with: `cargo kani --package zline-core`

use super::bits::{get_bit, gray_decode, gray_encode, low_mask, set_bit};
use super::order::{float_key, float_unkey, sint_key};

// ============================================================================
// Proof 1: gray_decode inverts gray_encode
// ============================================================================
// What: Prove gray_decode(gray_encode(x), w) == x for w-bit x
// Why: The Hilbert fold's correction term is a gray_decode; a mismatch
//      would silently break the curve's bijectivity.

/// Verify gray round-trip on 16-bit values.
#[kani::proof]
fn verify_gray_roundtrip_16() {
    let x: u128 = kani::any();
    kani::assume(x <= low_mask(16));

    kani::assert(
        gray_decode(gray_encode(x), 16) == x,
        "gray_decode must invert gray_encode",
    );
}

/// Verify gray_decode confines its result to the stated width.
#[kani::proof]
fn verify_gray_decode_width_bound() {
    let x: u128 = kani::any();

    let decoded = gray_decode(x, 16);
    kani::assert(decoded <= low_mask(16), "gray_decode must stay in width");
}

// ============================================================================
// Proof 2: set_bit / get_bit consistency
// ============================================================================
// What: Prove get_bit(set_bit(x, p, v), p) == v and other bits unchanged
// Why: Both codecs move every payload bit through this pair.

/// Verify set_bit writes exactly the requested bit.
#[kani::proof]
fn verify_set_get_bit() {
    let x: u128 = kani::any();
    let p: u32 = kani::any();
    let v: bool = kani::any();
    kani::assume(p < 128);

    let written = set_bit(x, p, v);
    kani::assert(get_bit(written, p) == v, "set_bit must store the bit");
    kani::assert(
        written & !(1u128 << p) == x & !(1u128 << p),
        "set_bit must leave other bits alone",
    );
}

// ============================================================================
// Proof 3: key transforms are involutions / inverses
// ============================================================================
// What: Prove sint_key(sint_key(x)) == x and float_unkey(float_key(x)) == x
// Why: Decode-side demotion must restore the encoded bit pattern exactly.

/// Verify the signed key transform is self-inverse on 32-bit patterns.
#[kani::proof]
fn verify_sint_key_involution() {
    let x: u128 = kani::any();
    kani::assume(x <= low_mask(32));

    kani::assert(sint_key(sint_key(x, 32), 32) == x, "sint_key is an involution");
}

/// Verify the float key transform round-trips on 32-bit patterns.
#[kani::proof]
fn verify_float_key_roundtrip() {
    let x: u128 = kani::any();
    kani::assume(x <= low_mask(32));

    kani::assert(
        float_unkey(float_key(x, 32), 32) == x,
        "float_unkey must invert float_key",
    );
}
