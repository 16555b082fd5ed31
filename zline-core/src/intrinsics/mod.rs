// =============================================================================
// Intrinsics Module
// =============================================================================
//
// Bit-level building blocks shared by both curve codecs: single-bit access,
// width masks, gray coding, and the order-preserving key transforms for
// signed and floating-point bit patterns.

/// Single-bit access, width masks, gray coding.
pub mod bits;

/// Monotone promotion of signed/float bit patterns to unsigned keys.
pub mod order;

/// Kani formal verification proofs.
#[cfg(kani)]
mod kani_proofs;

// =============================================================================
// Public Re-exports
// =============================================================================

// Bit operations
pub use bits::{get_bit, gray_decode, gray_encode, low_mask, set_bit};

// Key transforms
pub use order::{
    demote_from_unsigned, float_key, float_unkey, promote_to_unsigned, sint_key,
};
