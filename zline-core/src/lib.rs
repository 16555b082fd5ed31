//! # zline-core: Hilbert and Morton linearization for fixed-length tuples
//!
//! `zline-core` is a `no_std`, zero-allocation library that linearizes and
//! delinearizes fixed-length numeric tuples through two space-filling-curve
//! codecs: the Hilbert curve and the Morton (Z-order) curve. A tuple of N
//! lanes, each W bits wide, becomes a single unsigned code word of N·W bits
//! (stored in the smallest standard integer width); the decoder is the exact
//! inverse.
//!
//! ## Overview
//!
//! Space-filling curves map an N-dimensional grid onto a line while keeping
//! nearby grid points close on the line. Databases and spatial indexes use
//! this to sort multi-column keys so that range scans stay local:
//!
//! 1. **Morton** interleaves the bits of the lanes. Cheap, decent locality,
//!    occasional long jumps across space.
//! 2. **Hilbert** applies additional per-bit-plane rotations so consecutive
//!    indices always differ by a single unit step in exactly one lane.
//!
//! Both codecs are bijections between `[0, 2^W)^N` and `[0, 2^(N·W))` for
//! every supported combination of W ∈ {8, 16, 32, 64} and N ∈ 1..=16 with
//! N·W ≤ 128.
//!
//! ## Architecture
//!
//! - [`intrinsics`] - Bit-level primitives: single-bit access, gray coding,
//!   order-preserving key transforms for signed and float bit patterns.
//! - [`morton`] / [`hilbert`] - The two curve codecs over `u128` lanes.
//! - [`descriptor`] - The bind-time type algebra: validates a
//!   (kind, width, count) request and fixes the code-word width.
//! - [`batch`] - The vectorized driver: iterates borrowed columnar buffers,
//!   honors validity bitmaps, and never allocates.
//! - [`error`] - The bind/execute error taxonomy.
//!
//! ## Quick Start
//!
//! ```ignore
//! use zline_core::{batch, CurveKind, Descriptor, ElementRepr};
//! use zline_core::batch::{CodeSliceMut, LaneSlice};
//!
//! // Bind once per expression: u16 pairs -> u32 Hilbert codes.
//! let desc = Descriptor::bind_encode(CurveKind::Hilbert, ElementRepr::Uint, 16, 2)?;
//!
//! // Tuple-major lanes for three rows, and one code word per row.
//! let lanes: [u16; 6] = [0, 0, 7, 3, 255, 255];
//! let mut codes = [0u32; 3];
//!
//! batch::encode_batch(
//!     &desc,
//!     LaneSlice::U16(&lanes),
//!     None,
//!     None,
//!     CodeSliceMut::U32(&mut codes),
//!     None,
//!     3,
//! )?;
//! assert_eq!(codes[1], 26);
//! ```
//!
//! ## Guarantees
//!
//! - No heap allocation anywhere; per-row staging lives in a
//!   `[u128; MAX_LANES]` stack array.
//! - All entry points are reentrant; a [`Descriptor`] is immutable after
//!   binding and safe to share across threads.
//! - Errors surface synchronously as [`CodecError`] values; nothing panics
//!   on well-formed host buffers.

#![no_std]
#![deny(missing_docs)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Vectorized batch driver over borrowed columnar buffers.
pub mod batch;

/// Bind-time descriptors and the (width, count) -> code-width type algebra.
pub mod descriptor;

/// Bind- and execute-time error taxonomy.
pub mod error;

/// Dimension-generic Hilbert curve codec.
pub mod hilbert;

/// Low-level bit primitives and order-preserving key transforms.
pub mod intrinsics;

/// N-lane Morton (Z-order) codec.
pub mod morton;

// =============================================================================
// Crate-Wide Constants
// =============================================================================

/// Maximum tuple arity any descriptor can bind.
///
/// Sixteen 8-bit lanes exactly fill the widest supported code word.
pub const MAX_LANES: usize = 16;

/// Widest supported code word, in bits.
pub const MAX_CODE_BITS: u32 = 128;

// =============================================================================
// Convenience Re-exports (Clean Public API)
// =============================================================================

// Bind surface
pub use descriptor::{CurveKind, Descriptor, Direction, ElementRepr};

// Error taxonomy
pub use error::CodecError;

// Batch driver surface
pub use batch::{decode_batch, encode_batch, VectorShape};
pub use batch::{CodeSlice, CodeSliceMut, LaneSlice, LaneSliceMut};

// Order-preserving key transforms (commonly needed for sortable float keys)
pub use intrinsics::order::{demote_from_unsigned, promote_to_unsigned};
