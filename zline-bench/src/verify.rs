//! Typed buffer management and round-trip verification.
//!
//! The core borrows width-typed slices; the harness owns the allocations and
//! hands out the matching `LaneSlice`/`CodeSlice` views per configuration.

use zline_core::batch::{CodeSlice, CodeSliceMut, LaneSlice, LaneSliceMut};

/// Owned lane storage at one of the four lane widths.
pub enum LaneBuf {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

impl LaneBuf {
    /// Materialize `values` (already masked to `width` bits) at `width`.
    pub fn from_values(width: u32, values: &[u64]) -> Self {
        match width {
            8 => LaneBuf::U8(values.iter().map(|&v| v as u8).collect()),
            16 => LaneBuf::U16(values.iter().map(|&v| v as u16).collect()),
            32 => LaneBuf::U32(values.iter().map(|&v| v as u32).collect()),
            64 => LaneBuf::U64(values.to_vec()),
            _ => unreachable!("lane width {width}"),
        }
    }

    /// Zero-filled storage for `len` elements at `width`.
    pub fn zeroed(width: u32, len: usize) -> Self {
        match width {
            8 => LaneBuf::U8(vec![0; len]),
            16 => LaneBuf::U16(vec![0; len]),
            32 => LaneBuf::U32(vec![0; len]),
            64 => LaneBuf::U64(vec![0; len]),
            _ => unreachable!("lane width {width}"),
        }
    }

    pub fn as_slice(&self) -> LaneSlice<'_> {
        match self {
            LaneBuf::U8(v) => LaneSlice::U8(v),
            LaneBuf::U16(v) => LaneSlice::U16(v),
            LaneBuf::U32(v) => LaneSlice::U32(v),
            LaneBuf::U64(v) => LaneSlice::U64(v),
        }
    }

    pub fn as_mut_slice(&mut self) -> LaneSliceMut<'_> {
        match self {
            LaneBuf::U8(v) => LaneSliceMut::U8(v),
            LaneBuf::U16(v) => LaneSliceMut::U16(v),
            LaneBuf::U32(v) => LaneSliceMut::U32(v),
            LaneBuf::U64(v) => LaneSliceMut::U64(v),
        }
    }

    /// Widen back to u64 values for comparison.
    pub fn values(&self) -> Vec<u64> {
        match self {
            LaneBuf::U8(v) => v.iter().map(|&x| x as u64).collect(),
            LaneBuf::U16(v) => v.iter().map(|&x| x as u64).collect(),
            LaneBuf::U32(v) => v.iter().map(|&x| x as u64).collect(),
            LaneBuf::U64(v) => v.clone(),
        }
    }
}

/// Owned code-word storage at one of the five code widths.
pub enum CodeBuf {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    U128(Vec<u128>),
}

impl CodeBuf {
    /// Zero-filled storage for `len` code words at `width`.
    pub fn zeroed(width: u32, len: usize) -> Self {
        match width {
            8 => CodeBuf::U8(vec![0; len]),
            16 => CodeBuf::U16(vec![0; len]),
            32 => CodeBuf::U32(vec![0; len]),
            64 => CodeBuf::U64(vec![0; len]),
            128 => CodeBuf::U128(vec![0; len]),
            _ => unreachable!("code width {width}"),
        }
    }

    pub fn as_slice(&self) -> CodeSlice<'_> {
        match self {
            CodeBuf::U8(v) => CodeSlice::U8(v),
            CodeBuf::U16(v) => CodeSlice::U16(v),
            CodeBuf::U32(v) => CodeSlice::U32(v),
            CodeBuf::U64(v) => CodeSlice::U64(v),
            CodeBuf::U128(v) => CodeSlice::U128(v),
        }
    }

    pub fn as_mut_slice(&mut self) -> CodeSliceMut<'_> {
        match self {
            CodeBuf::U8(v) => CodeSliceMut::U8(v),
            CodeBuf::U16(v) => CodeSliceMut::U16(v),
            CodeBuf::U32(v) => CodeSliceMut::U32(v),
            CodeBuf::U64(v) => CodeSliceMut::U64(v),
            CodeBuf::U128(v) => CodeSliceMut::U128(v),
        }
    }
}

/// Compare decoded lanes against the originals.
///
/// Returns the number of mismatching rows (0 = clean round trip).
pub fn count_mismatched_rows(original: &[u64], decoded: &[u64], lane_count: usize) -> usize {
    original
        .chunks_exact(lane_count)
        .zip(decoded.chunks_exact(lane_count))
        .filter(|(a, b)| a != b)
        .count()
}
