// =============================================================================
// Vectorized Batch Driver
// =============================================================================
//
// Executes one bound descriptor over a vector of rows. Lane buffers are
// tuple-major (all lanes of row i, then row i+1); code buffers hold one word
// per row. Validity is a dense u64 bitmap, bit i = row i valid; an absent
// bitmap means all rows are valid. All buffers are borrowed for the duration
// of a single call and nothing is allocated: per-row staging lives in a
// `[u128; MAX_LANES]` stack array.
//
// Null policy, matching the host's array semantics: a null input row yields
// a null output row; a null lane inside an otherwise valid tuple aborts the
// whole batch with an input error.

use crate::descriptor::{CurveKind, Descriptor, Direction};
use crate::error::CodecError;
use crate::intrinsics::bits::low_mask;
use crate::{hilbert, morton, MAX_LANES};

/// Borrowed, tuple-major lane input.
///
/// Holds `lane_count * rows` elements. Signed and floating-point columns
/// arrive bit-cast into the matching unsigned width; the driver moves bit
/// patterns verbatim.
#[derive(Debug, Clone, Copy)]
pub enum LaneSlice<'a> {
    /// 8-bit lanes.
    U8(&'a [u8]),
    /// 16-bit lanes.
    U16(&'a [u16]),
    /// 32-bit lanes.
    U32(&'a [u32]),
    /// 64-bit lanes.
    U64(&'a [u64]),
}

impl LaneSlice<'_> {
    /// Bit width of one element.
    pub fn width(&self) -> u32 {
        match self {
            LaneSlice::U8(_) => 8,
            LaneSlice::U16(_) => 16,
            LaneSlice::U32(_) => 32,
            LaneSlice::U64(_) => 64,
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            LaneSlice::U8(s) => s.len(),
            LaneSlice::U16(s) => s.len(),
            LaneSlice::U32(s) => s.len(),
            LaneSlice::U64(s) => s.len(),
        }
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, idx: usize) -> u128 {
        match self {
            LaneSlice::U8(s) => s[idx] as u128,
            LaneSlice::U16(s) => s[idx] as u128,
            LaneSlice::U32(s) => s[idx] as u128,
            LaneSlice::U64(s) => s[idx] as u128,
        }
    }
}

/// Borrowed, tuple-major lane output.
#[derive(Debug)]
pub enum LaneSliceMut<'a> {
    /// 8-bit lanes.
    U8(&'a mut [u8]),
    /// 16-bit lanes.
    U16(&'a mut [u16]),
    /// 32-bit lanes.
    U32(&'a mut [u32]),
    /// 64-bit lanes.
    U64(&'a mut [u64]),
}

impl LaneSliceMut<'_> {
    /// Bit width of one element.
    pub fn width(&self) -> u32 {
        match self {
            LaneSliceMut::U8(_) => 8,
            LaneSliceMut::U16(_) => 16,
            LaneSliceMut::U32(_) => 32,
            LaneSliceMut::U64(_) => 64,
        }
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        match self {
            LaneSliceMut::U8(s) => s.len(),
            LaneSliceMut::U16(s) => s.len(),
            LaneSliceMut::U32(s) => s.len(),
            LaneSliceMut::U64(s) => s.len(),
        }
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, idx: usize, value: u128) {
        match self {
            LaneSliceMut::U8(s) => s[idx] = value as u8,
            LaneSliceMut::U16(s) => s[idx] = value as u16,
            LaneSliceMut::U32(s) => s[idx] = value as u32,
            LaneSliceMut::U64(s) => s[idx] = value as u64,
        }
    }
}

/// Borrowed code-word input, one word per row.
#[derive(Debug, Clone, Copy)]
pub enum CodeSlice<'a> {
    /// 8-bit code words.
    U8(&'a [u8]),
    /// 16-bit code words.
    U16(&'a [u16]),
    /// 32-bit code words.
    U32(&'a [u32]),
    /// 64-bit code words.
    U64(&'a [u64]),
    /// 128-bit code words.
    U128(&'a [u128]),
}

impl CodeSlice<'_> {
    /// Bit width of one code word.
    pub fn width(&self) -> u32 {
        match self {
            CodeSlice::U8(_) => 8,
            CodeSlice::U16(_) => 16,
            CodeSlice::U32(_) => 32,
            CodeSlice::U64(_) => 64,
            CodeSlice::U128(_) => 128,
        }
    }

    /// Number of code words in the buffer.
    pub fn len(&self) -> usize {
        match self {
            CodeSlice::U8(s) => s.len(),
            CodeSlice::U16(s) => s.len(),
            CodeSlice::U32(s) => s.len(),
            CodeSlice::U64(s) => s.len(),
            CodeSlice::U128(s) => s.len(),
        }
    }

    /// Whether the buffer holds no code words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, idx: usize) -> u128 {
        match self {
            CodeSlice::U8(s) => s[idx] as u128,
            CodeSlice::U16(s) => s[idx] as u128,
            CodeSlice::U32(s) => s[idx] as u128,
            CodeSlice::U64(s) => s[idx] as u128,
            CodeSlice::U128(s) => s[idx],
        }
    }
}

/// Borrowed code-word output, one word per row.
#[derive(Debug)]
pub enum CodeSliceMut<'a> {
    /// 8-bit code words.
    U8(&'a mut [u8]),
    /// 16-bit code words.
    U16(&'a mut [u16]),
    /// 32-bit code words.
    U32(&'a mut [u32]),
    /// 64-bit code words.
    U64(&'a mut [u64]),
    /// 128-bit code words.
    U128(&'a mut [u128]),
}

impl CodeSliceMut<'_> {
    /// Bit width of one code word.
    pub fn width(&self) -> u32 {
        match self {
            CodeSliceMut::U8(_) => 8,
            CodeSliceMut::U16(_) => 16,
            CodeSliceMut::U32(_) => 32,
            CodeSliceMut::U64(_) => 64,
            CodeSliceMut::U128(_) => 128,
        }
    }

    /// Number of code words in the buffer.
    pub fn len(&self) -> usize {
        match self {
            CodeSliceMut::U8(s) => s.len(),
            CodeSliceMut::U16(s) => s.len(),
            CodeSliceMut::U32(s) => s.len(),
            CodeSliceMut::U64(s) => s.len(),
            CodeSliceMut::U128(s) => s.len(),
        }
    }

    /// Whether the buffer holds no code words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&mut self, idx: usize, value: u128) {
        match self {
            CodeSliceMut::U8(s) => s[idx] = value as u8,
            CodeSliceMut::U16(s) => s[idx] = value as u16,
            CodeSliceMut::U32(s) => s[idx] = value as u32,
            CodeSliceMut::U64(s) => s[idx] = value as u64,
            CodeSliceMut::U128(s) => s[idx] = value,
        }
    }
}

/// Vector disposition reported back to the host.
///
/// A single-row batch produces a value the host may broadcast, mirroring
/// columnar engines' constant vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorShape {
    /// One value per row.
    Flat,
    /// Single-row result; the host may treat it as a constant.
    Constant,
}

/// Whether bit `idx` is set in an optional dense bitmap.
///
/// Absent bitmap means everything is valid. Present bitmaps must cover
/// every index probed.
#[inline]
fn bitmap_get(bitmap: Option<&[u64]>, idx: usize) -> bool {
    match bitmap {
        None => true,
        Some(words) => (words[idx / 64] >> (idx % 64)) & 1 == 1,
    }
}

#[inline]
fn bitmap_set(bitmap: &mut [u64], idx: usize, valid: bool) {
    if valid {
        bitmap[idx / 64] |= 1u64 << (idx % 64);
    } else {
        bitmap[idx / 64] &= !(1u64 << (idx % 64));
    }
}

/// Run one curve encode over `tuple`, already confined to `width` bits.
#[inline]
fn run_encode(kind: CurveKind, tuple: &[u128], width: u32) -> u128 {
    match kind {
        CurveKind::Hilbert => hilbert::encode(tuple, width),
        CurveKind::Morton => morton::encode(tuple, width),
    }
}

/// Run one curve decode into `tuple`.
#[inline]
fn run_decode(kind: CurveKind, code: u128, width: u32, tuple: &mut [u128]) {
    match kind {
        CurveKind::Hilbert => hilbert::decode(code, width, tuple),
        CurveKind::Morton => morton::decode(code, width, tuple),
    }
}

/// Encode a batch of tuples into code words.
///
/// * `lanes` holds `desc.lane_count() * rows` elements, tuple-major, typed
///   at `desc.lane_width()`.
/// * `lane_validity` covers individual lane elements; `row_validity` covers
///   rows. Either may be `None` for all-valid.
/// * `out` holds `rows` code words typed at `desc.code_width()`;
///   `out_validity`, when present, receives per-row validity.
///
/// # Errors
///
/// * [`CodecError::Input`] when a valid row contains a null lane. The whole
///   batch is abandoned; no partial output should be consumed.
/// * [`CodecError::Internal`] when buffer widths or lengths disagree with
///   the descriptor, or the descriptor was bound for decoding.
pub fn encode_batch(
    desc: &Descriptor,
    lanes: LaneSlice<'_>,
    lane_validity: Option<&[u64]>,
    row_validity: Option<&[u64]>,
    mut out: CodeSliceMut<'_>,
    mut out_validity: Option<&mut [u64]>,
    rows: usize,
) -> Result<VectorShape, CodecError> {
    if desc.direction() != Direction::Encode {
        return Err(CodecError::internal("encode_batch on a decode descriptor"));
    }
    if lanes.width() != desc.lane_width() {
        return Err(CodecError::internal("lane buffer width != descriptor"));
    }
    if out.width() != desc.code_width() {
        return Err(CodecError::internal("code buffer width != descriptor"));
    }
    let n = desc.lane_count();
    if lanes.len() < n * rows || out.len() < rows {
        return Err(CodecError::internal("batch buffers shorter than rows"));
    }

    let width = desc.lane_width();
    let mask = low_mask(width);
    let mut tuple = [0u128; MAX_LANES];

    for row in 0..rows {
        if !bitmap_get(row_validity, row) {
            if let Some(v) = out_validity.as_deref_mut() {
                bitmap_set(v, row, false);
            }
            continue;
        }

        let base = row * n;
        for (j, slot) in tuple[..n].iter_mut().enumerate() {
            if !bitmap_get(lane_validity, base + j) {
                return Err(CodecError::input("array cannot contain null values"));
            }
            *slot = lanes.get(base + j) & mask;
        }

        out.set(row, run_encode(desc.kind(), &tuple[..n], width));
        if let Some(v) = out_validity.as_deref_mut() {
            bitmap_set(v, row, true);
        }
    }

    Ok(if rows == 1 {
        VectorShape::Constant
    } else {
        VectorShape::Flat
    })
}

/// Decode a batch of code words into tuples.
///
/// * `codes` holds `rows` words typed at `desc.code_width()`; bits at or
///   above `desc.payload_bits()` are ignored.
/// * `out` holds `desc.lane_count() * rows` elements, tuple-major, typed at
///   `desc.lane_width()`; `out_validity`, when present, receives per-row
///   validity (a null input row nulls the whole output tuple).
///
/// # Errors
///
/// [`CodecError::Internal`] when buffer widths or lengths disagree with the
/// descriptor, or the descriptor was bound for encoding.
pub fn decode_batch(
    desc: &Descriptor,
    codes: CodeSlice<'_>,
    row_validity: Option<&[u64]>,
    mut out: LaneSliceMut<'_>,
    mut out_validity: Option<&mut [u64]>,
    rows: usize,
) -> Result<VectorShape, CodecError> {
    if desc.direction() != Direction::Decode {
        return Err(CodecError::internal("decode_batch on an encode descriptor"));
    }
    if codes.width() != desc.code_width() {
        return Err(CodecError::internal("code buffer width != descriptor"));
    }
    if out.width() != desc.lane_width() {
        return Err(CodecError::internal("lane buffer width != descriptor"));
    }
    let n = desc.lane_count();
    if codes.len() < rows || out.len() < n * rows {
        return Err(CodecError::internal("batch buffers shorter than rows"));
    }

    let width = desc.lane_width();
    let payload = low_mask(desc.payload_bits());
    let mut tuple = [0u128; MAX_LANES];

    for row in 0..rows {
        if !bitmap_get(row_validity, row) {
            if let Some(v) = out_validity.as_deref_mut() {
                bitmap_set(v, row, false);
            }
            continue;
        }

        run_decode(desc.kind(), codes.get(row) & payload, width, &mut tuple[..n]);

        let base = row * n;
        for (j, &lane) in tuple[..n].iter().enumerate() {
            out.set(base + j, lane);
        }
        if let Some(v) = out_validity.as_deref_mut() {
            bitmap_set(v, row, true);
        }
    }

    Ok(if rows == 1 {
        VectorShape::Constant
    } else {
        VectorShape::Flat
    })
}
