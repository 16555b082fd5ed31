// =============================================================================
// Descriptors and the Output-Width Type Algebra
// =============================================================================
//
// A descriptor fully parameterizes one bound call: curve kind, direction,
// lane width, lane count, element representation, and the derived code-word
// width. Binding validates admissibility up front; a `Descriptor` value is
// immutable and always well-formed, so the execute path never re-checks the
// type algebra.

use crate::error::CodecError;
use crate::MAX_LANES;

/// Which space-filling curve a call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Locality-preserving Hilbert curve.
    Hilbert,
    /// Bit-interleaving Morton (Z-order) curve.
    Morton,
}

impl CurveKind {
    /// Lower-case name used in error messages and tooling output.
    pub const fn name(self) -> &'static str {
        match self {
            CurveKind::Hilbert => "hilbert",
            CurveKind::Morton => "morton",
        }
    }
}

/// How lane bit patterns are typed in the host's buffers.
///
/// The codec moves bit patterns verbatim either way; the representation
/// selects buffer typing on the host side and which
/// [`promote_to_unsigned`](crate::promote_to_unsigned) transform applies
/// when a caller wants order-preserving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRepr {
    /// Unsigned integer lanes.
    Uint,
    /// Two's-complement signed integer lanes.
    Sint,
    /// IEEE-754 binary32/binary64 lanes, bit-cast into the matching
    /// integer width.
    Float,
}

/// Transfer direction of a bound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Tuples in, code words out.
    Encode,
    /// Code words in, tuples out.
    Decode,
}

/// Lane widths a descriptor can bind.
const LANE_WIDTHS: [u32; 4] = [8, 16, 32, 64];

/// Round a bit count up to the smallest standard storage width.
const fn round_up_standard(bits: u32) -> Option<u32> {
    match bits {
        1..=8 => Some(8),
        9..=16 => Some(16),
        17..=32 => Some(32),
        33..=64 => Some(64),
        65..=128 => Some(128),
        _ => None,
    }
}

/// Round a bit count down to the largest standard lane width.
const fn floor_lane_width(bits: u32) -> Option<u32> {
    match bits {
        0..=7 => None,
        8..=15 => Some(8),
        16..=31 => Some(16),
        32..=63 => Some(32),
        _ => Some(64),
    }
}

/// Whether (lane_width, lane_count) admits IEEE-754 lanes.
///
/// binary32 tuples go up to four lanes, binary64 up to two; everything else
/// has no float logical type on the host side.
const fn float_admissible(lane_width: u32, lane_count: usize) -> bool {
    matches!((lane_width, lane_count), (32, 1..=4) | (64, 1..=2))
}

/// Immutable record of one bound call.
///
/// The only way to obtain a `Descriptor` is through [`Descriptor::bind_encode`]
/// or [`Descriptor::bind_decode`]; holding one is proof that the combination
/// passed every admissibility check. Descriptors are `Copy` and carry no
/// interior state, so concurrent readers need no synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    kind: CurveKind,
    direction: Direction,
    lane_width: u32,
    lane_count: usize,
    element_repr: ElementRepr,
    code_width: u32,
}

impl Descriptor {
    /// Bind an encode call: N lanes of `lane_width` bits in, one code word
    /// out.
    ///
    /// The code-word width is the smallest standard width holding
    /// `lane_width * lane_count` bits:
    ///
    /// | lane width | lane count | code width |
    /// |-----------:|-----------:|-----------:|
    /// | 8          | 1          | 8          |
    /// | 8          | 2          | 16         |
    /// | 8          | 3..=4      | 32         |
    /// | 8          | 5..=8      | 64         |
    /// | 8          | 9..=16     | 128        |
    /// | 16         | 1          | 16         |
    /// | 16         | 2          | 32         |
    /// | 16         | 3..=4      | 64         |
    /// | 16         | 5..=8      | 128        |
    /// | 32         | 1          | 32         |
    /// | 32         | 2          | 64         |
    /// | 32         | 3..=4      | 128        |
    /// | 64         | 1          | 64         |
    /// | 64         | 2          | 128        |
    ///
    /// # Errors
    ///
    /// [`CodecError::Domain`] for any (width, count) outside the table, and
    /// for [`ElementRepr::Float`] outside the float-admissible set
    /// (binary32 × 1..=4, binary64 × 1..=2).
    pub fn bind_encode(
        kind: CurveKind,
        element_repr: ElementRepr,
        lane_width: u32,
        lane_count: usize,
    ) -> Result<Self, CodecError> {
        let code_width = Self::encode_code_width(kind, lane_width, lane_count)?;
        if matches!(element_repr, ElementRepr::Float) && !float_admissible(lane_width, lane_count)
        {
            return Err(CodecError::domain(kind, lane_width, lane_count));
        }
        Ok(Self {
            kind,
            direction: Direction::Encode,
            lane_width,
            lane_count,
            element_repr,
            code_width,
        })
    }

    /// Bind a decode call: code words of `code_width` bits in, N lanes out.
    ///
    /// The lane width is derived as `code_width / lane_count` floored to a
    /// standard width, then checked against the encode table: decoding is
    /// only admissible where some encode produced this code width.
    /// `return_float` selects [`ElementRepr::Float`] output (restricted to
    /// the float-admissible set); otherwise `return_unsigned` picks between
    /// [`ElementRepr::Uint`] and [`ElementRepr::Sint`].
    ///
    /// # Errors
    ///
    /// [`CodecError::Domain`] when no lane width reproduces `code_width`,
    /// or when `return_float` is requested outside the float-admissible set.
    pub fn bind_decode(
        kind: CurveKind,
        code_width: u32,
        lane_count: usize,
        return_float: bool,
        return_unsigned: bool,
    ) -> Result<Self, CodecError> {
        if lane_count == 0 || lane_count > MAX_LANES {
            return Err(CodecError::domain(kind, 0, lane_count));
        }
        let lane_width = match floor_lane_width(code_width / lane_count as u32) {
            Some(w) => w,
            None => return Err(CodecError::domain(kind, 0, lane_count)),
        };
        // The derived width must reproduce the code width under the encode
        // table, otherwise this code cannot have come from a bound encode.
        if Self::encode_code_width(kind, lane_width, lane_count)? != code_width {
            return Err(CodecError::domain(kind, lane_width, lane_count));
        }

        let element_repr = if return_float {
            if !float_admissible(lane_width, lane_count) {
                return Err(CodecError::domain(kind, lane_width, lane_count));
            }
            ElementRepr::Float
        } else if return_unsigned {
            ElementRepr::Uint
        } else {
            ElementRepr::Sint
        };

        Ok(Self {
            kind,
            direction: Direction::Decode,
            lane_width,
            lane_count,
            element_repr,
            code_width,
        })
    }

    /// Code-word width for an encode of (lane_width, lane_count), or a
    /// domain error naming the pair.
    fn encode_code_width(
        kind: CurveKind,
        lane_width: u32,
        lane_count: usize,
    ) -> Result<u32, CodecError> {
        if !LANE_WIDTHS.contains(&lane_width) || lane_count == 0 || lane_count > MAX_LANES {
            return Err(CodecError::domain(kind, lane_width, lane_count));
        }
        match round_up_standard(lane_width * lane_count as u32) {
            Some(code_width) => Ok(code_width),
            None => Err(CodecError::domain(kind, lane_width, lane_count)),
        }
    }

    /// Curve kind this descriptor was bound for.
    pub const fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Transfer direction this descriptor was bound for.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Lane width in bits (8, 16, 32, or 64).
    pub const fn lane_width(&self) -> u32 {
        self.lane_width
    }

    /// Number of lanes per tuple (1..=16).
    pub const fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Element representation of the lane buffers.
    pub const fn element_repr(&self) -> ElementRepr {
        self.element_repr
    }

    /// Code-word storage width in bits (8, 16, 32, 64, or 128).
    pub const fn code_width(&self) -> u32 {
        self.code_width
    }

    /// Payload width in bits: `lane_width * lane_count`.
    ///
    /// Code-word bits at or above this position are always zero.
    pub const fn payload_bits(&self) -> u32 {
        self.lane_width * self.lane_count as u32
    }
}
