// =============================================================================
// Error Taxonomy
// =============================================================================
//
// Three failure classes, surfaced synchronously: inadmissible descriptors at
// bind time, contract-breaking inputs at execute time, and broken internal
// invariants that should never be seen. Messages name the offending
// (kind, element width, array length) so a SQL user can correct the call;
// they never carry buffer pointers or row indices.

use core::fmt;

use crate::descriptor::CurveKind;

/// Errors surfaced by descriptor binding and the batch driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The requested (kind, element width, array length) combination is not
    /// representable. Raised at bind time; retrying cannot help.
    Domain {
        /// Curve the caller asked for.
        kind: CurveKind,
        /// Element width in bits; 0 when no standard width could be derived.
        lane_width: u32,
        /// Requested array length.
        lane_count: usize,
    },
    /// A runtime input broke the batch contract.
    Input {
        /// The violated contract, in user-facing words.
        reason: &'static str,
    },
    /// A codec invariant broke. Seeing this means a bug in the host's buffer
    /// wiring or in this crate, not in the user's query.
    Internal {
        /// The invariant that broke.
        reason: &'static str,
    },
}

impl CodecError {
    pub(crate) const fn domain(kind: CurveKind, lane_width: u32, lane_count: usize) -> Self {
        CodecError::Domain {
            kind,
            lane_width,
            lane_count,
        }
    }

    pub(crate) const fn input(reason: &'static str) -> Self {
        CodecError::Input { reason }
    }

    pub(crate) const fn internal(reason: &'static str) -> Self {
        CodecError::Internal { reason }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Domain {
                kind,
                lane_width: 0,
                lane_count,
            } => write!(
                f,
                "{}: no element width fits a code of this width split into {} parts",
                kind.name(),
                lane_count
            ),
            CodecError::Domain {
                kind,
                lane_width,
                lane_count,
            } => write!(
                f,
                "{}: unsupported combination of {}-bit elements and array length {}",
                kind.name(),
                lane_width,
                lane_count
            ),
            CodecError::Input { reason } => write!(f, "{}", reason),
            CodecError::Internal { reason } => {
                write!(f, "internal codec invariant violated: {}", reason)
            }
        }
    }
}
