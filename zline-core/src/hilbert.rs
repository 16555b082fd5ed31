// =============================================================================
// Hilbert Codec
// =============================================================================
//
// Dimension-generic Hilbert curve over N lanes of W bits each, following
// Skilling's transform ("Programming the Hilbert curve", AIP 2004). The
// curve shares Morton's bit layout after a sequence of per-bit-plane
// invert/exchange passes, so both codecs funnel through the same
// interleaver. Unlike Morton, consecutive Hilbert indices always decode to
// tuples one unit step apart in exactly one lane.
//
// For N = 1 every pass degenerates and the map is the identity.

use crate::intrinsics::bits::gray_decode;
use crate::{morton, MAX_CODE_BITS, MAX_LANES};

/// Map `lanes` (each `width` bits) to their Hilbert curve index.
///
/// `lanes.len()` must be in `1..=MAX_LANES` and `width * lanes.len()` must
/// not exceed 128. Lane bits at or above `width` must be zero.
///
/// # Example
///
/// ```ignore
/// let index = hilbert::encode(&[1, 2, 3], 8);
/// assert_eq!(index, 22);
/// ```
pub fn encode(lanes: &[u128], width: u32) -> u128 {
    let n = lanes.len();
    debug_assert!(n >= 1 && n <= MAX_LANES);
    debug_assert!(width as usize * n <= MAX_CODE_BITS as usize);

    let mut axes = [0u128; MAX_LANES];
    axes[..n].copy_from_slice(lanes);
    axes_to_transpose(&mut axes[..n], width);
    morton::encode(&axes[..n], width)
}

/// Map a Hilbert curve index back to its lanes.
///
/// `out.len()` determines the lane count; each decoded lane is confined to
/// `width` bits. Inverse of [`encode`] over `[0, 2^(width * out.len()))`.
pub fn decode(index: u128, width: u32, out: &mut [u128]) {
    debug_assert!(!out.is_empty() && out.len() <= MAX_LANES);
    debug_assert!(width as usize * out.len() <= MAX_CODE_BITS as usize);

    morton::decode(index, width, out);
    transpose_to_axes(out, width);
}

/// Forward Skilling transform: axes to transposed Hilbert digits, in place.
fn axes_to_transpose(axes: &mut [u128], width: u32) {
    let n = axes.len();
    let top = 1u128 << (width - 1);

    // Fold the bit planes from the top down. At each plane, an axis with the
    // plane bit set inverts the lower bits of axis 0; otherwise it exchanges
    // its own lower bits with axis 0's wherever they differ.
    let mut q = top;
    while q > 1 {
        let p = q - 1;
        for i in 0..n {
            if axes[i] & q != 0 {
                axes[0] ^= p;
            } else {
                let t = (axes[0] ^ axes[i]) & p;
                axes[0] ^= t;
                axes[i] ^= t;
            }
        }
        q >>= 1;
    }

    // Cross-axis gray step.
    for i in 1..n {
        axes[i] ^= axes[i - 1];
    }

    // Correction term: bit j must flip iff the last axis has odd parity
    // strictly above j, which is exactly the gray decode of its upper bits.
    let t = gray_decode(axes[n - 1] >> 1, width);
    for axis in axes.iter_mut() {
        *axis ^= t;
    }
}

/// Inverse Skilling transform: transposed Hilbert digits to axes, in place.
fn transpose_to_axes(axes: &mut [u128], width: u32) {
    let n = axes.len();
    let end = 2u128 << (width - 1);

    // Undo the gray step and the correction term in one pass.
    let t = axes[n - 1] >> 1;
    for i in (1..n).rev() {
        axes[i] ^= axes[i - 1];
    }
    axes[0] ^= t;

    // Unfold the bit planes bottom-up, reversing the encode-side fold.
    let mut q = 2u128;
    while q != end {
        let p = q - 1;
        for i in (0..n).rev() {
            if axes[i] & q != 0 {
                axes[0] ^= p;
            } else {
                let t = (axes[0] ^ axes[i]) & p;
                axes[0] ^= t;
                axes[i] ^= t;
            }
        }
        q <<= 1;
    }
}
