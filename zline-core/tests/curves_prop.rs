//! Property-based tests for the Morton and Hilbert codecs.
//!
//! Verifies the codec-level contracts over random inputs for every legal
//! (lane width, lane count) combination: round trips in both directions,
//! the Morton bit layout, and the Hilbert unit-step locality guarantee.

mod common;

use proptest::prelude::*;

use zline_core::{hilbert, morton};

/// Pick a random row of the encode table plus enough raw material for a
/// 16-lane tuple and one code word.
fn table_row_and_lanes() -> impl Strategy<Value = ((u32, usize, u32), Vec<u64>, (u64, u64))> {
    (
        0usize..common::ENCODE_TABLE.len(),
        proptest::collection::vec(any::<u64>(), 16),
        any::<(u64, u64)>(),
    )
        .prop_map(|(row, raw, code_raw)| (common::ENCODE_TABLE[row], raw, code_raw))
}

fn masked_lanes(raw: &[u64], width: u32, count: usize) -> Vec<u128> {
    raw[..count]
        .iter()
        .map(|&v| v as u128 & common::mask(width))
        .collect()
}

proptest! {
    // =========================================================================
    // Round trips
    // =========================================================================

    #[test]
    fn prop_morton_roundtrip(input in table_row_and_lanes()) {
        let ((width, count, _), raw, _) = input;
        let lanes = masked_lanes(&raw, width, count);

        let code = morton::encode(&lanes, width);
        let mut back = vec![0u128; count];
        morton::decode(code, width, &mut back);
        prop_assert_eq!(back, lanes);
    }

    #[test]
    fn prop_hilbert_roundtrip(input in table_row_and_lanes()) {
        let ((width, count, _), raw, _) = input;
        let lanes = masked_lanes(&raw, width, count);

        let index = hilbert::encode(&lanes, width);
        let mut back = vec![0u128; count];
        hilbert::decode(index, width, &mut back);
        prop_assert_eq!(back, lanes);
    }

    #[test]
    fn prop_encode_of_decode_is_identity(input in table_row_and_lanes()) {
        // The opposite composition: every code word in the payload domain
        // decodes to a tuple that encodes back to it, for both curves.
        let ((width, count, _), _, (hi, lo)) = input;
        let payload = width * count as u32;
        let code = (((hi as u128) << 64) | lo as u128) & common::mask(payload);

        let mut lanes = vec![0u128; count];
        morton::decode(code, width, &mut lanes);
        prop_assert_eq!(morton::encode(&lanes, width), code);

        hilbert::decode(code, width, &mut lanes);
        prop_assert_eq!(hilbert::encode(&lanes, width), code);
    }

    // =========================================================================
    // Output domain
    // =========================================================================

    #[test]
    fn prop_codes_stay_in_payload_domain(input in table_row_and_lanes()) {
        let ((width, count, code_width), raw, _) = input;
        let lanes = masked_lanes(&raw, width, count);
        let payload = width * count as u32;

        let z = morton::encode(&lanes, width);
        let h = hilbert::encode(&lanes, width);
        prop_assert_eq!(z & !common::mask(payload), 0);
        prop_assert_eq!(h & !common::mask(payload), 0);
        // And a fortiori within the storage width.
        prop_assert!(payload <= code_width);
    }

    // =========================================================================
    // Morton layout
    // =========================================================================

    #[test]
    fn prop_morton_bit_layout(input in table_row_and_lanes()) {
        let ((width, count, _), raw, _) = input;
        let lanes = masked_lanes(&raw, width, count);

        let code = morton::encode(&lanes, width);
        let n = count as u32;
        for (j, &lane) in lanes.iter().enumerate() {
            for i in 0..width {
                let pos = i * n + (n - 1 - j as u32);
                prop_assert_eq!((code >> pos) & 1, (lane >> i) & 1);
            }
        }
    }

    #[test]
    fn prop_morton_lane0_owns_top_bit(input in table_row_and_lanes()) {
        // The top payload bit always comes from lane 0's top bit.
        let ((width, count, _), raw, _) = input;
        let lanes = masked_lanes(&raw, width, count);
        let payload = width * count as u32;

        let code = morton::encode(&lanes, width);
        prop_assert_eq!((code >> (payload - 1)) & 1, (lanes[0] >> (width - 1)) & 1);
    }

    // =========================================================================
    // Hilbert locality
    // =========================================================================

    #[test]
    fn prop_hilbert_adjacent_indices_are_unit_steps(input in table_row_and_lanes()) {
        let ((width, count, _), _, (hi, lo)) = input;
        let payload = width * count as u32;
        let domain = common::mask(payload);

        let mut index = (((hi as u128) << 64) | lo as u128) & domain;
        if index == domain {
            index -= 1;
        }

        let mut a = vec![0u128; count];
        let mut b = vec![0u128; count];
        hilbert::decode(index, width, &mut a);
        hilbert::decode(index + 1, width, &mut b);

        let mut diffs = 0usize;
        for (&x, &y) in a.iter().zip(b.iter()) {
            if x != y {
                diffs += 1;
                let step = if x > y { x - y } else { y - x };
                prop_assert_eq!(step, 1, "lanes must differ by exactly one unit");
            }
        }
        prop_assert_eq!(diffs, 1, "exactly one lane must change");
    }

    // =========================================================================
    // Injectivity (sampled)
    // =========================================================================

    #[test]
    fn prop_distinct_tuples_get_distinct_codes(input in table_row_and_lanes(), flip in 0usize..16, bit in 0u32..64) {
        let ((width, count, _), raw, _) = input;
        let lanes = masked_lanes(&raw, width, count);

        // Perturb one lane by one bit; both codecs must produce new codes.
        let mut other = lanes.clone();
        let j = flip % count;
        other[j] ^= 1u128 << (bit % width);

        prop_assert_ne!(morton::encode(&other, width), morton::encode(&lanes, width));
        prop_assert_ne!(hilbert::encode(&other, width), hilbert::encode(&lanes, width));
    }
}

// =========================================================================
// Exhaustive small-domain bijection check
// =========================================================================

#[test]
fn test_hilbert_bijection_exhaustive_8x8() {
    // (width 8, two lanes) restricted to a full 3-bit subcurve: indices
    // 0..64 must visit 64 distinct tuples, each a unit step from the last.
    let mut seen = std::collections::HashSet::new();
    let mut prev: Option<(u128, u128)> = None;
    for index in 0u128..64 {
        let mut lanes = [0u128; 2];
        hilbert::decode(index, 8, &mut lanes);
        assert!(seen.insert((lanes[0], lanes[1])), "duplicate at {}", index);
        if let Some((pa, pb)) = prev {
            let manhattan =
                lanes[0].abs_diff(pa) + lanes[1].abs_diff(pb);
            assert_eq!(manhattan, 1, "jump at index {}", index);
        }
        prev = Some((lanes[0], lanes[1]));
    }
}
