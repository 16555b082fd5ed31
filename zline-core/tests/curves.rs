//! Fixture tests for the Morton and Hilbert codecs.
//!
//! Pins the exact bit-level behavior both curves must reproduce: known code
//! words for known tuples, the canonical 2-D Hilbert walk, grid cross
//! sections, and the float scenarios from the host's SQL surface.

mod common;

use zline_core::{hilbert, morton};

fn decode_lanes(
    decode: fn(u128, u32, &mut [u128]),
    code: u128,
    width: u32,
    n: usize,
) -> Vec<u128> {
    let mut out = vec![0u128; n];
    decode(code, width, &mut out);
    out
}

// =========================================================================
// Seed scenarios
// =========================================================================

#[test]
fn test_hilbert_u8_triple() {
    assert_eq!(hilbert::encode(&[1, 2, 3], 8), 22);
    assert_eq!(decode_lanes(hilbert::decode, 22, 8, 3), vec![1, 2, 3]);
}

#[test]
fn test_morton_u8_triple() {
    assert_eq!(morton::encode(&[1, 2, 3], 8), 29);
    assert_eq!(decode_lanes(morton::decode, 29, 8, 3), vec![1, 2, 3]);
}

#[test]
fn test_morton_u8_quad() {
    // Pinned against the morton stack the host's original build shipped.
    assert_eq!(morton::encode(&[5, 4, 12, 129], 8), 268_447_241);
}

#[test]
fn test_known_vectors_across_widths() {
    assert_eq!(hilbert::encode(&[7, 3], 16), 26);
    assert_eq!(hilbert::encode(&[100, 200], 32), 28_272);
    assert_eq!(hilbert::encode(&[1, 2], 64), 7);
    assert_eq!(morton::encode(&[1, 2], 64), 6);
}

// =========================================================================
// Canonical 2-D Hilbert walk
// =========================================================================

/// First sixteen steps of the 2-D curve, axis 0 first.
const HILBERT_2D_WALK: [(u128, u128, u128); 16] = [
    (0, 0, 0),
    (1, 0, 1),
    (1, 1, 2),
    (0, 1, 3),
    (0, 2, 4),
    (0, 3, 5),
    (1, 3, 6),
    (1, 2, 7),
    (2, 2, 8),
    (2, 3, 9),
    (3, 3, 10),
    (3, 2, 11),
    (3, 1, 12),
    (2, 1, 13),
    (2, 0, 14),
    (3, 0, 15),
];

#[test]
fn test_hilbert_2d_walk_all_widths() {
    for width in [8u32, 16, 32, 64] {
        for &(a, b, index) in &HILBERT_2D_WALK {
            assert_eq!(
                hilbert::encode(&[a, b], width),
                index,
                "({}, {}) at width {}",
                a,
                b,
                width
            );
            assert_eq!(
                decode_lanes(hilbert::decode, index, width, 2),
                vec![a, b],
                "index {} at width {}",
                index,
                width
            );
        }
    }
}

// =========================================================================
// 5x5 grid cross sections (8-bit lanes, rows indexed by lane 0)
// =========================================================================

#[test]
fn test_hilbert_5x5_grid() {
    let expected: [[u128; 5]; 5] = [
        [0, 3, 4, 5, 58],
        [1, 2, 7, 6, 57],
        [14, 13, 8, 9, 54],
        [15, 12, 11, 10, 53],
        [16, 17, 30, 31, 32],
    ];
    for (a, row) in expected.iter().enumerate() {
        for (b, &index) in row.iter().enumerate() {
            assert_eq!(
                hilbert::encode(&[a as u128, b as u128], 8),
                index,
                "({}, {})",
                a,
                b
            );
        }
    }
}

#[test]
fn test_morton_5x5_grid() {
    let expected: [[u128; 5]; 5] = [
        [0, 1, 4, 5, 16],
        [2, 3, 6, 7, 18],
        [8, 9, 12, 13, 24],
        [10, 11, 14, 15, 26],
        [32, 33, 36, 37, 48],
    ];
    for (a, row) in expected.iter().enumerate() {
        for (b, &code) in row.iter().enumerate() {
            assert_eq!(
                morton::encode(&[a as u128, b as u128], 8),
                code,
                "({}, {})",
                a,
                b
            );
        }
    }
}

// =========================================================================
// Float scenarios (bit patterns pass through the codec verbatim)
// =========================================================================

#[test]
fn test_hilbert_f32_pair() {
    let lanes = [37.8f32.to_bits() as u128, 0.2f32.to_bits() as u128];
    assert_eq!(hilbert::encode(&lanes, 32), 2_303_654_869_236_839_926);
}

#[test]
fn test_hilbert_f32_triple_roundtrip() {
    let lanes: Vec<u128> = [1.0f32, 5.0, 6.0]
        .iter()
        .map(|f| f.to_bits() as u128)
        .collect();
    let index = hilbert::encode(&lanes, 32);
    assert_eq!(index, 8_002_395_622_101_954_260_073_409_974);

    let decoded = decode_lanes(hilbert::decode, index, 32, 3);
    let floats: Vec<f32> = decoded.iter().map(|&b| f32::from_bits(b as u32)).collect();
    assert_eq!(floats, vec![1.0, 5.0, 6.0]);
}

#[test]
fn test_hilbert_f64_vectors() {
    assert_eq!(
        hilbert::encode(&[3.5f64.to_bits() as u128], 64),
        4_615_063_718_147_915_776
    );
    let lanes = [(-2.5f64).to_bits() as u128, 7.25f64.to_bits() as u128];
    assert_eq!(
        hilbert::encode(&lanes, 64),
        269_390_229_884_225_591_835_703_120_230_596_913_834
    );
}

// =========================================================================
// Degenerate and boundary shapes
// =========================================================================

#[test]
fn test_single_lane_is_identity() {
    for width in [8u32, 16, 32, 64] {
        let mut rng = common::SplitMix64::new(width as u64);
        for _ in 0..200 {
            let lane = rng.lane(width);
            assert_eq!(hilbert::encode(&[lane], width), lane);
            assert_eq!(morton::encode(&[lane], width), lane);
            assert_eq!(decode_lanes(hilbert::decode, lane, width, 1), vec![lane]);
        }
    }
}

#[test]
fn test_sixteen_lane_code_words() {
    let lanes: Vec<u128> = (0u128..16).collect();
    assert_eq!(hilbert::encode(&lanes, 8), 11_532_222_901_308_493_824);
    assert_eq!(morton::encode(&lanes, 8), 71_792_677_019_145_557);
    assert_eq!(
        decode_lanes(hilbert::decode, 11_532_222_901_308_493_824, 8, 16),
        lanes
    );
}

#[test]
fn test_full_domain_corners() {
    for &(width, count, code_width) in common::ENCODE_TABLE {
        let payload = width * count as u32;
        let zeros = vec![0u128; count];
        let ones = vec![common::mask(width); count];

        assert_eq!(morton::encode(&zeros, width), 0);
        assert_eq!(morton::encode(&ones, width), common::mask(payload));
        assert_eq!(hilbert::encode(&zeros, width), 0);

        // The storage width is tight: whenever the payload exceeds the next
        // smaller standard width, some code word does too.
        let next_smaller = code_width / 2;
        if payload > next_smaller {
            assert!(
                morton::encode(&ones, width) > common::mask(next_smaller),
                "({}, {}) must overflow u{}",
                width,
                count,
                next_smaller
            );
        }
        // The all-ones corner is on the curve, so it must round-trip even
        // though its index is not the maximum.
        let corner = hilbert::encode(&ones, width);
        assert!(corner <= common::mask(payload));
        assert_eq!(decode_lanes(hilbert::decode, corner, width, count), ones);
    }
}

// =========================================================================
// Morton bit layout (lane 0 most significant within each group)
// =========================================================================

#[test]
fn test_morton_matches_oracle() {
    let mut rng = common::SplitMix64::new(0xD8);
    for &(width, count, _) in common::ENCODE_TABLE {
        for _ in 0..50 {
            let lanes: Vec<u128> = (0..count).map(|_| rng.lane(width)).collect();
            assert_eq!(
                morton::encode(&lanes, width),
                common::morton_oracle(&lanes, width),
                "width {} count {}",
                width,
                count
            );
        }
    }
}

#[test]
fn test_morton_axis_unit_bits() {
    // Bit i of lane j must land exactly at position i*n + (n-1-j).
    let n = 3usize;
    for j in 0..n {
        for i in 0..8u32 {
            let mut lanes = vec![0u128; n];
            lanes[j] = 1u128 << i;
            let expected = 1u128 << (i * n as u32 + (n - 1 - j) as u32);
            assert_eq!(morton::encode(&lanes, 8), expected, "lane {} bit {}", j, i);
        }
    }
}
