//! Round-trip verification and throughput harness for the zline codec.
//!
//! Sweeps every supported (curve, lane width, lane count) configuration,
//! pushes randomly generated batches through the vectorized driver in both
//! directions, verifies decode ∘ encode is the identity, and reports
//! throughput with latency percentiles.
//!
//! # Usage
//!
//! ```bash
//! # Full sweep with defaults
//! cargo run --release -p zline-bench
//!
//! # Hilbert only, bigger batches, CSV to stdout
//! cargo run --release -p zline-bench -- --kinds hilbert --rows 262144 --csv
//!
//! # Demonstrate order-preserving float keys
//! cargo run --release -p zline-bench -- --float-keys
//! ```

mod stats;
mod verify;

use std::time::{Duration, Instant};

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use zline_core::{
    batch, demote_from_unsigned, promote_to_unsigned, CurveKind, Descriptor, ElementRepr,
};

use crate::stats::{calculate_percentiles, CSV_HEADER};
use crate::verify::{count_mismatched_rows, CodeBuf, LaneBuf};

#[derive(Parser, Debug)]
#[command(name = "zline-bench")]
#[command(about = "Round-trip verification and throughput for the zline codec")]
struct Args {
    /// Curves to exercise (comma-separated: hilbert, morton)
    #[arg(long, value_delimiter = ',', default_values_t = vec!["hilbert".to_string(), "morton".to_string()])]
    kinds: Vec<String>,

    /// Rows per batch
    #[arg(long, default_value_t = 65536)]
    rows: usize,

    /// Batches per configuration (for latency percentiles)
    #[arg(long, default_value_t = 16)]
    reps: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Skip round-trip verification (throughput only)
    #[arg(long)]
    no_verify: bool,

    /// Output results as CSV to stdout
    #[arg(long)]
    csv: bool,

    /// Route float-admissible configurations through the order-preserving
    /// key transform and check sort-order compatibility
    #[arg(long)]
    float_keys: bool,
}

/// Every (lane width, lane count) row of the encode table.
fn all_configs() -> Vec<(u32, usize)> {
    let mut configs = Vec::new();
    for &(width, max_count) in &[(8u32, 16usize), (16, 8), (32, 4), (64, 2)] {
        for count in 1..=max_count {
            configs.push((width, count));
        }
    }
    configs
}

fn parse_kind(name: &str) -> CurveKind {
    match name {
        "hilbert" => CurveKind::Hilbert,
        "morton" => CurveKind::Morton,
        other => {
            eprintln!("unknown curve kind: {other} (expected hilbert or morton)");
            std::process::exit(2);
        }
    }
}

fn main() {
    let args = Args::parse();
    let kinds: Vec<CurveKind> = args.kinds.iter().map(|k| parse_kind(k)).collect();

    if args.csv {
        println!("{CSV_HEADER}");
    }

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let mut failures = 0usize;

    for &kind in &kinds {
        for (width, count) in all_configs() {
            failures += run_config(&args, &mut rng, kind, width, count);
        }
    }

    if args.float_keys {
        for &kind in &kinds {
            failures += run_float_keys(&args, &mut rng, kind);
        }
    }

    if failures > 0 {
        eprintln!("FAILED: {failures} configuration(s) had round-trip mismatches");
        std::process::exit(1);
    }
    if !args.csv {
        println!("all configurations verified");
    }
}

/// Run one (kind, width, count) configuration. Returns 1 on verification
/// failure, 0 otherwise.
fn run_config(
    args: &Args,
    rng: &mut Xoshiro256PlusPlus,
    kind: CurveKind,
    width: u32,
    count: usize,
) -> usize {
    let enc = Descriptor::bind_encode(kind, ElementRepr::Uint, width, count)
        .expect("configuration comes from the encode table");
    let dec = Descriptor::bind_decode(kind, enc.code_width(), count, false, true)
        .expect("decode of a bound encode is always admissible");

    let rows = args.rows;
    let mask = if width == 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    let values: Vec<u64> = (0..rows * count).map(|_| rng.gen::<u64>() & mask).collect();

    let lanes = LaneBuf::from_values(width, &values);
    let mut codes = CodeBuf::zeroed(enc.code_width(), rows);
    let mut decoded = LaneBuf::zeroed(width, rows * count);

    let mut encode_times = Vec::with_capacity(args.reps);
    let mut decode_times = Vec::with_capacity(args.reps);
    let mut mismatches = 0usize;

    for _ in 0..args.reps {
        let start = Instant::now();
        batch::encode_batch(
            &enc,
            lanes.as_slice(),
            None,
            None,
            codes.as_mut_slice(),
            None,
            rows,
        )
        .expect("well-formed batch");
        encode_times.push(start.elapsed());

        let start = Instant::now();
        batch::decode_batch(
            &dec,
            codes.as_slice(),
            None,
            decoded.as_mut_slice(),
            None,
            rows,
        )
        .expect("well-formed batch");
        decode_times.push(start.elapsed());

        if !args.no_verify {
            mismatches += count_mismatched_rows(&values, &decoded.values(), count);
        }
    }

    report(
        args,
        kind,
        width,
        count,
        enc.code_width(),
        &encode_times,
        &decode_times,
        mismatches,
    );
    (mismatches > 0) as usize
}

/// Exercise the order-preserving float keys on the float-admissible set:
/// promote finite floats to keys, push them through encode and decode, then
/// demote and require the original bit patterns back.
fn run_float_keys(args: &Args, rng: &mut Xoshiro256PlusPlus, kind: CurveKind) -> usize {
    let mut failures = 0usize;

    for &(width, count) in &[(32u32, 2usize), (64, 2)] {
        let enc = Descriptor::bind_encode(kind, ElementRepr::Float, width, count)
            .expect("float-admissible configuration");

        let rows = args.rows.min(4096);
        let mut mismatches = 0usize;

        // Finite floats in a modest range; keys must round-trip exactly.
        let raw: Vec<u64> = (0..rows * count)
            .map(|_| {
                let v = rng.gen_range(-1.0e6f64..1.0e6);
                if width == 32 {
                    (v as f32).to_bits() as u64
                } else {
                    v.to_bits()
                }
            })
            .collect();
        let keyed: Vec<u64> = raw
            .iter()
            .map(|&bits| promote_to_unsigned(bits as u128, width, ElementRepr::Float) as u64)
            .collect();

        let lanes = LaneBuf::from_values(width, &keyed);
        let mut codes = CodeBuf::zeroed(enc.code_width(), rows);
        let mut decoded = LaneBuf::zeroed(width, rows * count);

        batch::encode_batch(
            &enc,
            lanes.as_slice(),
            None,
            None,
            codes.as_mut_slice(),
            None,
            rows,
        )
        .expect("well-formed batch");

        let dec = Descriptor::bind_decode(kind, enc.code_width(), count, true, false)
            .expect("float decode of a float encode");
        batch::decode_batch(
            &dec,
            codes.as_slice(),
            None,
            decoded.as_mut_slice(),
            None,
            rows,
        )
        .expect("well-formed batch");

        let decoded_keys = decoded.values();
        for (&orig, &key) in raw.iter().zip(decoded_keys.iter()) {
            let back = demote_from_unsigned(key as u128, width, ElementRepr::Float) as u64;
            if back != orig {
                mismatches += 1;
            }
        }

        if mismatches > 0 {
            eprintln!(
                "{} float-keys {}x{}: {} mismatched lanes",
                kind.name(),
                width,
                count,
                mismatches
            );
            failures += 1;
        } else if !args.csv {
            println!(
                "{:>7} float-keys w{:<2} n{:<2} ok ({} rows)",
                kind.name(),
                width,
                count,
                rows
            );
        }
    }
    failures
}

#[allow(clippy::too_many_arguments)]
fn report(
    args: &Args,
    kind: CurveKind,
    width: u32,
    count: usize,
    code_width: u32,
    encode_times: &[Duration],
    decode_times: &[Duration],
    mismatches: usize,
) {
    let enc_stats = calculate_percentiles(encode_times);
    let dec_stats = calculate_percentiles(decode_times);
    let mrows = |stats_avg_us: f64| {
        if stats_avg_us == 0.0 {
            0.0
        } else {
            args.rows as f64 / stats_avg_us
        }
    };

    if args.csv {
        println!(
            "{},{},{},{},{},{},{:.3},{:.3},{:.1},{:.1},{:.1},{:.1},{:.1},{:.1}",
            kind.name(),
            width,
            count,
            code_width,
            args.rows,
            args.reps,
            mrows(enc_stats.avg_us),
            mrows(dec_stats.avg_us),
            enc_stats.p50_us,
            enc_stats.p95_us,
            enc_stats.p99_us,
            dec_stats.p50_us,
            dec_stats.p95_us,
            dec_stats.p99_us,
        );
    } else {
        let verdict = if args.no_verify {
            "-"
        } else if mismatches == 0 {
            "ok"
        } else {
            "MISMATCH"
        };
        println!(
            "{:>7} w{:<2} n{:<2} -> u{:<3} encode {:>8.3} Mrows/s decode {:>8.3} Mrows/s p99 {:>7.1}/{:<7.1} us  {}",
            kind.name(),
            width,
            count,
            code_width,
            mrows(enc_stats.avg_us),
            mrows(dec_stats.avg_us),
            enc_stats.p99_us,
            dec_stats.p99_us,
            verdict
        );
    }
}
