//! Latency percentile calculations for the harness.

use std::time::Duration;

/// Latency statistics with percentiles, in microseconds.
#[derive(Debug, Clone, Copy)]
pub struct LatencyStats {
    pub avg_us: f64,
    pub p50_us: f64,
    pub p95_us: f64,
    pub p99_us: f64,
}

/// Calculate latency percentiles from a list of per-batch durations.
pub fn calculate_percentiles(times: &[Duration]) -> LatencyStats {
    if times.is_empty() {
        return LatencyStats {
            avg_us: 0.0,
            p50_us: 0.0,
            p95_us: 0.0,
            p99_us: 0.0,
        };
    }

    let mut us: Vec<f64> = times
        .iter()
        .map(|d| d.as_secs_f64() * 1_000_000.0)
        .collect();
    us.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = us.len();
    let avg = us.iter().sum::<f64>() / n as f64;

    let p50_idx = (n as f64 * 0.50) as usize;
    let p95_idx = (n as f64 * 0.95) as usize;
    let p99_idx = (n as f64 * 0.99) as usize;

    LatencyStats {
        avg_us: avg,
        p50_us: us[p50_idx.min(n - 1)],
        p95_us: us[p95_idx.min(n - 1)],
        p99_us: us[p99_idx.min(n - 1)],
    }
}

/// Header for `--csv` output.
pub const CSV_HEADER: &str =
    "kind,lane_width,lane_count,code_width,rows,reps,encode_mrows_s,decode_mrows_s,\
     encode_p50_us,encode_p95_us,encode_p99_us,decode_p50_us,decode_p95_us,decode_p99_us";
