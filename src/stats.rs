// Summary reduction: avg / p95 / max over an unordered sample set

use serde::Serialize;

/// Reduced stats for one metric. NaN fields mean "no data" and serialize
/// to JSON null.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SummaryStats {
    pub avg: f64,
    pub p95: f64,
    pub max: f64,
}

/// Reduces a sample set to {avg, p95, max}. Empty input yields all-NaN.
/// Order of the input does not matter.
pub fn reduce(values: &[f64]) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats {
            avg: f64::NAN,
            p95: f64::NAN,
            max: f64::NAN,
        };
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    SummaryStats {
        avg,
        p95: percentile(values, 0.95),
        max,
    }
}

/// Percentile with linear interpolation between order statistics:
/// sort ascending, idx = p * (n - 1), lerp v[floor(idx)] and v[ceil(idx)].
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut vs = values.to_vec();
    vs.sort_by(|a, b| a.total_cmp(b));
    if vs.len() == 1 {
        return vs[0];
    }
    let idx = (vs.len() - 1) as f64 * p;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        return vs[lo];
    }
    let w = idx - lo as f64;
    vs[lo] * (1.0 - w) + vs[hi] * w
}
