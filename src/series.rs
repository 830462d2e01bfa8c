// Matrix response -> per-entity sample series (tolerant per-pair parse)

use std::collections::HashMap;

use crate::models::QueryRangeResponse;

/// One parsed sample: epoch seconds + finite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub ts: i64,
    pub value: f64,
}

/// Extracts per-entity series from a matrix response, keyed by the value
/// of `label_key`. Series without that label are dropped; pairs that do
/// not parse, and non-finite values, are skipped; entities left with no
/// samples are omitted entirely.
pub fn parse_matrix(resp: &QueryRangeResponse, label_key: &str) -> HashMap<String, Vec<Sample>> {
    let mut out: HashMap<String, Vec<Sample>> = HashMap::new();
    for series in &resp.data.result {
        let Some(key) = series.metric.get(label_key).filter(|k| !k.is_empty()) else {
            continue;
        };
        let mut points = Vec::with_capacity(series.values.len());
        for pair in &series.values {
            if let Some(sample) = parse_pair(pair) {
                points.push(sample);
            }
        }
        if !points.is_empty() {
            out.insert(key.clone(), points);
        }
    }
    out
}

/// Parses one raw `[ts, "value"]` pair. Prometheus sends the timestamp
/// as a JSON number (possibly fractional) and the value as a string, but
/// both forms are accepted for either slot. Fractional timestamps
/// truncate to whole seconds.
fn parse_pair(pair: &serde_json::Value) -> Option<Sample> {
    let arr = pair.as_array()?;
    if arr.len() != 2 {
        return None;
    }
    let ts = number_of(&arr[0])?;
    let value = number_of(&arr[1])?;
    if !ts.is_finite() || !value.is_finite() {
        return None;
    }
    Some(Sample {
        ts: ts as i64,
        value,
    })
}

fn number_of(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
