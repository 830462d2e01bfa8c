// Per-group timestamp-aligned summation of entity series

use std::collections::{BTreeMap, HashMap};

use crate::series::Sample;

/// Sums entity series into their groups, aligned by timestamp. Two
/// entities in one group reporting at the same instant add together;
/// duplicate timestamps within one entity sum as well. The returned
/// values are ordered by ascending timestamp; the timestamps themselves
/// are only used for alignment and are dropped. Entities missing from
/// `group_of_entity` are skipped.
pub fn aggregate_by_group(
    series_by_entity: &HashMap<String, Vec<Sample>>,
    group_of_entity: &HashMap<String, String>,
) -> HashMap<String, Vec<f64>> {
    let mut sums: HashMap<String, BTreeMap<i64, f64>> = HashMap::new();
    for (entity, samples) in series_by_entity {
        let Some(group) = group_of_entity.get(entity) else {
            continue;
        };
        let bucket = sums.entry(group.clone()).or_default();
        for s in samples {
            *bucket.entry(s.ts).or_insert(0.0) += s.value;
        }
    }
    sums.into_iter()
        .map(|(group, by_ts)| (group, by_ts.into_values().collect()))
        .collect()
}
