// Joins per-container and per-group stats into the final report

use std::collections::{BTreeMap, BTreeSet, HashMap};

use regex::Regex;

use crate::aggregate::aggregate_by_group;
use crate::models::{
    ContainerReport, GroupReport, LabelingMeta, PromMeta, QueryMeta, Report,
};
use crate::resolve::{IdentityMap, canonical_id, resolve_group};
use crate::series::Sample;
use crate::stats::reduce;

/// Run identification and query metadata echoed into the report.
#[derive(Debug, Clone)]
pub struct RunMeta {
    pub test_run: String,
    pub start_epoch: i64,
    pub end_epoch: i64,
    pub step: String,
    pub prom_url: String,
    pub job: String,
    pub label_key: String,
    pub cpu_query: String,
    pub mem_query: String,
}

/// Assembles the report from the parsed CPU/memory series and the
/// identity map. Pure function of its inputs. Containers are keyed by
/// canonical docker id and never filtered; groups are filtered by
/// `group_filter` (search semantics) when one is given. A group present
/// in only one metric appears once, with NaN stats for the other.
pub fn assemble(
    cpu_series: &HashMap<String, Vec<Sample>>,
    mem_series: &HashMap<String, Vec<Sample>>,
    identity: &IdentityMap,
    group_filter: Option<&Regex>,
    meta: &RunMeta,
) -> Report {
    let mut containers = BTreeMap::new();
    let mut group_of_cgroup: HashMap<String, String> = HashMap::new();

    let all_cgroups: BTreeSet<&String> = cpu_series.keys().chain(mem_series.keys()).collect();
    for cgroup_id in all_cgroups {
        let docker_id = canonical_id(cgroup_id);
        let entry = identity.get(&docker_id).cloned().unwrap_or_default();
        let group = resolve_group(&docker_id, &entry);
        group_of_cgroup.insert(cgroup_id.clone(), group);

        let cpu_values = values_of(cpu_series.get(cgroup_id));
        let mem_values = values_of(mem_series.get(cgroup_id));
        containers.insert(
            docker_id.clone(),
            ContainerReport {
                docker_id,
                cgroup_id: cgroup_id.clone(),
                name: entry.name,
                service: entry.service,
                cpu_cores: reduce(&cpu_values),
                mem_bytes: reduce(&mem_values),
            },
        );
    }

    let cpu_groups = aggregate_by_group(cpu_series, &group_of_cgroup);
    let mem_groups = aggregate_by_group(mem_series, &group_of_cgroup);

    let mut groups = BTreeMap::new();
    let group_names: BTreeSet<&String> = cpu_groups.keys().chain(mem_groups.keys()).collect();
    for group in group_names {
        if let Some(re) = group_filter
            && !re.is_match(group)
        {
            continue;
        }
        groups.insert(
            group.clone(),
            GroupReport {
                cpu_cores: reduce(slice_of(cpu_groups.get(group))),
                mem_bytes: reduce(slice_of(mem_groups.get(group))),
            },
        );
    }

    Report {
        test_run: meta.test_run.clone(),
        start_epoch: meta.start_epoch,
        end_epoch: meta.end_epoch,
        step: meta.step.clone(),
        prometheus: PromMeta {
            url: meta.prom_url.clone(),
            job: meta.job.clone(),
            queries: QueryMeta {
                cpu: meta.cpu_query.clone(),
                mem: meta.mem_query.clone(),
            },
        },
        labeling: LabelingMeta {
            series_label_key: meta.label_key.clone(),
            cgroup_pattern: "/docker/<container-id>".to_string(),
            grouping: "service (from docker map) -> name -> docker id".to_string(),
        },
        containers,
        groups,
    }
}

fn values_of(samples: Option<&Vec<Sample>>) -> Vec<f64> {
    samples
        .map(|s| s.iter().map(|p| p.value).collect())
        .unwrap_or_default()
}

fn slice_of(values: Option<&Vec<f64>>) -> &[f64] {
    values.map(Vec::as_slice).unwrap_or(&[])
}
