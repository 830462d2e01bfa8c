// Prometheus query_range response schema + report output model

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::stats::SummaryStats;

/// Top-level query_range response. The client checks `status`; anything
/// but "success" aborts the run.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRangeResponse {
    pub status: String,
    #[serde(default)]
    pub data: QueryRangeData,
    /// Set by Prometheus when status != "success".
    #[serde(default, rename = "errorType")]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRangeData {
    #[serde(default)]
    pub result: Vec<MatrixSeries>,
}

/// One series of a matrix result: label map plus raw sample pairs.
/// Pairs stay loose JSON so the series parser can reject malformed ones
/// one at a time instead of failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct MatrixSeries {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    #[serde(default)]
    pub values: Vec<serde_json::Value>,
}

/// Final report written to --out. Containers and groups are BTreeMaps so
/// the JSON key order is stable between runs.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub test_run: String,
    pub start_epoch: i64,
    pub end_epoch: i64,
    pub step: String,
    pub prometheus: PromMeta,
    pub labeling: LabelingMeta,
    pub containers: BTreeMap<String, ContainerReport>,
    pub groups: BTreeMap<String, GroupReport>,
}

/// Source metadata echoed into the report for reproducibility.
#[derive(Debug, Clone, Serialize)]
pub struct PromMeta {
    pub url: String,
    pub job: String,
    pub queries: QueryMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryMeta {
    pub cpu: String,
    pub mem: String,
}

/// How container identity and grouping were derived.
#[derive(Debug, Clone, Serialize)]
pub struct LabelingMeta {
    pub series_label_key: String,
    pub cgroup_pattern: String,
    pub grouping: String,
}

/// Per-container stats, keyed in the report by the 12-char docker id.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerReport {
    pub docker_id: String,
    pub cgroup_id: String,
    pub name: Option<String>,
    pub service: Option<String>,
    pub cpu_cores: SummaryStats,
    pub mem_bytes: SummaryStats,
}

/// Per-group stats, keyed by the resolved group name.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub cpu_cores: SummaryStats,
    pub mem_bytes: SummaryStats,
}
