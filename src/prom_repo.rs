// Prometheus HTTP API client (query_range only)

use std::time::Duration;

use anyhow::{Context, ensure};
use reqwest::Client;
use tracing::debug;

use crate::models::QueryRangeResponse;

/// Range queries over a long window can be slow on busy servers.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// cgroup matcher shared by both queries: cAdvisor docker containers only.
const CGROUP_FILTER: &str = r#"id=~"/docker/[0-9a-f]{12,64}""#;

pub struct PromRepo {
    client: Client,
    base_url: String,
}

impl PromRepo {
    /// Builds a client for the given server URL (trailing slash tolerated).
    pub fn connect(prom_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self {
            client,
            base_url: prom_url.trim_end_matches('/').to_string(),
        })
    }

    /// Runs a range query. Transport failure, a non-success HTTP status,
    /// and a non-"success" payload status are all fatal; per-sample
    /// anomalies are the parser's concern.
    pub async fn query_range(
        &self,
        query: &str,
        start: i64,
        end: i64,
        step: &str,
    ) -> anyhow::Result<QueryRangeResponse> {
        let url = format!("{}/api/v1/query_range", self.base_url);
        debug!(query, start, end, step, "query_range");

        let start_s = start.to_string();
        let end_s = end.to_string();
        let params = [
            ("query", query),
            ("start", start_s.as_str()),
            ("end", end_s.as_str()),
            ("step", step),
        ];
        let resp = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("querying {url}"))?;

        let status = resp.status();
        ensure!(status.is_success(), "prometheus returned {status} for {url}");

        let body: QueryRangeResponse = resp
            .json()
            .await
            .context("decoding query_range response")?;
        ensure!(
            body.status == "success",
            "prometheus error: {} {}",
            body.error_type.as_deref().unwrap_or("unknown"),
            body.error.as_deref().unwrap_or(""),
        );
        Ok(body)
    }
}

fn job_filter(job: &str) -> String {
    if job.is_empty() {
        String::new()
    } else {
        format!(r#"job="{job}","#)
    }
}

/// Per-container CPU usage in cores: 1m rate of the cumulative counter,
/// summed over the per-cpu series.
pub fn cpu_query(job: &str) -> String {
    format!(
        r#"sum by (id) (rate(container_cpu_usage_seconds_total{{{}cpu="total",{}}}[1m]))"#,
        job_filter(job),
        CGROUP_FILTER
    )
}

/// Per-container working-set memory in bytes.
pub fn mem_query(job: &str) -> String {
    format!(
        r#"max by (id) (container_memory_working_set_bytes{{{}{}}})"#,
        job_filter(job),
        CGROUP_FILTER
    )
}
