// Command-line arguments for a one-shot export run

use std::path::PathBuf;

use clap::Parser;
use regex::Regex;

const DEFAULT_SERVICE_REGEX: &str =
    "claim-service|policy-service|customer-service|postgres|kafka|zookeeper";

/// Export per-container CPU/RAM stats from Prometheus for a time window.
#[derive(Debug, Clone, Parser)]
#[command(name = "promreport", version)]
pub struct Args {
    /// Prometheus base URL, e.g. http://localhost:9090
    #[arg(long)]
    pub prom_url: String,

    /// Window start, epoch seconds.
    #[arg(long)]
    pub start: i64,

    /// Window end, epoch seconds.
    #[arg(long)]
    pub end: i64,

    /// Query resolution step (Prometheus duration, e.g. 10s).
    #[arg(long, default_value = "10s")]
    pub step: String,

    /// Test-run label echoed into the report.
    #[arg(long)]
    pub test_run: String,

    /// Output JSON file path.
    #[arg(long)]
    pub out: PathBuf,

    /// Only groups whose name matches this regex (search, not full match)
    /// appear in the group report; empty disables the filter. Containers
    /// are never filtered.
    #[arg(long, default_value = DEFAULT_SERVICE_REGEX)]
    pub service_regex: String,

    /// Prometheus job label of the cAdvisor scrape; empty drops the matcher.
    #[arg(long, default_value = "cadvisor")]
    pub job: String,

    /// Series label carrying container identity.
    #[arg(long, default_value = "id")]
    pub label_key: String,

    /// JSON map of docker id -> {name, service} (docker ps mapping
    /// produced by run-loadtest.sh).
    #[arg(long)]
    pub docker_map: Option<PathBuf>,
}

impl Args {
    /// Validates flag values beyond what clap enforces; exposed for tests.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.prom_url.is_empty(), "--prom-url must be non-empty");
        anyhow::ensure!(
            self.end > self.start,
            "--end ({}) must be after --start ({})",
            self.end,
            self.start
        );
        anyhow::ensure!(!self.step.is_empty(), "--step must be non-empty");
        anyhow::ensure!(!self.test_run.is_empty(), "--test-run must be non-empty");
        anyhow::ensure!(!self.label_key.is_empty(), "--label-key must be non-empty");
        if !self.service_regex.is_empty() {
            Regex::new(&self.service_regex)
                .map_err(|e| anyhow::anyhow!("--service-regex is not a valid regex: {e}"))?;
        }
        Ok(())
    }

    /// Compiled group filter; None when filtering is disabled.
    pub fn group_filter(&self) -> anyhow::Result<Option<Regex>> {
        if self.service_regex.is_empty() {
            return Ok(None);
        }
        Ok(Some(Regex::new(&self.service_regex)?))
    }
}
