use anyhow::Context;
use clap::Parser;
use promreport::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let args = cli::Args::parse();
    args.validate()?;
    let group_filter = args.group_filter()?;

    tracing::info!(
        "{} {} exporting window {}..{} from {}",
        version::NAME,
        version::VERSION,
        args.start,
        args.end,
        args.prom_url
    );

    let identity = resolve::load_identity_map(args.docker_map.as_deref())?;
    if !identity.is_empty() {
        tracing::info!(entries = identity.len(), "loaded docker map");
    }

    let repo = prom_repo::PromRepo::connect(&args.prom_url)?;
    let cpu_q = prom_repo::cpu_query(&args.job);
    let mem_q = prom_repo::mem_query(&args.job);

    // CPU and memory windows are independent; query both at once.
    let (cpu_resp, mem_resp) = tokio::try_join!(
        repo.query_range(&cpu_q, args.start, args.end, &args.step),
        repo.query_range(&mem_q, args.start, args.end, &args.step),
    )?;

    let cpu_series = series::parse_matrix(&cpu_resp, &args.label_key);
    let mem_series = series::parse_matrix(&mem_resp, &args.label_key);
    tracing::info!(
        cpu_series = cpu_series.len(),
        mem_series = mem_series.len(),
        "parsed matrix responses"
    );

    let meta = report::RunMeta {
        test_run: args.test_run.clone(),
        start_epoch: args.start,
        end_epoch: args.end,
        step: args.step.clone(),
        prom_url: args.prom_url.clone(),
        job: args.job.clone(),
        label_key: args.label_key.clone(),
        cpu_query: cpu_q,
        mem_query: mem_q,
    };
    let report = report::assemble(
        &cpu_series,
        &mem_series,
        &identity,
        group_filter.as_ref(),
        &meta,
    );

    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    std::fs::write(&args.out, json).with_context(|| format!("writing {}", args.out.display()))?;
    tracing::info!(
        containers = report.containers.len(),
        groups = report.groups.len(),
        "report written to {}",
        args.out.display()
    );

    Ok(())
}
