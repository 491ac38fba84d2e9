use anyhow::Context;
use clap::Parser;
use report_charts::{generate_report, RenderConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RenderConfig::parse();

    let outcome = generate_report(&config)
        .with_context(|| format!("generating report from {}", config.stats.display()))?;

    tracing::info!(
        charts = outcome.charts.len(),
        forest = ?outcome.forest,
        insights = ?outcome.insights,
        snapshots = outcome.snapshots.len(),
        "Done"
    );
    println!("{}", outcome.index.display());
    Ok(())
}
