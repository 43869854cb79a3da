use anyhow::Result;
use clap::Parser;
use tracing::info;

use bench_plot::models::ToolConfig;
use bench_plot::services::{BenchmarkRunner, ChartRenderer, ReportParser, needs_run};

/// Build, run and plot one benchmark from the native suite.
#[derive(Debug, Parser)]
#[command(name = "bench-plot", version)]
struct Args {
    /// Benchmark (test case) name, as known to the benchmark executable
    name: String,

    /// Re-run the benchmark even if a cached report exists
    #[arg(short, long)]
    rerun: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = ToolConfig::default();
    let report_path = config.report_path(&args.name);

    if needs_run(&report_path, args.rerun) {
        BenchmarkRunner::new(config).ensure_report(&args.name, &report_path)?;
    } else {
        info!(report = %report_path.display(), "using cached report");
    }

    let report = ReportParser::new().parse_file(&report_path)?;
    ChartRenderer::new().render(&report, &report_path.with_extension("svg"))?;

    Ok(())
}
