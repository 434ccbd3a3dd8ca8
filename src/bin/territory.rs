//! territory: check which distributors may operate in which cities.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use territory_core::{
    CityCatalog, DriverOptions, EvaluationDriver, FailurePolicy, Hierarchy, JsonLinesSink,
    PermissionEngine, ReportSink, TextSink, prompt, requests_from_path,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "territory",
    about = "Evaluate distributor permissions for every city in a catalog",
    version
)]
struct Cli {
    /// City catalog (CSV: code, _, _, name, province, country)
    #[arg(short, long, default_value = "cities.csv")]
    catalog: PathBuf,
    /// Distributor rules (JSON array); prompts interactively when omitted
    #[arg(short, long)]
    rules: Option<PathBuf>,
    /// Number of distributors to prompt for, each delegated under the previous one
    #[arg(long, default_value_t = 2)]
    distributors: usize,
    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
    /// Stop at the first pair that cannot be evaluated
    #[arg(long)]
    fail_fast: bool,
    /// Evaluate cities in parallel (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "territory=debug,territory_core=debug"
    } else {
        "territory=info,territory_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    if cli.parallel && !cfg!(feature = "parallel") {
        tracing::warn!("--parallel ignored: built without the `parallel` feature");
    }

    let catalog = CityCatalog::from_path(&cli.catalog)
        .with_context(|| format!("failed to load catalog '{}'", cli.catalog.display()))?;

    let requests = match &cli.rules {
        Some(path) => requests_from_path(path)
            .with_context(|| format!("failed to load rules '{}'", path.display()))?,
        None => {
            let stdin = io::stdin();
            prompt::read_chain(&mut stdin.lock(), &mut io::stdout(), cli.distributors)
                .context("failed to read distributor permissions")?
        }
    };

    let hierarchy = Hierarchy::builder()
        .extend(requests)
        .build()
        .context("invalid distributor hierarchy")?;
    if cli.fail_fast {
        hierarchy.validate().context("invalid distributor hierarchy")?;
    }
    tracing::info!(
        cities = catalog.len(),
        distributors = hierarchy.len(),
        "evaluating permissions"
    );

    let engine = PermissionEngine::new(hierarchy);
    let driver = EvaluationDriver::new(&engine).with_options(DriverOptions {
        failure_policy: if cli.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        },
        parallel: cli.parallel,
    });

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    let mut sink: Box<dyn ReportSink> = match cli.format {
        Format::Text => Box::new(TextSink::new(out)),
        Format::Json => Box::new(JsonLinesSink::new(out)),
    };

    let summary = driver
        .run_all(catalog.cities(), sink.as_mut())
        .context("evaluation aborted")?;

    if summary.failed > 0 {
        anyhow::bail!("{} pair(s) could not be evaluated", summary.failed);
    }
    Ok(())
}
