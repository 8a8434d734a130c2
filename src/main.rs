//! Entry point for the partition-stats application.
//! Handles CLI parsing and logging, then runs load → compute → emit.

use clap::Parser;
use partition_stats::prelude::*;
use partition_stats::get_parallel_info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "partition_stats=debug"
    } else {
        "partition_stats=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();
    init_logging(args.verbose);

    tracing::info!(input = %args.input.display(), "input file");
    if let Some(output) = &args.output {
        tracing::info!(output = %output.display(), "output file");
    }

    let config = ParallelConfig::new(args.threads);
    // -t sizes only the dedicated computation pool. Input parsing runs earlier
    // on rayon's default global pool, which is left unconfigured.
    get_parallel_info().log();

    let loader = TextFileLoader::new(&args.input);
    let format = ReportFormat::from(args.format);
    let sink: Box<dyn ResultSink> = match (&args.output, format) {
        (Some(path), ReportFormat::Text) => Box::new(TextReportSink::new(path)),
        (Some(path), ReportFormat::Json) => Box::new(JsonReportSink::new(path)),
        (None, format) => Box::new(StdoutSink { format }),
    };

    if let Err(e) = Coordinator::new(config)
        .run_with(&loader, sink.as_ref())
        .await
    {
        tracing::error!(error = %e, "run failed, no report written");
        return Err(e.into());
    }

    tracing::info!("terminating");
    Ok(())
}
