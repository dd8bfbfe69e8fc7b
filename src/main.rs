use clap::Parser;
use parallel_log_verify::cli::{Cli, USAGE, USAGE_EXIT_CODE};
use parallel_log_verify::{Result, validate};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // stdout carries the report only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            tracing::debug!(error = %err, "rejected command line");
            println!("{}", USAGE);
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    // 1) Scan + check.
    let invocation = cli.invocation();
    let report = validate(&invocation.input, &invocation.config)?;

    // 2) Report.
    let mut out = io::stdout().lock();
    report.write_to(&mut out)?;
    out.flush()?;

    Ok(())
}
