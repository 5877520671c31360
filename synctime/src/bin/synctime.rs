/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use anyhow::Context;
use clap::Parser;
use std::env;
use synctime::error::SyncTimeError;
use synctime::pipeline::convert::ConvertProcessor;
use synctime::pipeline::load_environment;
use synctime::pipeline::FileProcessor;
use synctime::utils::logging::init_logging;
use tracing::error;

/// Samples `height=` progress lines from a log into a CSV time series.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log file, or a directory of log files
    input: String,

    /// Output file, or directory for the generated CSV files
    #[arg(long)]
    output: Option<String>,

    /// interval=10m;elapsed=seconds|duration;suffix=.csv;extension=.log
    #[arg(long)]
    options: Option<String>,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let options = match &args.options {
        Some(options) => options.clone(),
        None => env::var("SYNCTIME_OPTIONS").unwrap_or_default(),
    };

    let mut convert_processor = ConvertProcessor::new(
        "synctime",
        &args.input,
        args.output.as_deref().unwrap_or_default(),
        &options,
    )
    .context("invalid options")?;

    convert_processor
        .run()
        .with_context(|| format!("failed to convert {}", args.input))?;

    Ok(())
}

fn main() {
    load_environment();
    init_logging();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        error!("synctime: {:#}", err);
        let code = err
            .downcast_ref::<SyncTimeError>()
            .map(SyncTimeError::exit_code)
            .unwrap_or(exitcode::SOFTWARE);
        std::process::exit(code);
    }
}
