//! # pharmacy-counting
//!
//! Program to summarize a prescription record file by drug.
//!
//! Reads `id,prescriber_last_name,prescriber_first_name,drug_name,drug_cost` rows and
//! writes `drug_name,num_prescriber,total_cost`, sorted by total cost then drug name,
//! both descending.

mod aggregate;
mod error;
mod input;
mod record;

use aggregate::Aggregator;

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

/// Handle user input
#[derive(Parser)]
pub struct Cli {
    /// The path to the prescription record file (may be gzip compressed)
    pub input_path: std::path::PathBuf,
    /// The path to write the summary to, truncated if it exists
    pub output_path: std::path::PathBuf,
}


fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    info!("Reading {}", args.input_path.display());

    let reader = input::open(&args.input_path)?;
    let mut agg = Aggregator::new();
    input::read_records(reader, &mut agg)?;

    info!("Total read {} lines.", agg.line_count());

    let out = File::create(&args.output_path).with_context(
        || format!("could not write file '{}'", args.output_path.display()))?;
    agg.write_report(BufWriter::new(out))?;

    info!("Wrote {} drugs to {}", agg.drug_count(), args.output_path.display());

    Ok(())
}
