//! Runtime for the two binaries
//!
//! Both tools compute every row first and only then open the output, so a
//! failed run never creates or truncates the output file.

use crate::app::config::AppConfig;
use crate::emit::{write_rows, EmitOptions};
use crate::error::{ErrorCode, OtlogError};
use crate::pipeline::{map_simulation_file, parse_log_file};
use crate::transfer::OutputRow;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::debug;

/// Parse a robot log and write its well mapping
pub fn run_log_parser(config: &AppConfig) -> Result<()> {
    let rows = parse_log_file(&config.protocol).with_context(|| {
        format!("Failed to map robot log {}", config.protocol.display())
    })?;
    emit(config, &rows, EmitOptions::robot_log())
}

/// Map a simulation command trace and write its well mapping
pub fn run_simulation_mapper(config: &AppConfig) -> Result<()> {
    let rows = map_simulation_file(&config.protocol).with_context(|| {
        format!("Failed to map simulation trace {}", config.protocol.display())
    })?;
    emit(config, &rows, EmitOptions::simulation())
}

fn emit(config: &AppConfig, rows: &[OutputRow], options: EmitOptions) -> Result<()> {
    let sink = open_output(config)?;
    write_rows(sink, rows, options).context("Failed to write well mapping")?;
    debug!(rows = rows.len(), "well mapping written");
    Ok(())
}

fn open_output(config: &AppConfig) -> Result<Box<dyn Write>> {
    match &config.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                OtlogError::io_with_code(
                    ErrorCode::IO_WRITE_FAILED,
                    "Cannot create output file",
                    Some(path.clone()),
                )
                .with_source(e)
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
