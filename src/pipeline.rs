//! End-to-end mapping for one invocation
//!
//! Each entry point consumes its whole input before returning, so callers get
//! either every row or an error and never a partial mapping.

use crate::error::{OtlogError, Result};
use crate::simulation::{map_trace, read_trace};
use crate::transfer::{finalize_all, OutputRow, TransferStateMachine};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::info;

/// Reconstruct transfers from a robot log stream
pub fn parse_log_reader<R: BufRead>(reader: R) -> Result<Vec<OutputRow>> {
    let mut machine = TransferStateMachine::new();
    for line in reader.lines() {
        machine.feed_line(&line?)?;
    }

    let transfers = machine.finish();
    let transfer_count = transfers.len();
    let rows = finalize_all(transfers)?;
    info!(transfers = transfer_count, rows = rows.len(), "robot log mapped");
    Ok(rows)
}

/// Reconstruct transfers from a robot log file
pub fn parse_log_file(path: &Path) -> Result<Vec<OutputRow>> {
    let file = open_input(path)?;
    parse_log_reader(BufReader::new(file)).map_err(|e| e.with_path(path))
}

/// Map a simulation command trace stream
pub fn map_simulation_reader<R: Read>(reader: R) -> Result<Vec<OutputRow>> {
    let records = read_trace(reader)?;
    let rows = map_trace(&records)?;
    info!(commands = records.len(), rows = rows.len(), "simulation trace mapped");
    Ok(rows)
}

/// Map a simulation command trace file
pub fn map_simulation_file(path: &Path) -> Result<Vec<OutputRow>> {
    let file = open_input(path)?;
    map_simulation_reader(BufReader::new(file)).map_err(|e| e.with_path(path))
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| OtlogError::from(e).with_path(path))
}
