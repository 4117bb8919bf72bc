//! CLI argument structures
//!
//! Both binaries take the same arguments: an input file and an optional
//! output file.

use clap::{Args, Parser};
use std::path::PathBuf;

/// Input and output files shared by both tools
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct IoArgs {
    /// Input file to read
    pub protocol: PathBuf,

    /// Write the well mapping to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Parse the output of a robot's protocol, output well mapping in csv-friendly format
#[derive(Parser, Debug)]
#[command(name = "parse_robot_log")]
#[command(version, long_about = None)]
pub struct ParseLogCli {
    #[command(flatten)]
    pub io: IoArgs,
}

/// Map a robot's simulation trace, output well mapping in csv-friendly format
#[derive(Parser, Debug)]
#[command(name = "run_opentrons_simulation")]
#[command(version, long_about = None)]
pub struct SimulationCli {
    #[command(flatten)]
    pub io: IoArgs,
}
