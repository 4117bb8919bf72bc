//! Command-line interface
//!
//! Argument definitions for the `parse_robot_log` and
//! `run_opentrons_simulation` binaries.

pub mod args;

pub use args::{IoArgs, ParseLogCli, SimulationCli};
