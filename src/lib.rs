//! # otlogging
//!
//! Reconstructs which well received liquid from which well, and how much,
//! from the execution log of a liquid-handling robot.
//!
//! ## Usage
//!
//! ```bash
//! parse_robot_log protocol.log [-o mapping.csv]
//! run_opentrons_simulation trace.json [-o mapping.csv]
//! ```
//!
//! ## Modules
//!
//! - `log` - Line classification and field extraction for robot logs
//! - `transfer` - Transfer state machine, validation and multi-channel expansion
//! - `simulation` - Mapping of simulation command traces to the same rows
//! - `emit` - Comma-separated output of mapping rows
//! - `pipeline` - One-call mapping of a whole log or trace
//! - `app` - Configuration, logging and runtime for the binaries
//! - `cli` - Command-line argument definitions
//! - `error` - Error type and error code registry
//! - `testing` - Log builders for tests and benchmarks
pub mod app;
pub mod cli;
pub mod emit;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod simulation;
pub mod transfer;

pub mod testing;

pub use error::{OtlogError, Result};
pub use transfer::{OutputRow, PipetteKind};
