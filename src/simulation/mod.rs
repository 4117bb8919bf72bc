//! Simulation trace mapping
//!
//! Derives the same well-to-well rows as the log parser from the structured
//! command trace of a protocol simulation, exported as JSON.

pub mod adapter;
pub mod trace;

pub use adapter::{classify_command, command_rows, map_trace, TransferCase};
pub use trace::{read_trace, CommandPayload, CommandRecord, Instrument, Location, Locations};
