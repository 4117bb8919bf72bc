//! Simulation command trace records
//!
//! The trace is a JSON array exported from a protocol simulation run. Only
//! the fields needed to map liquid movements are modelled; anything else in a
//! record is ignored.

use crate::error::Result;
use crate::transfer::PipetteKind;
use serde::Deserialize;
use std::io::Read;

/// One command from the simulation run log
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRecord {
    /// Nesting depth; `0` is the summary level of a protocol step
    pub level: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payload: CommandPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandPayload {
    #[serde(default)]
    pub source: Option<Locations>,
    #[serde(default)]
    pub dest: Option<Locations>,
    #[serde(default)]
    pub instrument: Option<Instrument>,
    #[serde(default)]
    pub volume: Option<f64>,
}

/// A single location or a series of them
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Locations {
    One(Location),
    Many(Vec<Location>),
}

impl Locations {
    pub fn is_many(&self) -> bool {
        matches!(self, Locations::Many(_))
    }

    pub fn as_slice(&self) -> &[Location] {
        match self {
            Locations::One(location) => std::slice::from_ref(location),
            Locations::Many(locations) => locations,
        }
    }
}

/// A well inside a labware on a deck slot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Location {
    pub slot: String,
    pub labware: String,
    pub well: String,
}

impl Location {
    /// Reservoirs are recognised by their labware name
    pub fn is_trough(&self) -> bool {
        self.labware.contains("trough")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Instrument {
    #[serde(rename = "type")]
    pub kind: PipetteKind,
}

/// Read a whole command trace
pub fn read_trace<R: Read>(reader: R) -> Result<Vec<CommandRecord>> {
    Ok(serde_json::from_reader(reader)?)
}
