//! Mapping of simulation commands to output rows

use super::trace::{CommandPayload, CommandRecord, Location, Locations};
use crate::error::{ErrorCode, OtlogError, Result};
use crate::transfer::multichannel::column_wells;
use crate::transfer::{OutputRow, PipetteKind};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, trace, warn};

/// Shape of a liquid-moving command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferCase {
    /// Buffer fill from a reservoir; not reported
    TroughToMany,
    OneToMany,
    ManyToMany,
    OneToOne,
}

impl fmt::Display for TransferCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransferCase::TroughToMany => "trough-to-many",
            TransferCase::OneToMany => "one-to-many",
            TransferCase::ManyToMany => "many-to-many",
            TransferCase::OneToOne => "one-to-one",
        };
        f.write_str(name)
    }
}

pub fn is_summary_command(record: &CommandRecord) -> bool {
    record.level == 0
}

/// A command moves liquid when it names both a source and a destination
pub fn is_moving_liquid(record: &CommandRecord) -> bool {
    record.payload.source.is_some() && record.payload.dest.is_some()
}

fn source_is_trough(source: &Locations) -> Result<bool> {
    let wells = source.as_slice();
    let troughs = wells.iter().filter(|loc| loc.is_trough()).count();
    if troughs == 0 {
        Ok(false)
    } else if troughs == wells.len() {
        Ok(true)
    } else {
        Err(OtlogError::structural_with_code(
            ErrorCode::STRUCT_UNSUPPORTED_COMMAND,
            "some source wells are in a trough but not all",
        ))
    }
}

/// Decide the shape of a command that has both a source and a destination
pub fn classify_command(source: &Locations, dest: &Locations) -> Result<TransferCase> {
    if source_is_trough(source)? {
        return if !source.is_many() && dest.is_many() {
            Ok(TransferCase::TroughToMany)
        } else {
            Err(OtlogError::structural_with_code(
                ErrorCode::STRUCT_UNSUPPORTED_COMMAND,
                "trough involved in a command that is not one-to-many",
            ))
        };
    }

    match (source.is_many(), dest.is_many()) {
        (false, true) => Ok(TransferCase::OneToMany),
        (true, true) => Ok(TransferCase::ManyToMany),
        (false, false) => Ok(TransferCase::OneToOne),
        (true, false) => Err(OtlogError::structural_with_code(
            ErrorCode::STRUCT_UNSUPPORTED_COMMAND,
            "several sources dispensed into a single destination",
        )),
    }
}

/// Slot and well names addressed at `location`
///
/// A multi-channel pipette at a row `A` well works its whole column; any
/// other well is taken as named.
fn expand_location(location: &Location, pipette: PipetteKind) -> Result<Vec<(String, String)>> {
    if pipette == PipetteKind::Multi && location.well.starts_with('A') {
        Ok(column_wells(&location.well)?
            .into_iter()
            .map(|well| (location.slot.clone(), well))
            .collect())
    } else {
        Ok(vec![(location.slot.clone(), location.well.clone())])
    }
}

/// Rows for one source/destination pair, zipped row by row
fn pair_rows(
    source: &Location,
    dest: &Location,
    pipette: PipetteKind,
    amount: Decimal,
) -> Result<Vec<OutputRow>> {
    let sources = expand_location(source, pipette)?;
    let dests = expand_location(dest, pipette)?;
    Ok(sources
        .into_iter()
        .zip(dests)
        .map(|((src_slot, src_well), (dst_slot, dst_well))| {
            OutputRow::new(src_slot, src_well, dst_slot, dst_well, amount)
        })
        .collect())
}

fn command_volume(payload: &CommandPayload) -> Result<Decimal> {
    let volume = payload.volume.ok_or_else(|| {
        OtlogError::structural_with_code(
            ErrorCode::STRUCT_INVALID_VOLUME,
            "liquid-moving command has no volume",
        )
    })?;
    // Full binary value of the float, not its shortest decimal form
    Decimal::from_f64_retain(volume).ok_or_else(|| {
        OtlogError::structural_with_code(
            ErrorCode::STRUCT_INVALID_VOLUME,
            format!("volume {} is not a finite number", volume),
        )
    })
}

/// Output rows for one summary-level, liquid-moving command
pub fn command_rows(record: &CommandRecord) -> Result<Vec<OutputRow>> {
    let payload = &record.payload;
    let (source, dest) = match (&payload.source, &payload.dest) {
        (Some(source), Some(dest)) => (source, dest),
        _ => return Ok(Vec::new()),
    };

    let case = classify_command(source, dest)?;
    trace!(%case, description = ?record.description, "classified command");
    if case == TransferCase::TroughToMany {
        return Ok(Vec::new());
    }

    let pipette = payload
        .instrument
        .as_ref()
        .map(|instrument| instrument.kind)
        .ok_or_else(|| OtlogError::structural("liquid-moving command has no instrument"))?;
    let amount = command_volume(payload)?;

    let pairs: Vec<(&Location, &Location)> = match case {
        TransferCase::OneToMany | TransferCase::OneToOne => {
            let src = &source.as_slice()[0];
            dest.as_slice().iter().map(|dst| (src, dst)).collect()
        }
        TransferCase::ManyToMany => {
            let (sources, dests) = (source.as_slice(), dest.as_slice());
            if sources.len() != dests.len() {
                warn!(
                    sources = sources.len(),
                    dests = dests.len(),
                    "source and destination lists differ in length; extra wells are ignored"
                );
            }
            sources.iter().zip(dests).collect()
        }
        TransferCase::TroughToMany => Vec::new(),
    };

    let mut rows = Vec::new();
    for (src, dst) in pairs {
        rows.extend(pair_rows(src, dst, pipette, amount)?);
    }
    Ok(rows)
}

/// Map a full command trace to output rows
pub fn map_trace(records: &[CommandRecord]) -> Result<Vec<OutputRow>> {
    let mut rows = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if !is_summary_command(record) || !is_moving_liquid(record) {
            continue;
        }
        let produced =
            command_rows(record).map_err(|e| e.with_context(format!("command {}", index)))?;
        debug!(index, rows = produced.len(), "command mapped");
        rows.extend(produced);
    }
    Ok(rows)
}
