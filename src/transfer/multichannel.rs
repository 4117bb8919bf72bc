//! Multi-channel well expansion
//!
//! An eight-channel pipette addressed by the well in row `A` actually works
//! the whole column. Logs only name that first well, so every row is expanded
//! to one row per plate row letter.

use super::model::OutputRow;
use crate::error::{OtlogError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Row letters covered by one multi-channel operation (96-well plate)
pub const PLATE_ROWS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

static COLUMN_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)$").expect("Invalid regex pattern"));

/// Trailing column number of a well label, e.g. `"12"` for `"A12"`
pub fn column_number(well: &str) -> Result<&str> {
    COLUMN_SUFFIX
        .captures(well)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| OtlogError::malformed_well(well))
}

/// Every well in the column of `well`, top to bottom
pub fn column_wells(well: &str) -> Result<Vec<String>> {
    let column = column_number(well)?;
    Ok(PLATE_ROWS
        .iter()
        .map(|row| format!("{}{}", row, column))
        .collect())
}

/// Expand one row into the eight rows an eight-channel pipette moved
pub fn expand_row(row: &OutputRow) -> Result<Vec<OutputRow>> {
    let source_column = column_number(&row.source_well)?;
    let dest_column = column_number(&row.dest_well)?;

    Ok(PLATE_ROWS
        .iter()
        .map(|letter| OutputRow {
            source_well: format!("{}{}", letter, source_column),
            dest_well: format!("{}{}", letter, dest_column),
            ..row.clone()
        })
        .collect())
}
