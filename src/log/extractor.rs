//! Field extraction for classified log lines
//!
//! Each pattern is anchored to the canonical phrase text, so a line that was
//! classified as an aspiration but does not follow the
//! `Aspirating <amount> uL from well <well> in "<slot>"` shape is rejected
//! rather than guessed at.

use super::classifier::LineKind;
use crate::error::{ErrorCode, OtlogError, Result};
use crate::transfer::model::{PipetteKind, WellEvent};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static AMOUNT_ASPIRATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Aspirating ([0-9]*\.[0-9]*) uL from").expect("Invalid regex pattern")
});
static AMOUNT_DISPENSED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Dispensing ([0-9]*\.[0-9]*) uL into").expect("Invalid regex pattern")
});
static SOURCE_WELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"from well ([A-Z]+[0-9]+) in ").expect("Invalid regex pattern"));
static DEST_WELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"into well ([A-Z]+[0-9]+) in ").expect("Invalid regex pattern"));
static DECK_SLOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#" in "([^"]+)""#).expect("Invalid regex pattern"));

/// Pick-up phrase naming several tips at once
pub const MULTI_TIP_MARKER: &str = "tip wells";
/// Pick-up phrase naming a single tip; the trailing space keeps it from
/// matching the multi-channel marker
pub const SINGLE_TIP_MARKER: &str = "tip well ";

/// Fields pulled out of an aspirate or dispense line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub amount: Decimal,
    pub amount_text: String,
    pub well: String,
    pub slot: String,
}

impl From<ExtractedFields> for WellEvent {
    fn from(fields: ExtractedFields) -> Self {
        WellEvent::new(fields.slot, fields.well, fields.amount)
            .with_amount_text(fields.amount_text)
    }
}

fn first_capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract amount, well and slot from an aspirate or dispense line
pub fn extract_fields(kind: LineKind, line: &str) -> Result<ExtractedFields> {
    let (amount_pattern, well_pattern) = match kind {
        LineKind::Aspirate => (&*AMOUNT_ASPIRATED, &*SOURCE_WELL),
        LineKind::Dispense => (&*AMOUNT_DISPENSED, &*DEST_WELL),
        other => {
            return Err(OtlogError::structural(format!(
                "cannot extract liquid fields from a {} line",
                other
            )))
        }
    };

    let amount_text = first_capture(amount_pattern, line).ok_or_else(|| {
        OtlogError::malformed_line(
            ErrorCode::LINE_MISSING_AMOUNT,
            format!("{} amount lookup failed", kind),
            line,
        )
    })?;
    let amount = Decimal::from_str(amount_text).map_err(|e| {
        OtlogError::malformed_line(
            ErrorCode::LINE_INVALID_AMOUNT,
            format!("'{}' is not a volume: {}", amount_text, e),
            line,
        )
    })?;

    let well = first_capture(well_pattern, line).ok_or_else(|| {
        OtlogError::malformed_line(
            ErrorCode::LINE_MISSING_WELL,
            format!("{} well lookup failed", kind),
            line,
        )
    })?;

    let slot = first_capture(&DECK_SLOT, line).ok_or_else(|| {
        OtlogError::malformed_line(
            ErrorCode::LINE_MISSING_SLOT,
            format!("{} slot lookup failed", kind),
            line,
        )
    })?;

    Ok(ExtractedFields {
        amount,
        amount_text: amount_text.to_string(),
        well: well.to_string(),
        slot: slot.to_string(),
    })
}

/// Infer the pipette kind from a pick-up line
pub fn extract_pipette_kind(line: &str) -> Result<PipetteKind> {
    if line.contains(MULTI_TIP_MARKER) {
        Ok(PipetteKind::Multi)
    } else if line.contains(SINGLE_TIP_MARKER) {
        Ok(PipetteKind::Single)
    } else {
        Err(OtlogError::malformed_line(
            ErrorCode::LINE_UNKNOWN_PIPETTE,
            "pick-up line names neither a tip well nor tip wells",
            line,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_aspirate_fields() {
        let fields = extract_fields(
            LineKind::Aspirate,
            "Aspirating 50.0 uL from well A1 in \"3\" at 1.0 speed",
        )
        .unwrap();
        assert_eq!(fields.amount.to_string(), "50.0");
        assert_eq!(fields.well, "A1");
        assert_eq!(fields.slot, "3");
    }

    #[test]
    fn test_extracts_dispense_fields_with_two_digit_column() {
        let fields = extract_fields(
            LineKind::Dispense,
            "\tDispensing 12.25 uL into well H12 in \"11\" at 1.0 speed",
        )
        .unwrap();
        assert_eq!(fields.amount.to_string(), "12.25");
        assert_eq!(fields.well, "H12");
        assert_eq!(fields.slot, "11");
    }

    #[test]
    fn test_amount_text_is_kept_verbatim() {
        let fields = extract_fields(LineKind::Aspirate, "Aspirating .5 uL from well A1 in \"3\"")
            .unwrap();
        assert_eq!(fields.amount, Decimal::new(5, 1));
        assert_eq!(fields.amount_text, ".5");

        let event = WellEvent::from(
            extract_fields(LineKind::Dispense, "Dispensing 50. uL into well A2 in \"5\"").unwrap(),
        );
        assert_eq!(event.amount_text, "50.");
    }

    #[test]
    fn test_missing_slot_is_malformed() {
        let err = extract_fields(LineKind::Aspirate, "Aspirating 50.0 uL from well A1 in slot 3")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LINE_MISSING_SLOT);
        assert!(matches!(err, OtlogError::MalformedLine { .. }));
    }

    #[test]
    fn test_missing_amount_is_malformed() {
        let err = extract_fields(LineKind::Dispense, "Dispensing 50 uL into well A2 in \"5\"")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LINE_MISSING_AMOUNT);
    }

    #[test]
    fn test_bare_dot_amount_is_malformed() {
        let err = extract_fields(LineKind::Dispense, "Dispensing . uL into well A2 in \"5\"")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LINE_INVALID_AMOUNT);
    }

    #[test]
    fn test_dispense_pattern_does_not_read_aspirate_wells() {
        let err = extract_fields(LineKind::Dispense, "Dispensing 5.0 uL from well A2 in \"5\"")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LINE_MISSING_AMOUNT);
    }

    #[test]
    fn test_non_liquid_kind_is_structural() {
        let err = extract_fields(LineKind::DropTip, "Dropping tip").unwrap_err();
        assert!(matches!(err, OtlogError::Structural { .. }));
    }

    #[test]
    fn test_pipette_kind_from_pick_up() {
        assert_eq!(
            extract_pipette_kind("Picking up tip wells A1...H1 in \"10\"").unwrap(),
            PipetteKind::Multi
        );
        assert_eq!(
            extract_pipette_kind("Picking up tip well A1 in \"10\"").unwrap(),
            PipetteKind::Single
        );
        let err = extract_pipette_kind("Picking up tip").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LINE_UNKNOWN_PIPETTE);
    }
}
