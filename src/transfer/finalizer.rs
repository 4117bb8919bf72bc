//! Validation and row expansion of closed transfers

use super::model::{ClosedTransfer, OutputRow, PipetteKind};
use super::multichannel::{expand_row, PLATE_ROWS};
use crate::error::{ErrorCode, OtlogError, Result};
use tracing::debug;

/// Validate one closed transfer and turn it into output rows
///
/// The single source well is broadcast to every dispensing, each row carrying
/// that dispensing's own amount. Multi-channel transfers produce eight rows
/// per dispensing.
pub fn finalize(transfer: ClosedTransfer) -> Result<Vec<OutputRow>> {
    let source = single_source(&transfer)?;

    let aspirated = transfer.aspirated_total()?;
    let dispensed = transfer.dispensed_total()?;
    if aspirated != dispensed {
        return Err(OtlogError::volume_mismatch(aspirated, dispensed));
    }

    let rows = transfer.dests().iter().map(|dest| {
        OutputRow::new(
            source.0,
            source.1,
            dest.slot.as_str(),
            dest.well.as_str(),
            dest.amount,
        )
        .with_amount_text(dest.amount_text.as_str())
    });

    match transfer.pipette() {
        PipetteKind::Single => Ok(rows.collect()),
        PipetteKind::Multi => {
            let mut expanded = Vec::with_capacity(transfer.dests().len() * PLATE_ROWS.len());
            for row in rows {
                expanded.extend(expand_row(&row)?);
            }
            Ok(expanded)
        }
    }
}

fn single_source(transfer: &ClosedTransfer) -> Result<(&str, &str)> {
    let mut sources = transfer.sources().iter().map(|s| s.location());
    let first = sources.next().ok_or_else(|| {
        OtlogError::unsupported_transfer(
            ErrorCode::TRANSFER_NO_SOURCE,
            "transfer dispenses without aspirating",
        )
    })?;

    if let Some(other) = sources.find(|loc| *loc != first) {
        return Err(OtlogError::unsupported_transfer(
            ErrorCode::TRANSFER_MULTIPLE_SOURCES,
            format!(
                "aspirate from multiple wells ({} in \"{}\" and {} in \"{}\")",
                first.1, first.0, other.1, other.0
            ),
        ));
    }
    Ok(first)
}

/// Finalize transfers in closing order, stopping at the first invalid one
pub fn finalize_all(transfers: Vec<ClosedTransfer>) -> Result<Vec<OutputRow>> {
    let count = transfers.len();
    let mut rows = Vec::new();
    for (index, transfer) in transfers.into_iter().enumerate() {
        let produced = finalize(transfer)
            .map_err(|e| e.with_context(format!("transfer {} of {}", index + 1, count)))?;
        debug!(index, rows = produced.len(), "transfer finalized");
        rows.extend(produced);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::model::{Transfer, WellEvent};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn transfer(
        pipette: PipetteKind,
        sources: &[(&str, &str, &str)],
        dests: &[(&str, &str, &str)],
    ) -> ClosedTransfer {
        let mut t = Transfer::picked_up(pipette);
        for (slot, well, amount) in sources {
            t.aspirate(WellEvent::new(*slot, *well, dec(amount)));
        }
        for (slot, well, amount) in dests {
            t.dispense(WellEvent::new(*slot, *well, dec(amount)));
        }
        t.close()
    }

    #[test]
    fn test_single_channel_one_row_per_dispense() {
        let rows = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", "60.0")],
            &[("5", "A2", "20.0"), ("5", "A3", "40.0")],
        ))
        .unwrap();

        assert_eq!(
            rows,
            vec![
                OutputRow::new("3", "A1", "5", "A2", dec("20.0")).with_amount_text("20.0"),
                OutputRow::new("3", "A1", "5", "A3", dec("40.0")).with_amount_text("40.0"),
            ]
        );
    }

    #[test]
    fn test_multi_channel_eight_rows_per_dispense() {
        let rows = finalize(transfer(
            PipetteKind::Multi,
            &[("3", "A1", "100.0")],
            &[("5", "A2", "50.0"), ("5", "A3", "50.0")],
        ))
        .unwrap();

        assert_eq!(rows.len(), 16);
        assert_eq!(rows[8].source_well, "A1");
        assert_eq!(rows[8].dest_well, "A3");
        assert_eq!(rows[15].dest_well, "H3");
    }

    #[test]
    fn test_row_amounts_sum_to_aspirated_total() {
        let closed = transfer(
            PipetteKind::Single,
            &[("3", "A1", "30.0"), ("3", "A1", "15.5")],
            &[("5", "A2", "10.5"), ("5", "A3", "35.0")],
        );
        let aspirated = closed.aspirated_total().unwrap();
        let rows = finalize(closed).unwrap();
        let total: Decimal = rows.iter().map(|r| r.amount).sum();
        assert_eq!(total, aspirated);
    }

    #[test]
    fn test_volume_mismatch() {
        let err = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", "50.0")],
            &[("5", "A2", "45.0")],
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            OtlogError::VolumeMismatch { aspirated, dispensed, .. }
                if aspirated == dec("50.0") && dispensed == dec("45.0")
        ));
    }

    #[test]
    fn test_comparison_is_exact() {
        let err = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", "50.0")],
            &[("5", "A2", "49.999")],
        ))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::TRANSFER_VOLUME_MISMATCH);
    }

    #[test]
    fn test_multiple_source_wells_unsupported() {
        let err = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", "25.0"), ("3", "B1", "25.0")],
            &[("5", "A2", "50.0")],
        ))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::TRANSFER_MULTIPLE_SOURCES);
    }

    #[test]
    fn test_same_well_different_slot_unsupported() {
        let err = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", "25.0"), ("4", "A1", "25.0")],
            &[("5", "A2", "50.0")],
        ))
        .unwrap_err();
        assert!(matches!(err, OtlogError::UnsupportedTransfer { .. }));
    }

    #[test]
    fn test_source_check_runs_before_volume_check() {
        let err = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", "25.0"), ("3", "B1", "25.0")],
            &[("5", "A2", "10.0")],
        ))
        .unwrap_err();
        assert!(matches!(err, OtlogError::UnsupportedTransfer { .. }));
    }

    #[test]
    fn test_overflowing_total_is_structural() {
        let huge = "79228162514264337593543950335";
        let err = finalize(transfer(
            PipetteKind::Single,
            &[("3", "A1", huge), ("3", "A1", huge)],
            &[("5", "A2", huge)],
        ))
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::STRUCT_VOLUME_OVERFLOW);
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_multi_channel_bad_well() {
        let err = finalize(transfer(
            PipetteKind::Multi,
            &[("3", "A1", "5.0")],
            &[("5", "trash", "5.0")],
        ))
        .unwrap_err();
        assert!(matches!(err, OtlogError::MalformedWell { ref well, .. } if well == "trash"));
    }

    #[test]
    fn test_finalize_all_names_failing_transfer() {
        let good = transfer(PipetteKind::Single, &[("3", "A1", "5.0")], &[("5", "A2", "5.0")]);
        let bad = transfer(PipetteKind::Single, &[("3", "A1", "5.0")], &[("5", "A2", "4.0")]);
        let err = finalize_all(vec![good, bad]).unwrap_err();
        assert!(err.to_string().contains("transfer 2 of 2"));
    }
}
