//! Transfer data model
//!
//! A [`Transfer`] is built up event by event while the state machine holds it
//! open. Closing it yields a [`ClosedTransfer`], which has no mutators and is
//! consumed by value when finalized.

use crate::error::{ErrorCode, OtlogError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of channels on the pipette that performed a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipetteKind {
    Single,
    Multi,
}

impl fmt::Display for PipetteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipetteKind::Single => write!(f, "single"),
            PipetteKind::Multi => write!(f, "multi"),
        }
    }
}

/// The most recent liquid-handling event recorded on an open transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastAction {
    /// Opened by a tip pick-up, nothing aspirated yet
    None,
    Aspirate,
    Dispense,
}

/// A volume moved into or out of one well
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellEvent {
    pub slot: String,
    pub well: String,
    pub amount: Decimal,
    /// The amount exactly as it was written in the log
    pub amount_text: String,
}

impl WellEvent {
    pub fn new(slot: impl Into<String>, well: impl Into<String>, amount: Decimal) -> Self {
        Self {
            slot: slot.into(),
            well: well.into(),
            amount_text: amount.to_string(),
            amount,
        }
    }

    pub fn with_amount_text(mut self, text: impl Into<String>) -> Self {
        self.amount_text = text.into();
        self
    }

    /// The physical well this event touched
    pub fn location(&self) -> (&str, &str) {
        (&self.slot, &self.well)
    }
}

/// One aspiration
pub type SourceEvent = WellEvent;

/// One dispensing
pub type DestEvent = WellEvent;

/// A transfer still accepting events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    sources: Vec<SourceEvent>,
    dests: Vec<DestEvent>,
    pipette: PipetteKind,
    last_action: LastAction,
}

impl Transfer {
    /// Open a transfer on a tip pick-up
    pub fn picked_up(pipette: PipetteKind) -> Self {
        Self {
            sources: Vec::new(),
            dests: Vec::new(),
            pipette,
            last_action: LastAction::None,
        }
    }

    /// Open a transfer that starts with an aspiration, reusing the tip of the
    /// transfer that was just closed
    pub fn continued(pipette: PipetteKind, first: SourceEvent) -> Self {
        let mut transfer = Self::picked_up(pipette);
        transfer.aspirate(first);
        transfer
    }

    pub fn aspirate(&mut self, event: SourceEvent) {
        self.sources.push(event);
        self.last_action = LastAction::Aspirate;
    }

    pub fn dispense(&mut self, event: DestEvent) {
        self.dests.push(event);
        self.last_action = LastAction::Dispense;
    }

    pub fn pipette(&self) -> PipetteKind {
        self.pipette
    }

    pub fn last_action(&self) -> LastAction {
        self.last_action
    }

    pub fn sources(&self) -> &[SourceEvent] {
        &self.sources
    }

    pub fn dests(&self) -> &[DestEvent] {
        &self.dests
    }

    /// Close the transfer; no further events can be added
    pub fn close(self) -> ClosedTransfer {
        ClosedTransfer {
            sources: self.sources,
            dests: self.dests,
            pipette: self.pipette,
        }
    }
}

/// A transfer bounded by a tip drop or by the next aspirate-after-dispense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTransfer {
    sources: Vec<SourceEvent>,
    dests: Vec<DestEvent>,
    pipette: PipetteKind,
}

impl ClosedTransfer {
    pub fn pipette(&self) -> PipetteKind {
        self.pipette
    }

    pub fn sources(&self) -> &[SourceEvent] {
        &self.sources
    }

    pub fn dests(&self) -> &[DestEvent] {
        &self.dests
    }

    pub fn aspirated_total(&self) -> Result<Decimal> {
        total_volume(&self.sources, "aspirated")
    }

    pub fn dispensed_total(&self) -> Result<Decimal> {
        total_volume(&self.dests, "dispensed")
    }
}

fn total_volume(events: &[WellEvent], action: &str) -> Result<Decimal> {
    events.iter().try_fold(Decimal::ZERO, |total, event| {
        total.checked_add(event.amount).ok_or_else(|| {
            OtlogError::structural_with_code(
                ErrorCode::STRUCT_VOLUME_OVERFLOW,
                format!("total volume {} exceeds {} uL", action, Decimal::MAX),
            )
        })
    })
}

/// One well-to-well leg of a transfer, as written to the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub source_slot: String,
    pub source_well: String,
    pub dest_slot: String,
    pub dest_well: String,
    pub amount: Decimal,
    /// Source text of the amount, printed verbatim when present
    pub amount_text: Option<String>,
}

impl OutputRow {
    pub fn new(
        source_slot: impl Into<String>,
        source_well: impl Into<String>,
        dest_slot: impl Into<String>,
        dest_well: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            source_slot: source_slot.into(),
            source_well: source_well.into(),
            dest_slot: dest_slot.into(),
            dest_well: dest_well.into(),
            amount,
            amount_text: None,
        }
    }

    pub fn with_amount_text(mut self, text: impl Into<String>) -> Self {
        self.amount_text = Some(text.into());
        self
    }
}
