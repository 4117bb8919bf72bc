//! Transfer reconstruction state machine
//!
//! Consumes log lines in order and groups aspirations and dispensings into
//! transfers. At most one transfer is open at a time:
//!
//! - a tip pick-up opens a transfer (`Idle -> Open(None)`)
//! - a tip drop closes it (`Open(_) -> Idle`)
//! - an aspiration right after a dispensing closes the open transfer and
//!   starts the next one with the same pipette, without a new tip
//!
//! Lines classified as [`LineKind::Ignore`] never touch the state.

use super::model::{ClosedTransfer, LastAction, Transfer, WellEvent};
use crate::error::{ErrorCode, OtlogError, Result};
use crate::log::{classify_line, extract_fields, extract_pipette_kind, LineKind};
use tracing::{debug, trace, warn};

/// Observable state of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Idle,
    Open(LastAction),
}

/// Per-invocation parser state
#[derive(Debug, Default)]
pub struct TransferStateMachine {
    current: Option<Transfer>,
    closed: Vec<ClosedTransfer>,
    lines_seen: usize,
}

impl TransferStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MachineState {
        match &self.current {
            None => MachineState::Idle,
            Some(transfer) => MachineState::Open(transfer.last_action()),
        }
    }

    /// Transfers closed so far, in closing order
    pub fn closed(&self) -> &[ClosedTransfer] {
        &self.closed
    }

    /// Classify and apply the next raw log line
    ///
    /// Errors carry the 1-based number of the offending line.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.lines_seen += 1;
        let kind = classify_line(line);
        trace!(line = self.lines_seen, %kind, "classified log line");
        let number = self.lines_seen;
        self.apply(kind, line)
            .map_err(|e| e.with_line_number(number))
    }

    /// Apply a line that has already been classified
    pub fn apply(&mut self, kind: LineKind, line: &str) -> Result<()> {
        match kind {
            LineKind::Ignore => Ok(()),
            LineKind::PickUp => self.pick_up(line),
            LineKind::DropTip => {
                self.drop_tip();
                Ok(())
            }
            LineKind::Aspirate => {
                let event = WellEvent::from(extract_fields(kind, line)?);
                self.aspirate(event)
            }
            LineKind::Dispense => {
                let event = WellEvent::from(extract_fields(kind, line)?);
                self.dispense(event)
            }
        }
    }

    fn pick_up(&mut self, line: &str) -> Result<()> {
        if self.current.is_some() {
            return Err(OtlogError::structural_with_code(
                ErrorCode::STRUCT_PICKUP_WHILE_OPEN,
                "tip picked up while the previous transfer was never dropped",
            ));
        }
        let pipette = extract_pipette_kind(line)?;
        debug!(%pipette, "transfer opened by tip pick-up");
        self.current = Some(Transfer::picked_up(pipette));
        Ok(())
    }

    fn drop_tip(&mut self) {
        match self.current.take() {
            Some(transfer) => self.close(transfer),
            // Protocols often start by dropping a tip left on the pipette
            None => trace!("tip dropped with no open transfer"),
        }
    }

    fn aspirate(&mut self, event: WellEvent) -> Result<()> {
        let transfer = self.current.take().ok_or_else(|| {
            OtlogError::structural_with_code(
                ErrorCode::STRUCT_NO_OPEN_TRANSFER,
                "aspiration with no tip picked up",
            )
        })?;

        if transfer.last_action() == LastAction::Dispense {
            let pipette = transfer.pipette();
            self.close(transfer);
            debug!(%pipette, "transfer opened by aspirate after dispense");
            self.current = Some(Transfer::continued(pipette, event));
        } else {
            let mut transfer = transfer;
            transfer.aspirate(event);
            self.current = Some(transfer);
        }
        Ok(())
    }

    fn dispense(&mut self, event: WellEvent) -> Result<()> {
        let transfer = self.current.as_mut().ok_or_else(|| {
            OtlogError::structural_with_code(
                ErrorCode::STRUCT_NO_OPEN_TRANSFER,
                "dispensing with no tip picked up",
            )
        })?;
        transfer.dispense(event);
        Ok(())
    }

    fn close(&mut self, transfer: Transfer) {
        let closed = transfer.close();
        debug!(
            index = self.closed.len(),
            sources = closed.sources().len(),
            dests = closed.dests().len(),
            "transfer closed"
        );
        self.closed.push(closed);
    }

    /// Stop consuming input and hand over the closed transfers
    ///
    /// A transfer still open at the end of the log was never bounded by a tip
    /// drop and is left out.
    pub fn finish(self) -> Vec<ClosedTransfer> {
        if let Some(open) = &self.current {
            warn!(
                sources = open.sources().len(),
                dests = open.dests().len(),
                "log ended with an open transfer; it is not reported"
            );
        }
        self.closed
    }
}
