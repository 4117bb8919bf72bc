//! Transfer reconstruction
//!
//! This module contains the core of the crate:
//! - The transfer data model
//! - The state machine that groups log events into transfers
//! - The finalizer that validates transfers and expands them into rows
//! - Multi-channel column expansion

pub mod finalizer;
pub mod model;
pub mod multichannel;
pub mod state_machine;

pub use finalizer::{finalize, finalize_all};
pub use model::{
    ClosedTransfer, DestEvent, LastAction, OutputRow, PipetteKind, SourceEvent, Transfer,
    WellEvent,
};
pub use multichannel::PLATE_ROWS;
pub use state_machine::{MachineState, TransferStateMachine};
