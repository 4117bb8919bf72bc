//! Robot execution log reading
//!
//! Lines are classified by the canonical phrase they contain, and liquid
//! handling lines are then broken into amount, well and deck slot.

pub mod classifier;
pub mod extractor;

pub use classifier::{classify_line, LineKind, CANONICAL_PHRASES};
pub use extractor::{extract_fields, extract_pipette_kind, ExtractedFields};
