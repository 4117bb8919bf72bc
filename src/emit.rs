//! Output row serialization
//!
//! Rows are written comma-separated without quoting:
//! `source_slot,source_well,dest_slot,dest_well,amount`.

use crate::error::Result;
use crate::transfer::OutputRow;
use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::RoundingStrategy;
use std::io::Write;

/// Header written by the simulation mapper
pub const SIMULATION_HEADER: [&str; 5] =
    ["source_slot", "source_well", "dest_slot", "dest_well", "volume"];

/// How amounts are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountFormat {
    /// The amount text as read from the log
    #[default]
    AsParsed,
    /// Rounded half to even at one decimal place
    OneDecimal,
}

/// Emission settings for one output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitOptions {
    pub header: Option<[&'static str; 5]>,
    pub amount_format: AmountFormat,
}

impl EmitOptions {
    /// Robot log output: no header, amounts as read
    pub fn robot_log() -> Self {
        Self::default()
    }

    /// Simulation output: header row, one decimal place
    pub fn simulation() -> Self {
        Self {
            header: Some(SIMULATION_HEADER),
            amount_format: AmountFormat::OneDecimal,
        }
    }
}

fn format_amount(row: &OutputRow, format: AmountFormat) -> String {
    match format {
        AmountFormat::AsParsed => row
            .amount_text
            .clone()
            .unwrap_or_else(|| row.amount.to_string()),
        AmountFormat::OneDecimal => format!(
            "{:.1}",
            row.amount
                .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
        ),
    }
}

/// Write all rows to `writer` and flush it
pub fn write_rows<W: Write>(writer: W, rows: &[OutputRow], options: EmitOptions) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);

    if let Some(header) = options.header {
        csv.write_record(header)?;
    }
    for row in rows {
        csv.write_record([
            row.source_slot.as_str(),
            row.source_well.as_str(),
            row.dest_slot.as_str(),
            row.dest_well.as_str(),
            format_amount(row, options.amount_format).as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Render rows to a string, as [`write_rows`] would write them
pub fn render_rows(rows: &[OutputRow], options: EmitOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(&mut buffer, rows, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
