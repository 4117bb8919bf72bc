//! Testing utilities and fixtures
//!
//! Builders for robot log text in the exact phrasing the parser expects, so
//! tests and benchmarks describe protocols step by step instead of
//! hand-writing log lines.

/// Builder for robot execution log text
#[derive(Debug, Default, Clone)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary line
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Add a line the parser ignores
    pub fn comment(self, text: &str) -> Self {
        self.line(format!("# {}", text))
    }

    /// Single-channel tip pick-up
    pub fn pick_up_single(self, tip: &str) -> Self {
        self.line(format!("Picking up tip well {} in \"10\"", tip))
    }

    /// Eight-channel tip pick-up
    pub fn pick_up_multi(self, tip: &str) -> Self {
        self.line(format!("Picking up tip wells {} in \"10\"", tip))
    }

    pub fn aspirate(self, amount: &str, well: &str, slot: &str) -> Self {
        self.line(format!(
            "Aspirating {} uL from well {} in \"{}\" at 1.0 speed",
            amount, well, slot
        ))
    }

    pub fn dispense(self, amount: &str, well: &str, slot: &str) -> Self {
        self.line(format!(
            "Dispensing {} uL into well {} in \"{}\" at 1.0 speed",
            amount, well, slot
        ))
    }

    pub fn drop_tip(self) -> Self {
        self.line("Dropping tip well A1 in \"12\"")
    }

    /// Join the lines into log text with a trailing newline
    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
