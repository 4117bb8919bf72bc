use rust_decimal::Decimal;
use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for log parsing and transfer reconstruction
#[derive(Error, Debug)]
pub enum OtlogError {
    #[error("[E{code:04}] Malformed log line: {message}")]
    MalformedLine {
        code: u16,
        message: String,
        line: String,
        line_number: Option<usize>,
    },

    #[error("[E{code:04}] Unsupported transfer: {message}")]
    UnsupportedTransfer { code: u16, message: String },

    #[error("[E{code:04}] Volume mismatch: {message}")]
    VolumeMismatch {
        code: u16,
        message: String,
        aspirated: Decimal,
        dispensed: Decimal,
    },

    #[error("[E{code:04}] Malformed well '{well}': {message}")]
    MalformedWell {
        code: u16,
        message: String,
        well: String,
    },

    #[error("[E{code:04}] Structural error: {message}")]
    Structural { code: u16, message: String },

    #[error("[E{code:04}] I/O error: {message}")]
    Io {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl OtlogError {
    /// Create a malformed line error for the offending raw line
    pub fn malformed_line(code: u16, message: impl Into<String>, line: impl Into<String>) -> Self {
        Self::MalformedLine {
            code,
            message: message.into(),
            line: line.into(),
            line_number: None,
        }
    }

    /// Create an unsupported transfer error
    pub fn unsupported_transfer(code: u16, message: impl Into<String>) -> Self {
        Self::UnsupportedTransfer {
            code,
            message: message.into(),
        }
    }

    /// Create a volume mismatch error from the two totals
    pub fn volume_mismatch(aspirated: Decimal, dispensed: Decimal) -> Self {
        Self::VolumeMismatch {
            code: ErrorCode::TRANSFER_VOLUME_MISMATCH,
            message: format!("aspirated {} uL but dispensed {} uL", aspirated, dispensed),
            aspirated,
            dispensed,
        }
    }

    /// Create a malformed well error
    pub fn malformed_well(well: impl Into<String>) -> Self {
        Self::MalformedWell {
            code: ErrorCode::WELL_NO_COLUMN,
            message: "cannot find a column number at the end of the well name".to_string(),
            well: well.into(),
        }
    }

    /// Create a structural error with default code
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            code: ErrorCode::STRUCT_GENERIC,
            message: message.into(),
        }
    }

    /// Create a structural error with specific code
    pub fn structural_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Structural {
            code,
            message: message.into(),
        }
    }

    /// Create an I/O error with specific code and path
    pub fn io_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Io {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Add a source error to this error
    ///
    /// Only I/O errors carry a source; the domain errors are leaves.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        if let Self::Io { source: src, .. } = &mut self {
            *src = Some(source.into());
        }
        self
    }

    /// Attach the path of the file being read or written
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        if let Self::Io { path: p, .. } = &mut self {
            *p = Some(path.into());
        }
        self
    }

    /// Attach the 1-based line number of the offending log line
    pub fn with_line_number(mut self, number: usize) -> Self {
        if let Self::MalformedLine { line_number, .. } = &mut self {
            *line_number = Some(number);
        }
        self.with_context(format!("line {}", number))
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::MalformedLine { message, .. }
            | Self::UnsupportedTransfer { message, .. }
            | Self::VolumeMismatch { message, .. }
            | Self::MalformedWell { message, .. }
            | Self::Structural { message, .. }
            | Self::Io { message, .. } => {
                *message = format!("{} ({})", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MalformedLine { .. } => 2,
            Self::UnsupportedTransfer { .. } => 3,
            Self::VolumeMismatch { .. } => 4,
            Self::MalformedWell { .. } => 5,
            Self::Structural { .. } => 6,
            Self::Io { .. } => 7,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::MalformedLine { code, .. }
            | Self::UnsupportedTransfer { code, .. }
            | Self::VolumeMismatch { code, .. }
            | Self::MalformedWell { code, .. }
            | Self::Structural { code, .. }
            | Self::Io { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedLine { message, line, .. } => {
                format!("Cannot read log line: {}\n  > {}", message, line.trim())
            }
            Self::UnsupportedTransfer { message, .. } => {
                format!("Transfer not supported: {}", message)
            }
            Self::VolumeMismatch { message, .. } => {
                format!("Aspirated volume is not equal to dispensed volume: {}", message)
            }
            Self::MalformedWell { well, message, .. } => {
                format!("Well '{}' cannot be expanded to a column: {}", well, message)
            }
            Self::Structural { message, .. } => format!("Unexpected log structure: {}", message),
            Self::Io { message, path, .. } => {
                if let Some(p) = path {
                    format!("I/O error at {}: {}", p.display(), message)
                } else {
                    format!("I/O error: {}", message)
                }
            }
        }
    }

    /// Describe the error code in a few words
    pub fn code_description(&self) -> &'static str {
        describe_error_code(self.code())
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = format!("{:#}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        out
    }
}

/// Type alias for Results using OtlogError
pub type Result<T> = std::result::Result<T, OtlogError>;

impl From<std::io::Error> for OtlogError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::IO_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => (ErrorCode::IO_PERMISSION_DENIED, "Permission denied"),
            _ => (ErrorCode::IO_GENERIC, "I/O operation failed"),
        };

        OtlogError::io_with_code(code, message, None).with_source(err)
    }
}

impl From<serde_json::Error> for OtlogError {
    fn from(err: serde_json::Error) -> Self {
        OtlogError::io_with_code(
            ErrorCode::IO_INVALID_TRACE,
            "Invalid simulation trace JSON",
            None,
        )
        .with_source(err)
    }
}

impl From<csv::Error> for OtlogError {
    fn from(err: csv::Error) -> Self {
        OtlogError::io_with_code(ErrorCode::IO_WRITE_FAILED, "Failed to write rows", None)
            .with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_error_creation_and_context() {
        let err = OtlogError::malformed_line(
            ErrorCode::LINE_MISSING_SLOT,
            "no deck slot",
            "Aspirating 10.0 uL from well A1 in",
        )
        .with_line_number(7);

        assert_eq!(err.code(), ErrorCode::LINE_MISSING_SLOT);
        assert!(err.to_string().contains("[E1003]"));
        assert!(err.to_string().contains("line 7"));
        assert!(matches!(
            err,
            OtlogError::MalformedLine {
                line_number: Some(7),
                ..
            }
        ));
    }

    #[test]
    fn test_volume_mismatch_message() {
        let err = OtlogError::volume_mismatch(
            Decimal::from_str("50.0").unwrap(),
            Decimal::from_str("45.0").unwrap(),
        );
        assert_eq!(err.exit_code(), 4);
        assert_eq!(
            err.to_string(),
            "[E2003] Volume mismatch: aspirated 50.0 uL but dispensed 45.0 uL"
        );
    }

    #[test]
    fn test_io_conversion_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "protocol.log");
        let err: OtlogError = io_err.into();
        assert_eq!(err.code(), ErrorCode::IO_NOT_FOUND);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.developer_message().contains("protocol.log"));
    }

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let errors = [
            OtlogError::malformed_line(ErrorCode::LINE_GENERIC, "x", ""),
            OtlogError::unsupported_transfer(ErrorCode::TRANSFER_MULTIPLE_SOURCES, "x"),
            OtlogError::volume_mismatch(Decimal::ONE, Decimal::ZERO),
            OtlogError::malformed_well("A"),
            OtlogError::structural("x"),
            OtlogError::io_with_code(ErrorCode::IO_GENERIC, "x", None),
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
