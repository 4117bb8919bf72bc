/// Error code registry for otlogging
///
/// Error codes are organized by category:
/// - 1000-1999: Log line errors
/// - 2000-2999: Transfer validation errors
/// - 3000-3999: Well label errors
/// - 4000-4999: Structural errors
/// - 5000-5999: Input/output errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Log line errors (1000-1999)
    pub const LINE_GENERIC: u16 = 1000;
    pub const LINE_MISSING_AMOUNT: u16 = 1001;
    pub const LINE_MISSING_WELL: u16 = 1002;
    pub const LINE_MISSING_SLOT: u16 = 1003;
    pub const LINE_INVALID_AMOUNT: u16 = 1004;
    pub const LINE_UNKNOWN_PIPETTE: u16 = 1005;

    // Transfer validation errors (2000-2999)
    pub const TRANSFER_MULTIPLE_SOURCES: u16 = 2001;
    pub const TRANSFER_NO_SOURCE: u16 = 2002;
    pub const TRANSFER_VOLUME_MISMATCH: u16 = 2003;

    // Well label errors (3000-3999)
    pub const WELL_NO_COLUMN: u16 = 3001;

    // Structural errors (4000-4999)
    pub const STRUCT_GENERIC: u16 = 4000;
    pub const STRUCT_PICKUP_WHILE_OPEN: u16 = 4001;
    pub const STRUCT_NO_OPEN_TRANSFER: u16 = 4002;
    pub const STRUCT_UNSUPPORTED_COMMAND: u16 = 4003;
    pub const STRUCT_INVALID_VOLUME: u16 = 4004;
    pub const STRUCT_VOLUME_OVERFLOW: u16 = 4005;

    // Input/output errors (5000-5999)
    pub const IO_GENERIC: u16 = 5000;
    pub const IO_NOT_FOUND: u16 = 5001;
    pub const IO_PERMISSION_DENIED: u16 = 5002;
    pub const IO_INVALID_TRACE: u16 = 5003;
    pub const IO_WRITE_FAILED: u16 = 5004;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Malformed log line",
        1001 => "Log line has no volume before the uL marker",
        1002 => "Log line has no well label",
        1003 => "Log line has no quoted deck slot",
        1004 => "Log line volume is not a decimal number",
        1005 => "Pick-up line does not name a single or multi channel tip",

        2001 => "Transfer aspirates from more than one well",
        2002 => "Transfer has no aspiration",
        2003 => "Aspirated volume differs from dispensed volume",

        3001 => "Well label has no trailing column number",

        4000 => "Generic structural error",
        4001 => "Tip picked up while a transfer is still open",
        4002 => "Liquid handled with no open transfer",
        4003 => "Unsupported simulation command",
        4004 => "Simulation volume is missing or not a finite number",
        4005 => "Summed volume exceeds the representable range",

        5000 => "Generic I/O error",
        5001 => "File not found",
        5002 => "Permission denied",
        5003 => "Simulation trace is not valid JSON",
        5004 => "Failed to write output",

        _ => "Unknown error code",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_ranges() {
        assert!(ErrorCode::LINE_GENERIC >= 1000 && ErrorCode::LINE_UNKNOWN_PIPETTE < 2000);
        assert!(
            ErrorCode::TRANSFER_MULTIPLE_SOURCES >= 2000
                && ErrorCode::TRANSFER_VOLUME_MISMATCH < 3000
        );
        assert!(ErrorCode::WELL_NO_COLUMN >= 3000 && ErrorCode::WELL_NO_COLUMN < 4000);
        assert!(ErrorCode::STRUCT_GENERIC >= 4000 && ErrorCode::STRUCT_VOLUME_OVERFLOW < 5000);
        assert!(ErrorCode::IO_GENERIC >= 5000 && ErrorCode::IO_WRITE_FAILED < 6000);
    }

    #[test]
    fn test_error_code_descriptions() {
        assert_eq!(
            describe_error_code(2003),
            "Aspirated volume differs from dispensed volume"
        );
        assert_eq!(describe_error_code(3001), "Well label has no trailing column number");
        assert_eq!(describe_error_code(65535), "Unknown error code");
    }
}
