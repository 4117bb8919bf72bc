//! Error handling utilities
//!
//! This module provides centralized fatal error reporting for the binaries.

use crate::error::OtlogError;
use tracing::{debug, error};

/// Exit code for failures that are not an [`OtlogError`]
pub const GENERAL_ERROR: i32 = 1;

/// Exit status and message lines for a fatal error
///
/// For `OtlogError` the user-facing message is shown above the full coded
/// chain and a description of the code; anything else prints its causes one
/// per line.
pub fn describe_fatal_error(error: &anyhow::Error) -> (i32, Vec<String>) {
    if let Some(otlog_err) = error.downcast_ref::<OtlogError>() {
        let lines = vec![
            format!("Error: {}", otlog_err.user_message()),
            format!("  {:#}", error),
            format!(
                "  E{:04}: {}",
                otlog_err.code(),
                otlog_err.code_description()
            ),
        ];
        (otlog_err.exit_code(), lines)
    } else {
        let mut lines = vec![format!("Error: {error}")];
        for (i, cause) in error.chain().enumerate().skip(1) {
            lines.push(format!("  {}: {}", i, cause));
        }
        (GENERAL_ERROR, lines)
    }
}

/// Handle fatal errors and exit with appropriate status code
pub fn handle_fatal_error(error: anyhow::Error) -> ! {
    error!("Fatal error: {:#}", error);
    if let Some(otlog_err) = error.downcast_ref::<OtlogError>() {
        debug!("{}", otlog_err.developer_message());
    }

    let (exit_code, lines) = describe_fatal_error(&error);
    for line in lines {
        eprintln!("{}", line);
    }

    std::process::exit(exit_code)
}
