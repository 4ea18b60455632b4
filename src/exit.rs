//! Process-exit boundary for script-style callers.
//!
//! With exit-on-error enabled, a non-2xx answer ends the process right here
//! after one line on stderr. Nothing else in the crate touches the process
//! lifecycle.

use std::io::Write;

use crate::error::ValenceError;

/// Exit status used when terminating on an error response
pub const EXIT_STATUS: i32 = 1;

/// The line written to stderr before exiting
pub fn error_line(status: u16, body: &str) -> String {
    format!("Error: {} {} (exiting...)", status, body)
}

/// Write the error line for `err` and terminate the process
pub fn terminate(err: &ValenceError) -> ! {
    let line = match err {
        ValenceError::Http { status, body } => error_line(*status, body),
        other => format!("Error: {} (exiting...)", other),
    };

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "{}", line);
    let _ = stderr.flush();

    std::process::exit(EXIT_STATUS)
}
