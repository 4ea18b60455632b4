use chrono::{DateTime, Local};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::warn;

use crate::client::{LogMode, DEFAULT_LOG_FILE};
use crate::error::Result;

/// Append-only request log held open for the lifetime of a session.
#[derive(Debug, Default)]
pub(crate) struct RequestLog {
    mode: LogMode,
    file: Option<File>,
}

impl RequestLog {
    /// Open (or create) the log file in append mode. With `LogMode::Off` no
    /// file is opened.
    pub(crate) fn open(mode: LogMode, path: Option<&Path>) -> Result<Self> {
        if mode == LogMode::Off {
            return Ok(RequestLog::default());
        }

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_LOG_FILE));
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(RequestLog {
            mode,
            file: Some(file),
        })
    }

    pub(crate) fn mode(&self) -> LogMode {
        self.mode
    }

    pub(crate) fn record(&mut self, method: &str, route: &str, data: Option<&Value>, status: u16) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let entry = format_entry(Local::now(), method, route, data, status);
        if let Err(e) = file.write_all(entry.as_bytes()) {
            warn!(error = %e, "failed to write request log entry");
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS METHOD route body status`, body `[]` when absent
pub(crate) fn format_entry(
    at: DateTime<Local>,
    method: &str,
    route: &str,
    data: Option<&Value>,
    status: u16,
) -> String {
    let body = data
        .map(|d| d.to_string())
        .unwrap_or_else(|| "[]".to_string());

    format!(
        "{} {} {} {} {}\n",
        at.format("%Y-%m-%d %H:%M:%S"),
        method,
        route,
        body,
        status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_format_entry() {
        let at = Local.with_ymd_and_hms(2024, 8, 26, 9, 30, 5).unwrap();
        let entry = format_entry(
            at,
            "POST",
            "/d2l/api/lp/1.30/enrollments/",
            Some(&json!({"OrgUnitId": 1, "UserId": 2, "RoleId": 3})),
            200,
        );
        assert_eq!(
            entry,
            "2024-08-26 09:30:05 POST /d2l/api/lp/1.30/enrollments/ {\"OrgUnitId\":1,\"UserId\":2,\"RoleId\":3} 200\n"
        );
    }

    #[test]
    fn test_format_entry_without_body() {
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let entry = format_entry(at, "DELETE", "/d2l/api/lp/1.30/courses/7", None, 404);
        assert_eq!(entry, "2024-01-02 03:04:05 DELETE /d2l/api/lp/1.30/courses/7 [] 404\n");
    }

    #[test]
    fn test_off_opens_nothing() {
        let log = RequestLog::open(LogMode::Off, None).unwrap();
        assert!(log.file.is_none());
        assert_eq!(log.mode(), LogMode::Off);
    }
}
