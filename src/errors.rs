use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the planner. Missing tasks or empty slots are not errors;
/// the slot scheduler treats them as no-ops.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Input data ---------------------------------------------------------
    /// Malformed time string, unparseable date, bad composite key or enum token.
    #[error("Format error: {0}")]
    Format(String),

    /// Timetable data that cannot produce occurrences or gaps (day bounds only).
    #[error("Invalid timetable: {0}")]
    InvalidTimetable(String),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// IO passthrough (timetable and state files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    /// Helper to create a format error from any displayable value.
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }
    /// Helper to create a generic config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Format>` with a custom message.
pub fn require_format<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Format(msg.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_constructor_wraps_message() {
        let err = Error::format("bad time");
        match err {
            Error::Format(msg) => assert_eq!(msg, "bad time"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn config_constructor_wraps_message() {
        let err = Error::config("config missing");
        match err {
            Error::Config(msg) => assert_eq!(msg, "config missing"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn require_format_returns_value_when_present() {
        let value = require_format(Some(4), "missing").unwrap();
        assert_eq!(value, 4);
    }

    #[test]
    fn require_format_errors_with_message_when_missing() {
        let err = require_format::<i32, _>(None, "missing").unwrap_err();
        match err {
            Error::Format(msg) => assert_eq!(msg, "missing"),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_timetable_formats_message() {
        let err = Error::InvalidTimetable("day starts after it ends".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid timetable: day starts after it ends"
        );
    }

    #[test]
    fn io_error_formats_message() {
        let raw = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = Error::from(raw);
        assert_eq!(err.to_string(), "I/O error: disk");
    }

    #[test]
    fn json_error_formats_message() {
        let raw = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let expected = format!("JSON error: {}", raw);
        let err = Error::from(raw);
        assert_eq!(err.to_string(), expected);
    }
}
