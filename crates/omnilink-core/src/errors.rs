//! Error hierarchy for omnilink.
//!
//! Core operations propagate these uncaught; only the CLI boundary formats
//! and sanitizes them for display.

/// Result type alias for omnilink operations.
pub type Result<T> = std::result::Result<T, OmniError>;

/// Errors that can occur while talking to OmniFocus through either backend.
#[derive(Debug, thiserror::Error)]
pub enum OmniError {
    /// A generated AppleScript program exited non-zero.
    #[error("AppleScript failed: {message}")]
    Script {
        /// Trimmed stderr of the `osascript` process, or a generic fallback.
        message: String,
    },

    /// The interpreter process could not be spawned or waited on.
    #[error("failed to run osascript: {0}")]
    Spawn(#[from] std::io::Error),

    /// SQLite error from the direct-access backend.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Update/complete target did not resolve to any row or object.
    #[error("task not found: {task_id}")]
    TaskNotFound {
        /// The caller-supplied identifier that matched nothing.
        task_id: String,
    },

    /// Script output did not match the expected record shape.
    #[error("unexpected script output: {message}")]
    Parse {
        /// Description of the malformed output.
        message: String,
    },

    /// Input rejected before reaching a backend.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    /// The OS-level URL open handoff failed.
    #[error("failed to open URL: {message}")]
    UrlOpen {
        /// Diagnostic from the `open` process.
        message: String,
    },
}

impl OmniError {
    /// Error category string for log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Script { .. } => "script",
            Self::Spawn(_) => "spawn",
            Self::Database(_) => "database",
            Self::TaskNotFound { .. } => "not_found",
            Self::Parse { .. } => "parse",
            Self::InvalidInput { .. } => "invalid_input",
            Self::UrlOpen { .. } => "url_open",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_error_message_includes_diagnostic() {
        let err = OmniError::Script {
            message: "execution error: not authorized (-1743)".into(),
        };
        assert!(err.to_string().contains("-1743"));
        assert_eq!(err.category(), "script");
    }

    #[test]
    fn not_found_names_the_task() {
        let err = OmniError::TaskNotFound {
            task_id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
        assert_eq!(err.category(), "not_found");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no osascript");
        let err = OmniError::from(io);
        assert_eq!(err.category(), "spawn");
    }
}
