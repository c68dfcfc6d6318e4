//! Error-message sanitizing for the output boundary.
//!
//! Core errors propagate uncaught with whatever detail the backend produced;
//! this is the one place messages are scrubbed before being shown to the
//! calling agent.

use std::sync::LazyLock;

use regex::Regex;

static HOME_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(Users|home)/[^/\s]+").expect("valid regex"));

/// Strip local home-directory segments from an error message.
pub fn sanitize_error_message(message: &str) -> String {
    HOME_PATH.replace_all(message, "/$1/***").trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
