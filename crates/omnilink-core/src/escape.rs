//! AppleScript string-literal escaping.
//!
//! Every user-supplied string (task name, note, project name, due-date
//! literal, task id) must pass through [`escape_script_string`] before it is
//! interpolated into a double-quoted literal in a generated program. Skipping
//! it is a script-injection hole.

/// Escape a string for interpolation inside a double-quoted AppleScript
/// literal.
///
/// Substitutions, in order: `\` → `\\`, `"` → `\"`, CR → `\r`, LF → `\n`,
/// TAB → `\t`. Backslash goes first so later substitutions do not
/// double-escape the backslashes they insert. All other characters,
/// including multi-byte unicode, pass through unchanged.
pub fn escape_script_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Reverse of [`escape_script_string`], used to check losslessness.
    fn unescape(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('r') => out.push('\r'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        }
        out
    }

    #[test]
    fn empty_string() {
        assert_eq!(escape_script_string(""), "");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(escape_script_string("Buy milk"), "Buy milk");
    }

    #[test]
    fn quotes_escaped() {
        assert_eq!(escape_script_string(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn backslash_escaped_first() {
        // A literal \" in the input must become \\\" — the backslash pass
        // must not re-process the backslash inserted for the quote.
        assert_eq!(escape_script_string(r#"\""#), r#"\\\""#);
    }

    #[test]
    fn control_characters() {
        assert_eq!(escape_script_string("a\rb\nc\td"), "a\\rb\\nc\\td");
    }

    #[test]
    fn unicode_passes_through() {
        assert_eq!(escape_script_string("café 🦀 日本語"), "café 🦀 日本語");
    }

    #[test]
    fn injection_payload_neutralized() {
        let hostile = r#""; do shell script "rm -rf ~" & ""#;
        let escaped = escape_script_string(hostile);
        // No unescaped double quote survives: every " is preceded by an
        // odd-length run of backslashes.
        let bytes = escaped.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'"' {
                let mut run = 0;
                while run < i && bytes[i - 1 - run] == b'\\' {
                    run += 1;
                }
                assert!(run % 2 == 1, "unescaped quote at byte {i} in {escaped:?}");
            }
        }
    }

    #[test]
    fn mixed_specials_round_trip() {
        let original = "line1\nline2\t\"quoted\"\\end\r";
        assert_eq!(unescape(&escape_script_string(original)), original);
    }

    proptest! {
        #[test]
        fn escape_round_trips(s in r#"[a-z"\\\r\n\t é🦀]{0,64}"#) {
            prop_assert_eq!(unescape(&escape_script_string(&s)), s);
        }

        #[test]
        fn escaped_output_has_no_bare_specials(s in ".*") {
            let escaped = escape_script_string(&s);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
            prop_assert!(!escaped.contains('\t'));
        }
    }
}
