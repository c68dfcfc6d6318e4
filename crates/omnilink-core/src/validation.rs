//! Bounded input checks applied at the interface boundary.
//!
//! Backends assume these have already run (a pre-condition of every provider
//! operation), so they live here rather than inside either backend.

use chrono::NaiveDate;

use crate::errors::{OmniError, Result};
use crate::types::{ConfigUpdate, CreateTaskInput, UpdateTaskInput};

/// Maximum task name length in characters.
pub const MAX_NAME_LEN: usize = 1000;
/// Maximum note length in characters.
pub const MAX_NOTE_LEN: usize = 10_000;
/// Maximum project name length in characters.
pub const MAX_PROJECT_LEN: usize = 500;
/// Maximum task id length in characters.
pub const MAX_TASK_ID_LEN: usize = 100;
/// Inclusive bounds for the task-limit setting.
pub const TASK_LIMIT_RANGE: std::ops::RangeInclusive<u32> = 1..=10_000;

fn invalid(message: impl Into<String>) -> OmniError {
    OmniError::InvalidInput {
        message: message.into(),
    }
}

/// Validate a task identifier: non-empty, bounded, `[A-Za-z0-9_-]` only.
pub fn validate_task_id(task_id: &str) -> Result<()> {
    if task_id.is_empty() {
        return Err(invalid("task id is required"));
    }
    if task_id.chars().count() > MAX_TASK_ID_LEN {
        return Err(invalid(format!(
            "task id must be at most {MAX_TASK_ID_LEN} characters"
        )));
    }
    if !task_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(invalid("task id contains invalid characters"));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_due_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| invalid(format!("invalid date {s:?}, expected YYYY-MM-DD")))
}

/// Validate a task-limit setting against [`TASK_LIMIT_RANGE`].
pub fn validate_task_limit(limit: u32) -> Result<()> {
    if TASK_LIMIT_RANGE.contains(&limit) {
        Ok(())
    } else {
        Err(invalid(format!(
            "task limit must be between {} and {}",
            TASK_LIMIT_RANGE.start(),
            TASK_LIMIT_RANGE.end()
        )))
    }
}

/// Validate a configuration update.
pub fn validate_config_update(update: &ConfigUpdate) -> Result<()> {
    if let Some(limit) = update.task_limit {
        validate_task_limit(limit)?;
    }
    Ok(())
}

fn check_len(value: &str, max: usize, what: &str) -> Result<()> {
    if value.chars().count() > max {
        Err(invalid(format!("{what} must be at most {max} characters")))
    } else {
        Ok(())
    }
}

/// Validate a create-task input.
pub fn validate_create_input(input: &CreateTaskInput) -> Result<()> {
    if input.name.is_empty() {
        return Err(invalid("task name is required"));
    }
    check_len(&input.name, MAX_NAME_LEN, "task name")?;
    if let Some(note) = &input.note {
        check_len(note, MAX_NOTE_LEN, "note")?;
    }
    if let Some(project) = &input.project {
        check_len(project, MAX_PROJECT_LEN, "project name")?;
    }
    Ok(())
}

/// Validate an update-task input.
///
/// An empty note is allowed (it clears the note); an empty *name* is not.
pub fn validate_update_input(input: &UpdateTaskInput) -> Result<()> {
    validate_task_id(&input.task_id)?;
    if let Some(name) = &input.name {
        if name.is_empty() {
            return Err(invalid("task name cannot be empty"));
        }
        check_len(name, MAX_NAME_LEN, "task name")?;
    }
    if let Some(note) = &input.note {
        check_len(note, MAX_NOTE_LEN, "note")?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn task_id_accepts_typical_ids() {
        validate_task_id("kqXcJ3-fB_9").unwrap();
    }

    #[test]
    fn task_id_rejects_empty() {
        assert_matches!(validate_task_id(""), Err(OmniError::InvalidInput { .. }));
    }

    #[test]
    fn task_id_rejects_quotes_and_spaces() {
        assert_matches!(
            validate_task_id("abc\"def"),
            Err(OmniError::InvalidInput { .. })
        );
        assert_matches!(
            validate_task_id("abc def"),
            Err(OmniError::InvalidInput { .. })
        );
    }

    #[test]
    fn task_id_rejects_overlong() {
        let long = "a".repeat(MAX_TASK_ID_LEN + 1);
        assert_matches!(
            validate_task_id(&long),
            Err(OmniError::InvalidInput { .. })
        );
    }

    #[test]
    fn due_date_parses_iso() {
        let date = parse_due_date("2024-06-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn due_date_rejects_garbage() {
        assert_matches!(
            parse_due_date("June 15th"),
            Err(OmniError::InvalidInput { .. })
        );
        assert_matches!(
            parse_due_date("2024-13-40"),
            Err(OmniError::InvalidInput { .. })
        );
    }

    #[test]
    fn task_limit_bounds() {
        validate_task_limit(1).unwrap();
        validate_task_limit(10_000).unwrap();
        assert_matches!(validate_task_limit(0), Err(OmniError::InvalidInput { .. }));
        assert_matches!(
            validate_task_limit(10_001),
            Err(OmniError::InvalidInput { .. })
        );
    }

    #[test]
    fn create_requires_name() {
        let input = CreateTaskInput::default();
        assert_matches!(
            validate_create_input(&input),
            Err(OmniError::InvalidInput { .. })
        );
    }

    #[test]
    fn create_accepts_minimal() {
        let input = CreateTaskInput {
            name: "Buy milk".into(),
            ..Default::default()
        };
        validate_create_input(&input).unwrap();
    }

    #[test]
    fn update_allows_empty_note_but_not_empty_name() {
        let mut input = UpdateTaskInput {
            task_id: "abc123".into(),
            note: Some(String::new()),
            ..Default::default()
        };
        validate_update_input(&input).unwrap();

        input.name = Some(String::new());
        assert_matches!(
            validate_update_input(&input),
            Err(OmniError::InvalidInput { .. })
        );
    }
}
