//! Domain types shared by both backends.
//!
//! Field names serialize in camelCase to match the JSON surface the calling
//! agent sees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task as reported by OmniFocus.
///
/// The identifier always originates from OmniFocus — this system never
/// generates one — and is unique within the running database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable identifier assigned by OmniFocus.
    pub id: String,
    /// Task name.
    pub name: String,
    /// Note body, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Name of the containing project, if the task is not in the inbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Whether the task is flagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged: Option<bool>,
    /// Calendar due date, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Whether the task is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskInput {
    /// Task name (required, non-empty).
    pub name: String,
    /// Optional note body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Existing project to file the task under; absent means inbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Flag the new task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<bool>,
    /// Due date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Input for updating a task.
///
/// Every field except `task_id` is a patch: present means "set to this
/// value", absent means "leave unchanged". `note: Some(String::new())` is a
/// valid "clear the note" instruction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    /// Identifier of the task to update.
    pub task_id: String,
    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New note body; empty string clears the note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// New flagged state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<bool>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl UpdateTaskInput {
    /// Whether the patch carries at least one field to change.
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.note.is_some()
            || self.flagged.is_some()
            || self.due_date.is_some()
    }
}

/// Task list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    /// Only flagged tasks.
    Flagged,
    /// Only tasks due today.
    DueToday,
    /// Flagged or due on/before today (also the default when no filter is
    /// given).
    All,
}

/// Which backend implementation is active for this process.
///
/// Selected once at startup by edition detection and never re-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// AppleScript automation is available (Pro edition).
    FullAutomation,
    /// Only the URL scheme and direct database access are usable.
    Restricted,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullAutomation => f.write_str("full_automation"),
            Self::Restricted => f.write_str("restricted"),
        }
    }
}

/// Per-provider runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Whether direct database writes are permitted. Ignored by the
    /// full-automation backend.
    pub direct_write: bool,
    /// Maximum rows returned by a task listing (1–10000).
    pub task_limit: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            direct_write: true,
            task_limit: 500,
        }
    }
}

/// Partial configuration update; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdate {
    /// New direct-write setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_write: Option<bool>,
    /// New task limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_limit: Option<u32>,
}

impl ProviderConfig {
    /// Apply a partial update in place.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(direct_write) = update.direct_write {
            self.direct_write = direct_write;
        }
        if let Some(task_limit) = update.task_limit {
            self.task_limit = task_limit;
        }
    }
}

/// Outcome of a mutating operation (create/update/complete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    /// Whether the operation took effect (or was handed off successfully).
    pub success: bool,
    /// Identifier of a newly created task, when the backend reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Advisory text, e.g. that a direct write needs an app restart to
    /// become visible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ActionOutcome {
    /// Plain success with no id and no warning.
    pub fn ok() -> Self {
        Self {
            success: true,
            task_id: None,
            warning: None,
        }
    }

    /// Success carrying an advisory warning.
    pub fn ok_with_warning(warning: impl Into<String>) -> Self {
        Self {
            success: true,
            task_id: None,
            warning: Some(warning.into()),
        }
    }

    /// Non-exceptional rejection (e.g. capability gate) with an explanation.
    pub fn rejected(warning: impl Into<String>) -> Self {
        Self {
            success: false,
            task_id: None,
            warning: Some(warning.into()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_camel_case_and_skips_none() {
        let task = Task {
            id: "abc".into(),
            name: "Buy milk".into(),
            note: None,
            project: Some("Errands".into()),
            flagged: Some(true),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 15),
            completed: Some(false),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2024-06-15");
        assert_eq!(json["project"], "Errands");
        assert!(json.get("note").is_none());
    }

    #[test]
    fn filter_parses_snake_case() {
        let filter: TaskFilter = serde_json::from_str("\"due_today\"").unwrap();
        assert_eq!(filter, TaskFilter::DueToday);
    }

    #[test]
    fn update_input_detects_empty_patch() {
        let input = UpdateTaskInput {
            task_id: "abc".into(),
            ..Default::default()
        };
        assert!(!input.has_changes());

        let input = UpdateTaskInput {
            task_id: "abc".into(),
            note: Some(String::new()),
            ..Default::default()
        };
        assert!(input.has_changes(), "empty note still counts as a change");
    }

    #[test]
    fn config_defaults() {
        let config = ProviderConfig::default();
        assert!(config.direct_write);
        assert_eq!(config.task_limit, 500);
    }

    #[test]
    fn config_apply_is_partial() {
        let mut config = ProviderConfig::default();
        config.apply(ConfigUpdate {
            direct_write: Some(false),
            task_limit: None,
        });
        assert!(!config.direct_write);
        assert_eq!(config.task_limit, 500);
    }

    #[test]
    fn provider_kind_display() {
        assert_eq!(ProviderKind::FullAutomation.to_string(), "full_automation");
        assert_eq!(ProviderKind::Restricted.to_string(), "restricted");
    }
}
