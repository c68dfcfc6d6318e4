//! AppleScript program builders and record parsing.
//!
//! This module is the only place script text is assembled. Every
//! user-supplied string is routed through
//! [`omnilink_core::escape::escape_script_string`] inside the builders, so
//! call sites cannot interpolate raw input by accident.

use chrono::NaiveDate;

use omnilink_core::escape::escape_script_string;
use omnilink_core::types::{CreateTaskInput, Task, TaskFilter, UpdateTaskInput};
use omnilink_core::{OmniError, Result};

/// Sentinel separating fields within one serialized task record. Multi-byte
/// on purpose: vanishingly unlikely to appear in real task text.
pub const FIELD_DELIMITER: &str = "|||";

/// Separator AppleScript inserts when coercing a list to text.
pub const LIST_SEPARATOR: &str = ", ";

/// Number of fields in a serialized task record.
const RECORD_FIELDS: usize = 6;

/// Program that lists open tasks matching `filter` as delimited records.
pub fn list_tasks(filter: Option<TaskFilter>) -> String {
    let condition = match filter {
        Some(TaskFilter::Flagged) => "whose flagged is true",
        Some(TaskFilter::DueToday) => {
            "whose due date is not missing value and due date < (current date) + 1 * days"
        }
        Some(TaskFilter::All) | None => "",
    };

    format!(
        r#"tell application "OmniFocus"
  tell default document
    set taskList to {{}}
    set theTasks to flattened tasks {condition}
    repeat with t in theTasks
      if completed of t is false then
        set taskId to id of t
        set taskName to name of t
        set taskNote to note of t
        set taskFlagged to flagged of t
        set taskDue to ""
        if due date of t is not missing value then
          set taskDue to (due date of t) as «class isot» as string
        end if
        set projectName to ""
        try
          set projectName to name of containing project of t
        end try
        set end of taskList to taskId & "{FIELD_DELIMITER}" & taskName & "{FIELD_DELIMITER}" & taskNote & "{FIELD_DELIMITER}" & taskFlagged & "{FIELD_DELIMITER}" & taskDue & "{FIELD_DELIMITER}" & projectName
      end if
    end repeat
    return taskList
  end tell
end tell"#
    )
}

fn due_date_literal(date: NaiveDate) -> String {
    escape_script_string(&date.format("%Y-%m-%d").to_string())
}

/// Program that creates a task and returns its new identifier.
///
/// With a project name, the task lands at the end of the first flattened
/// project matching exactly; otherwise it becomes an inbox task.
pub fn create_task(input: &CreateTaskInput) -> String {
    let mut props = vec![format!("name:\"{}\"", escape_script_string(&input.name))];
    if let Some(note) = input.note.as_deref().filter(|n| !n.is_empty()) {
        props.push(format!("note:\"{}\"", escape_script_string(note)));
    }
    if input.flagged == Some(true) {
        props.push("flagged:true".to_string());
    }
    if let Some(due) = input.due_date {
        props.push(format!("due date:date \"{}\"", due_date_literal(due)));
    }
    let props = props.join(", ");

    if let Some(project) = input.project.as_deref().filter(|p| !p.is_empty()) {
        let project = escape_script_string(project);
        format!(
            r#"tell application "OmniFocus"
  tell default document
    set theProject to first flattened project whose name is "{project}"
    set newTask to make new task with properties {{{props}}} at end of tasks of theProject
    return id of newTask
  end tell
end tell"#
        )
    } else {
        format!(
            r#"tell application "OmniFocus"
  tell default document
    set newTask to make new inbox task with properties {{{props}}}
    return id of newTask
  end tell
end tell"#
        )
    }
}

/// Program that patches a task located by exact identifier.
///
/// One `set` statement per present field, in order: name, note (an empty
/// string clears it), flagged, due date. A lookup miss aborts the program
/// with the interpreter's own error text.
pub fn update_task(input: &UpdateTaskInput) -> String {
    let mut statements = Vec::new();
    if let Some(name) = &input.name {
        statements.push(format!(
            "set name of theTask to \"{}\"",
            escape_script_string(name)
        ));
    }
    if let Some(note) = &input.note {
        statements.push(format!(
            "set note of theTask to \"{}\"",
            escape_script_string(note)
        ));
    }
    if let Some(flagged) = input.flagged {
        statements.push(format!("set flagged of theTask to {flagged}"));
    }
    if let Some(due) = input.due_date {
        statements.push(format!(
            "set due date of theTask to date \"{}\"",
            due_date_literal(due)
        ));
    }

    let task_id = escape_script_string(&input.task_id);
    let statements = statements.join("\n    ");
    format!(
        r#"tell application "OmniFocus"
  tell default document
    set theTask to first flattened task whose id is "{task_id}"
    {statements}
  end tell
end tell"#
    )
}

/// Program that marks a task completed.
pub fn complete_task(task_id: &str) -> String {
    let task_id = escape_script_string(task_id);
    format!(
        r#"tell application "OmniFocus"
  tell default document
    set theTask to first flattened task whose id is "{task_id}"
    set completed of theTask to true
  end tell
end tell"#
    )
}

/// Program that returns the names of all active projects, flattened.
pub fn list_projects() -> String {
    r#"tell application "OmniFocus"
  tell default document
    set projectNames to {}
    repeat with p in flattened projects
      if status of p is active then
        set end of projectNames to name of p
      end if
    end repeat
    return projectNames
  end tell
end tell"#
        .to_string()
}

fn parse_due_field(field: &str) -> Option<NaiveDate> {
    if field.is_empty() {
        return None;
    }
    // «class isot» yields e.g. "2024-06-15T09:00:00"; the calendar date is
    // the first ten characters.
    let date_part = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parse the delimited records emitted by the [`list_tasks`] program.
///
/// Empty output means no matching tasks. A record with the wrong field
/// count is a parse error, not a silently skipped row.
pub fn parse_task_records(output: &str) -> Result<Vec<Task>> {
    if output.is_empty() {
        return Ok(Vec::new());
    }

    output
        .split(LIST_SEPARATOR)
        .map(|record| {
            let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
            if fields.len() != RECORD_FIELDS {
                return Err(OmniError::Parse {
                    message: format!(
                        "expected {RECORD_FIELDS} fields per task record, got {} in {record:?}",
                        fields.len()
                    ),
                });
            }
            Ok(Task {
                id: fields[0].to_string(),
                name: fields[1].to_string(),
                note: (!fields[2].is_empty()).then(|| fields[2].to_string()),
                flagged: Some(fields[3] == "true"),
                due_date: parse_due_field(fields[4]),
                project: (!fields[5].is_empty()).then(|| fields[5].to_string()),
                completed: Some(false),
            })
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
