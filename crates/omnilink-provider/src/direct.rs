//! Restricted backend: URL-scheme creation plus direct SQLite access to the
//! OmniFocus cache database.
//!
//! Reads and writes go straight to the database file while the application
//! may hold it open, so every call opens a fresh connection and drops it on
//! all exit paths. Writes are behind the `direct_write` capability flag and
//! always warn that OmniFocus must restart before it sees the change — the
//! app caches its model in memory and does not watch the file.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, ToSql, params_from_iter};
use tracing::debug;
use url::Url;

use omnilink_core::types::{
    ActionOutcome, ConfigUpdate, CreateTaskInput, ProviderConfig, ProviderKind, Task, TaskFilter,
    UpdateTaskInput,
};
use omnilink_core::{OmniError, Result, epoch};

use crate::process::SystemUrlOpener;
use crate::traits::{TaskProvider, UrlOpener};

/// URL handled by OmniFocus for fire-and-forget task creation.
const ADD_TASK_URL: &str = "omnifocus:///add";

/// Advisory attached to URL-scheme creations.
const SYNC_WARNING: &str =
    "Task created via the URL scheme; OmniFocus will sync it automatically.";

/// Advisory attached to every successful direct write.
const RESTART_WARNING: &str = "Change written directly to the database; \
it will not be visible in OmniFocus until the app is restarted.";

/// Policy text returned when the capability flag is off.
const WRITES_DISABLED_WARNING: &str = "Direct database writes are disabled. \
Enable the directWrite setting to allow them, or use the full-automation \
provider.";

fn default_database_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join("Library/Group Containers")
        .join("34YW5XSRB7.com.omnigroup.OmniFocus")
        .join("com.omnigroup.OmniFocus4")
        .join("com.omnigroup.OmniFocusModel")
        .join("OmniFocusDatabase.db")
}

/// Backend used when AppleScript automation is not authorized.
pub struct DirectAccessProvider {
    db_path: PathBuf,
    opener: Arc<dyn UrlOpener>,
    config: Mutex<ProviderConfig>,
}

impl DirectAccessProvider {
    /// Provider against the standard OmniFocus 4 container path, opening
    /// URLs with the system `open` command.
    pub fn new() -> Self {
        Self::with_parts(default_database_path(), Arc::new(SystemUrlOpener))
    }

    /// Provider with an explicit database path and URL opener (tests).
    pub fn with_parts(db_path: PathBuf, opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            db_path,
            opener,
            config: Mutex::new(ProviderConfig::default()),
        }
    }

    fn open_read_only(&self) -> Result<Connection> {
        Ok(Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY,
        )?)
    }

    fn open_read_write(&self) -> Result<Connection> {
        // No CREATE flag: the database must already exist. We never own it.
        Ok(Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE,
        )?)
    }
}

impl Default for DirectAccessProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskProvider for DirectAccessProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Restricted
    }

    fn config(&self) -> ProviderConfig {
        *self.config.lock()
    }

    fn set_config(&self, update: ConfigUpdate) {
        self.config.lock().apply(update);
    }

    async fn get_tasks(&self, filter: Option<TaskFilter>) -> Result<Vec<Task>> {
        let conn = self.open_read_only()?;

        let today = Utc::now().date_naive();
        let (day_start, day_end) = epoch::day_bounds(today);

        let mut sql = String::from(
            "SELECT t.persistentIdentifier, t.name, t.plainTextNote, t.flagged, t.dateDue, p.name
             FROM Task t
             LEFT JOIN ProjectInfo pi ON t.containingProjectInfo = pi.pk
             LEFT JOIN Task p ON pi.task = p.persistentIdentifier
             WHERE t.dateCompleted IS NULL",
        );
        let mut bind: Vec<Box<dyn ToSql>> = Vec::new();

        match filter {
            Some(TaskFilter::Flagged) => sql.push_str(" AND t.flagged = 1"),
            Some(TaskFilter::DueToday) => {
                sql.push_str(" AND t.dateDue >= ? AND t.dateDue < ?");
                bind.push(Box::new(day_start));
                bind.push(Box::new(day_end));
            }
            Some(TaskFilter::All) | None => {
                sql.push_str(" AND (t.flagged = 1 OR t.dateDue < ?)");
                bind.push(Box::new(day_end));
            }
        }

        // Dateless rows sort after dated ones; flagged breaks ties first.
        sql.push_str(" ORDER BY t.dateDue ASC NULLS LAST, t.flagged DESC LIMIT ?");
        bind.push(Box::new(i64::from(self.config.lock().task_limit)));

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params_from_iter(bind.iter()), |row| {
                let note: Option<String> = row.get(2)?;
                let flagged: i64 = row.get(3)?;
                let due: Option<f64> = row.get(4)?;
                Ok(Task {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    note: note.filter(|n| !n.is_empty()),
                    flagged: Some(flagged == 1),
                    due_date: due.map(epoch::storage_to_date),
                    project: row.get(5)?,
                    completed: Some(false),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = tasks.len(), ?filter, "listed tasks via database");
        Ok(tasks)
    }

    async fn create_task(&self, input: CreateTaskInput) -> Result<ActionOutcome> {
        // Creation never touches the database: the URL scheme hands the task
        // to the running application, which validates and syncs it itself.
        let mut url = Url::parse(ADD_TASK_URL).map_err(|e| OmniError::UrlOpen {
            message: e.to_string(),
        })?;
        {
            let mut query = url.query_pairs_mut();
            let _ = query.append_pair("name", &input.name);
            let _ = query.append_pair("autosave", "true");
            if let Some(note) = &input.note {
                let _ = query.append_pair("note", note);
            }
            if input.flagged == Some(true) {
                let _ = query.append_pair("flag", "true");
            }
            if let Some(due) = input.due_date {
                let _ = query.append_pair("due", &due.format("%Y-%m-%d").to_string());
            }
            if let Some(project) = &input.project {
                let _ = query.append_pair("project", project);
            }
        }

        self.opener.open(url.as_str()).await?;
        debug!(name = %input.name, "created task via URL scheme");
        Ok(ActionOutcome::ok_with_warning(SYNC_WARNING))
    }

    async fn update_task(&self, input: UpdateTaskInput) -> Result<ActionOutcome> {
        if !self.config.lock().direct_write {
            return Ok(ActionOutcome::rejected(WRITES_DISABLED_WARNING));
        }
        if !input.has_changes() {
            return Ok(ActionOutcome::ok());
        }

        let conn = self.open_read_write()?;

        let mut sets = Vec::new();
        let mut bind: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(name) = &input.name {
            sets.push("name = ?");
            bind.push(Box::new(name.clone()));
        }
        if let Some(note) = &input.note {
            // An explicitly empty note clears the field.
            sets.push("plainTextNote = ?");
            bind.push(Box::new(note.clone()));
        }
        if let Some(flagged) = input.flagged {
            sets.push("flagged = ?");
            bind.push(Box::new(i64::from(flagged)));
        }
        if let Some(due) = input.due_date {
            sets.push("dateDue = ?");
            bind.push(Box::new(epoch::date_to_storage(due)));
        }
        bind.push(Box::new(input.task_id.clone()));

        let sql = format!(
            "UPDATE Task SET {} WHERE persistentIdentifier = ?",
            sets.join(", ")
        );
        let changed = conn.execute(&sql, params_from_iter(bind.iter()))?;
        if changed == 0 {
            return Err(OmniError::TaskNotFound {
                task_id: input.task_id,
            });
        }

        debug!(task_id = %input.task_id, changed, "updated task via database");
        Ok(ActionOutcome::ok_with_warning(RESTART_WARNING))
    }

    async fn complete_task(&self, task_id: &str) -> Result<ActionOutcome> {
        if !self.config.lock().direct_write {
            return Ok(ActionOutcome::rejected(WRITES_DISABLED_WARNING));
        }

        let conn = self.open_read_write()?;
        let now = epoch::to_storage(Utc::now());
        let changed = conn.execute(
            "UPDATE Task SET dateCompleted = ? WHERE persistentIdentifier = ?",
            rusqlite::params![now, task_id],
        )?;
        if changed == 0 {
            return Err(OmniError::TaskNotFound {
                task_id: task_id.to_string(),
            });
        }

        debug!(%task_id, "completed task via database");
        Ok(ActionOutcome::ok_with_warning(RESTART_WARNING))
    }

    async fn get_projects(&self) -> Result<Vec<String>> {
        let conn = self.open_read_only()?;
        let mut stmt = conn.prepare(
            "SELECT t.name
             FROM Task t
             JOIN ProjectInfo pi ON t.persistentIdentifier = pi.task
             ORDER BY t.name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
