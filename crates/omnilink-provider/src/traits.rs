//! Provider contract and process seams.
//!
//! [`TaskProvider`] is the uniform surface both backends implement.
//! [`ScriptRunner`] and [`UrlOpener`] are the process-spawning seams; tests
//! substitute hand-written mocks for them.

use async_trait::async_trait;

use omnilink_core::Result;
use omnilink_core::types::{
    ActionOutcome, ConfigUpdate, CreateTaskInput, ProviderConfig, ProviderKind, Task, TaskFilter,
    UpdateTaskInput,
};

/// Captured output of an `osascript` run.
#[derive(Debug, Clone)]
pub struct ScriptOutput {
    /// Captured stdout, unmodified.
    pub stdout: String,
    /// Captured stderr, unmodified.
    pub stderr: String,
    /// Process exit code (`-1` if terminated by signal).
    pub exit_code: i32,
}

impl ScriptOutput {
    /// Whether the process exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes an AppleScript program and reports the raw outcome.
///
/// A non-zero exit is *not* an `Err` at this level — edition detection needs
/// to inspect the failure text. Only spawn/wait failures error here.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run `program` to completion and capture its output.
    async fn run_script(&self, program: &str) -> Result<ScriptOutput>;
}

/// Hands a URL to the operating system's default open facility.
#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Open `url`; returns once the OS-level handoff completes.
    async fn open(&self, url: &str) -> Result<()>;
}

/// The task-provider contract consumed by the interface layer.
///
/// One instance is selected per process lifetime. Operations are
/// independent: no cross-call state beyond the configuration, which is read
/// at call time.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> ProviderKind;

    /// Snapshot of the current configuration.
    fn config(&self) -> ProviderConfig;

    /// Apply a partial configuration update.
    fn set_config(&self, update: ConfigUpdate);

    /// List open tasks. `None` defaults to "flagged or due today".
    async fn get_tasks(&self, filter: Option<TaskFilter>) -> Result<Vec<Task>>;

    /// Create a task, returning its new identifier when the backend reports
    /// one.
    async fn create_task(&self, input: CreateTaskInput) -> Result<ActionOutcome>;

    /// Patch an existing task; absent fields are left unchanged.
    async fn update_task(&self, input: UpdateTaskInput) -> Result<ActionOutcome>;

    /// Mark a task completed.
    async fn complete_task(&self, task_id: &str) -> Result<ActionOutcome>;

    /// Names of active projects.
    async fn get_projects(&self) -> Result<Vec<String>>;
}
