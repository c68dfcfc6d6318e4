//! Full-automation backend: generated AppleScript over a spawned
//! `osascript` process.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use omnilink_core::types::{
    ActionOutcome, ConfigUpdate, CreateTaskInput, ProviderConfig, ProviderKind, Task, TaskFilter,
    UpdateTaskInput,
};
use omnilink_core::{OmniError, Result};

use crate::process::OsascriptRunner;
use crate::script;
use crate::traits::{ScriptRunner, TaskProvider};

/// Backend that drives OmniFocus through its AppleScript automation surface.
///
/// Holds no cross-call state beyond configuration. The `direct_write`
/// setting is ignored here: every write goes through the application itself.
pub struct AutomationProvider {
    runner: Arc<dyn ScriptRunner>,
    config: Mutex<ProviderConfig>,
}

impl AutomationProvider {
    /// Provider backed by a real `osascript` process.
    pub fn new() -> Self {
        Self::with_runner(Arc::new(OsascriptRunner))
    }

    /// Provider with an injected runner (tests).
    pub fn with_runner(runner: Arc<dyn ScriptRunner>) -> Self {
        Self {
            runner,
            config: Mutex::new(ProviderConfig {
                direct_write: false,
                ..ProviderConfig::default()
            }),
        }
    }

    /// Run a program, mapping a non-zero exit to [`OmniError::Script`] with
    /// the trimmed stderr (or a generic message if empty).
    async fn run(&self, program: &str) -> Result<String> {
        let output = self.runner.run_script(program).await?;
        if output.success() {
            Ok(output.stdout.trim().to_string())
        } else {
            let message = output.stderr.trim();
            Err(OmniError::Script {
                message: if message.is_empty() {
                    "unknown error".to_string()
                } else {
                    message.to_string()
                },
            })
        }
    }
}

impl Default for AutomationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskProvider for AutomationProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::FullAutomation
    }

    fn config(&self) -> ProviderConfig {
        *self.config.lock()
    }

    fn set_config(&self, update: ConfigUpdate) {
        self.config.lock().apply(update);
    }

    async fn get_tasks(&self, filter: Option<TaskFilter>) -> Result<Vec<Task>> {
        let output = self.run(&script::list_tasks(filter)).await?;
        let mut tasks = script::parse_task_records(&output)?;
        let limit = self.config.lock().task_limit as usize;
        tasks.truncate(limit);
        debug!(count = tasks.len(), ?filter, "listed tasks via AppleScript");
        Ok(tasks)
    }

    async fn create_task(&self, input: CreateTaskInput) -> Result<ActionOutcome> {
        let task_id = self.run(&script::create_task(&input)).await?;
        debug!(%task_id, "created task via AppleScript");
        Ok(ActionOutcome {
            success: true,
            task_id: Some(task_id),
            warning: None,
        })
    }

    async fn update_task(&self, input: UpdateTaskInput) -> Result<ActionOutcome> {
        let _ = self.run(&script::update_task(&input)).await?;
        debug!(task_id = %input.task_id, "updated task via AppleScript");
        Ok(ActionOutcome::ok())
    }

    async fn complete_task(&self, task_id: &str) -> Result<ActionOutcome> {
        let _ = self.run(&script::complete_task(task_id)).await?;
        debug!(%task_id, "completed task via AppleScript");
        Ok(ActionOutcome::ok())
    }

    async fn get_projects(&self) -> Result<Vec<String>> {
        let output = self.run(&script::list_projects()).await?;
        if output.is_empty() {
            return Ok(Vec::new());
        }
        Ok(output
            .split(script::LIST_SEPARATOR)
            .map(str::to_string)
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
