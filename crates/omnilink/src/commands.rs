//! Maps parsed CLI commands onto the selected provider.
//!
//! Input validation runs here, before any backend is touched; the providers
//! treat it as a satisfied pre-condition.

use serde_json::{Value, json};

use omnilink_core::types::{ActionOutcome, ConfigUpdate, CreateTaskInput, UpdateTaskInput};
use omnilink_core::validation::{
    parse_due_date, validate_config_update, validate_create_input, validate_task_id,
    validate_update_input,
};
use omnilink_core::Result;
use omnilink_provider::TaskProvider;

use crate::cli::{Command, ConfigCommand, CreateArgs, UpdateArgs};

fn outcome_envelope(provider: &dyn TaskProvider, outcome: &ActionOutcome) -> Result<Value> {
    let mut value = serde_json::to_value(outcome).map_err(|e| {
        omnilink_core::OmniError::Parse {
            message: e.to_string(),
        }
    })?;
    if let Some(object) = value.as_object_mut() {
        let _ = object.insert("provider".into(), json!(provider.kind()));
    }
    Ok(value)
}

fn create_input(args: CreateArgs) -> Result<CreateTaskInput> {
    let input = CreateTaskInput {
        name: args.name,
        note: args.note,
        project: args.project,
        flagged: args.flagged.then_some(true),
        due_date: args.due.as_deref().map(parse_due_date).transpose()?,
    };
    validate_create_input(&input)?;
    Ok(input)
}

fn update_input(args: UpdateArgs) -> Result<UpdateTaskInput> {
    let input = UpdateTaskInput {
        task_id: args.task_id,
        name: args.name,
        note: args.note,
        flagged: args.flagged,
        due_date: args.due.as_deref().map(parse_due_date).transpose()?,
    };
    validate_update_input(&input)?;
    Ok(input)
}

/// Execute one CLI command against the selected provider and produce the
/// JSON envelope printed on stdout.
pub async fn execute(command: Command, provider: &dyn TaskProvider) -> Result<Value> {
    match command {
        Command::Tasks { filter } => {
            let tasks = provider.get_tasks(filter.map(Into::into)).await?;
            Ok(json!({ "provider": provider.kind(), "tasks": tasks }))
        }
        Command::Create(args) => {
            let outcome = provider.create_task(create_input(args)?).await?;
            outcome_envelope(provider, &outcome)
        }
        Command::Update(args) => {
            let outcome = provider.update_task(update_input(args)?).await?;
            outcome_envelope(provider, &outcome)
        }
        Command::Complete { task_id } => {
            validate_task_id(&task_id)?;
            let outcome = provider.complete_task(&task_id).await?;
            outcome_envelope(provider, &outcome)
        }
        Command::Projects => {
            let projects = provider.get_projects().await?;
            Ok(json!({ "provider": provider.kind(), "projects": projects }))
        }
        Command::Config(ConfigCommand::Get) => Ok(json!({
            "provider": provider.kind(),
            "config": provider.config(),
        })),
        Command::Config(ConfigCommand::Set {
            direct_write,
            task_limit,
        }) => {
            let update = ConfigUpdate {
                direct_write,
                task_limit,
            };
            validate_config_update(&update)?;
            provider.set_config(update);
            Ok(json!({
                "provider": provider.kind(),
                "success": true,
                "config": provider.config(),
            }))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
