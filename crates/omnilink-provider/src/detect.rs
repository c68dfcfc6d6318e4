//! Edition detection.
//!
//! Runs one read-only AppleScript probe to decide which backend to
//! construct. Ambiguity never fails startup and never assumes the more
//! powerful surface: anything unrecognized, including a timeout, falls back
//! to [`ProviderKind::Restricted`].

use std::time::Duration;

use tracing::{debug, info, warn};

use omnilink_core::types::ProviderKind;

use crate::traits::ScriptRunner;

/// Total time budget for the probe.
pub const DETECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Read-only probe: fetches one task name. Fails fast whether or not
/// automation is authorized, so stderr is enough to classify the edition.
const PROBE_PROGRAM: &str =
    r#"tell application "OmniFocus" to get name of first flattened task"#;

/// Error text OmniFocus emits when automation is not authorized for this
/// edition. Implementation-defined constant of the application's current
/// diagnostic wording.
const NOT_AUTHORIZED_SIGNATURE: &str = "-1743";

/// Error text when scripting works but the lookup had nothing to fetch
/// (empty database). Absence of data is not absence of capability.
const NO_OBJECT_SIGNATURE: &str = "Can't get";

async fn probe(runner: &dyn ScriptRunner) -> ProviderKind {
    match runner.run_script(PROBE_PROGRAM).await {
        Ok(output) if output.success() => ProviderKind::FullAutomation,
        Ok(output) if output.stderr.contains(NOT_AUTHORIZED_SIGNATURE) => {
            debug!("automation not authorized");
            ProviderKind::Restricted
        }
        Ok(output) if output.stderr.contains(NO_OBJECT_SIGNATURE) => {
            // Zero tasks exist; the script itself was accepted.
            ProviderKind::FullAutomation
        }
        Ok(output) => {
            warn!(stderr = %output.stderr.trim(), "unrecognized probe failure");
            ProviderKind::Restricted
        }
        Err(e) => {
            warn!(error = %e, "probe could not run");
            ProviderKind::Restricted
        }
    }
}

/// Determine which provider to instantiate, once, within `budget`.
///
/// The probe races the timer; if the timer wins, the probe's eventual
/// result is discarded (it is read-only, so nothing dangles).
pub async fn detect_edition(runner: &dyn ScriptRunner, budget: Duration) -> ProviderKind {
    let kind = match tokio::time::timeout(budget, probe(runner)).await {
        Ok(kind) => kind,
        Err(_) => {
            warn!(budget_ms = budget.as_millis() as u64, "edition detection timed out");
            ProviderKind::Restricted
        }
    };
    info!(%kind, "detected OmniFocus edition");
    kind
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
