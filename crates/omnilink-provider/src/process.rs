//! Real process-backed implementations of the spawning seams.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use omnilink_core::{OmniError, Result};

use crate::traits::{ScriptOutput, ScriptRunner, UrlOpener};

/// Runs AppleScript by piping the program to `osascript -` on stdin.
///
/// Each call spawns a fresh interpreter and awaits full process exit; output
/// is small and bounded, so nothing is streamed.
pub struct OsascriptRunner;

#[async_trait]
impl ScriptRunner for OsascriptRunner {
    async fn run_script(&self, program: &str) -> Result<ScriptOutput> {
        let mut child = tokio::process::Command::new("osascript")
            .arg("-")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Write the program and close stdin so the interpreter starts.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(program.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "osascript completed");

        Ok(ScriptOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code,
        })
    }
}

/// Opens URLs with the system `open` command, which hands an
/// `omnifocus://` URL to the running application.
pub struct SystemUrlOpener;

#[async_trait]
impl UrlOpener for SystemUrlOpener {
    async fn open(&self, url: &str) -> Result<()> {
        debug!(url, "opening URL");
        let output = tokio::process::Command::new("open")
            .arg(url)
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            Err(OmniError::UrlOpen {
                message: if message.is_empty() {
                    format!("open exited with {}", output.status.code().unwrap_or(-1))
                } else {
                    message.to_string()
                },
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
