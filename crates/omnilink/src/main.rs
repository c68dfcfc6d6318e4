//! omnilink binary entry point.
//!
//! Detects the usable automation surface once, builds the matching
//! provider, runs one command, prints JSON on stdout. Exit code 1 on any
//! core failure, with a sanitized `{"error": ...}` envelope.

use clap::Parser;
use tracing::error;

use omnilink::cli::Cli;
use omnilink::{commands, sanitize};
use omnilink_provider::detect::{DETECTION_TIMEOUT, detect_edition};
use omnilink_provider::process::OsascriptRunner;
use omnilink_provider::provider_for;

#[tokio::main]
async fn main() {
    omnilink_core::logging::init();
    let cli = Cli::parse();

    let kind = detect_edition(&OsascriptRunner, DETECTION_TIMEOUT).await;
    let provider = provider_for(kind);

    match commands::execute(cli.command, provider.as_ref()).await {
        Ok(value) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&value).unwrap_or_default()
            );
        }
        Err(e) => {
            error!(category = e.category(), error = %e, "operation failed");
            let envelope =
                serde_json::json!({ "error": sanitize::sanitize_error_message(&e.to_string()) });
            println!("{envelope}");
            std::process::exit(1);
        }
    }
}
