//! # omnilink-provider
//!
//! The two OmniFocus backends behind one [`traits::TaskProvider`] contract:
//!
//! - [`applescript::AutomationProvider`] — generates AppleScript per
//!   operation and pipes it to a spawned `osascript` process. Used when the
//!   installed edition allows automation.
//! - [`direct::DirectAccessProvider`] — creates tasks through the
//!   `omnifocus:///add` URL scheme and reads/updates the cache database
//!   directly with SQLite. Used when automation is not authorized.
//!
//! [`detect::detect_edition`] probes which surface is usable once at
//! startup; [`provider_for`] is the single place the choice is made.
//! Nothing downstream branches on [`ProviderKind`] again.

#![deny(unsafe_code)]

pub mod applescript;
pub mod detect;
pub mod direct;
pub mod process;
pub mod script;
pub mod traits;

pub use omnilink_core::types::ProviderKind;
pub use traits::TaskProvider;

/// Construct the provider matching a detected [`ProviderKind`].
///
/// The returned object is intended to live for the rest of the process; the
/// kind is never re-detected.
pub fn provider_for(kind: ProviderKind) -> Box<dyn TaskProvider> {
    match kind {
        ProviderKind::FullAutomation => Box::new(applescript::AutomationProvider::new()),
        ProviderKind::Restricted => Box::new(direct::DirectAccessProvider::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_matches_kind() {
        let provider = provider_for(ProviderKind::FullAutomation);
        assert_eq!(provider.kind(), ProviderKind::FullAutomation);

        let provider = provider_for(ProviderKind::Restricted);
        assert_eq!(provider.kind(), ProviderKind::Restricted);
    }
}
