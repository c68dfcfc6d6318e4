//! # omnilink-core
//!
//! Foundation vocabulary for the omnilink OmniFocus bridge.
//!
//! - **Domain types**: [`types::Task`], [`types::CreateTaskInput`],
//!   [`types::UpdateTaskInput`], [`types::TaskFilter`], [`types::ProviderKind`]
//! - **Errors**: [`errors::OmniError`] hierarchy via `thiserror`
//! - **Escaping**: [`escape::escape_script_string`] for AppleScript literals
//! - **Epoch**: [`epoch`] — Core Data (2001) ↔ Unix (1970) translation
//! - **Validation**: [`validation`] — bounded length/format input checks
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `omnilink-provider` and the binary.

#![deny(unsafe_code)]

pub mod epoch;
pub mod errors;
pub mod escape;
pub mod logging;
pub mod types;
pub mod validation;

pub use errors::{OmniError, Result};
