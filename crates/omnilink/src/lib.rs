//! # omnilink
//!
//! CLI front end for the omnilink OmniFocus bridge.
//!
//! The binary detects the usable automation surface once at startup,
//! constructs the matching provider, executes one operation, and prints a
//! JSON envelope on stdout. Logs go to stderr.

#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod sanitize;
