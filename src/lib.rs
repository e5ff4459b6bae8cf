//! Generic artifacts task: a pipeline task that drives the `JFrog` CLI.
//!
//! Each invocation turns task inputs into exactly one repository command
//! (upload, download, property changes, move, copy, delete, or a download
//! of every artifact of a named build), brackets it with a transient server
//! profile, and reports a single outcome to the host.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: operations, command tokens and outcomes, free of I/O
//! - **Ports**: traits for host inputs, the CLI process and the filesystem
//! - **Adapters**: Azure Pipelines, `tokio::process`, `cap-std` and
//!   in-memory implementations
//!
//! # Modules
//!
//! - [`artifacts`]: the task itself
//! - [`config`]: runtime settings
//! - [`shell`]: quoting helpers for logged commands

pub mod artifacts;
pub mod config;
pub mod shell;
