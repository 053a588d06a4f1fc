//! Build driver library for C extension modules.
//!
//! This crate provides the core functionality for declaring and compiling
//! ahead-of-time-generated C extension modules into platform-native loadable
//! artifacts. It is used by the `pyext-build` CLI binary and can be consumed
//! programmatically for testing or custom build workflows.
//!
//! # Modules
//!
//! - [`builder`] - Compile orchestration and artifact commit
//! - [`cli`] - Command-line argument definitions
//! - [`compiler`] - C compiler discovery and invocation plumbing
//! - [`descriptor`] - Immutable extension declarations
//! - [`error`] - Semantic error types
//! - [`list`] - Declared-extension listing
//! - [`manifest`] - `extension.toml` loading
//! - [`module_name`] - Validated module name wrapper
//! - [`output`] - User-facing output formatting
//! - [`pipeline`] - Build and staging orchestration
//! - [`stager`] - Artifact placement into the import path

pub mod builder;
pub mod cli;
pub mod compiler;
pub mod descriptor;
pub mod error;
pub mod list;
pub mod manifest;
pub mod module_name;
pub mod output;
pub mod pipeline;
pub mod stager;
