//! # df-pipeline
//!
//! Staged execution of document-editing pipelines.
//!
//! This crate provides:
//!
//! - **[`Catalog`]** -- the static registry of every action the engine
//!   knows, and the validator that compiles declared actions into commands.
//! - **[`Command`]** -- one typed, executable pipeline step, classified
//!   into locate / insert / select / update / mixing categories.
//! - **[`CommandManager`]** -- groups commands into [`CommandContainer`]s:
//!   consecutive per-file commands share a batch container, every mixing
//!   command gets its own.
//! - **[`ActionContext`]** -- shared execution state (working set, open
//!   host session, progress counters, run log).
//! - **[`ActionProcessor`]** -- drives the containers to completion, one
//!   task per [`step`](ActionProcessor::step), with per-step callbacks and
//!   clean abort on fatal errors.
//! - **[`Workspace`]** -- the staging root runs copy and edit documents
//!   under.

pub mod catalog;
pub mod command;
pub mod commands;
pub mod container;
pub mod context;
pub mod log;
pub mod manager;
pub mod processor;
pub mod workspace;

// Re-export key types at the crate root.
pub use catalog::{ActionSpec, Catalog, ContentKind};
pub use command::{Category, Command, CommandKind, Outcome};
pub use container::{CommandContainer, ContainerKind};
pub use context::{ActionContext, ProgressSnapshot, ProgressTracker};
pub use log::{LogLevel, LogRecord, RunLog};
pub use manager::CommandManager;
pub use processor::{
    ActionProcessor, FileCallback, RunState, RunSummary, StepCallback, StepReport,
};
pub use workspace::{stage_files, Workspace};

// The request types most callers feed into the catalog.
pub use df_core::{ActionRequest, ActionValue};
