//! Per-category command executors.
//!
//! Each submodule implements the execution semantics for one command
//! category, operating on the shared [`ActionContext`](crate::context::ActionContext).
//! The dispatch from [`Command::execute`](crate::command::Command::execute)
//! lands here.

pub(crate) mod insert;
pub(crate) mod locate;
pub(crate) mod mixing;
pub(crate) mod select;
pub(crate) mod update;
