//! df-core: shared types, errors, configuration, and document-domain enums.
//!
//! This crate is the foundational dependency for the other df-* crates,
//! providing the unified error type, application configuration, raw
//! declared-action types, typed identifiers, and the enums the host
//! boundary and the pipeline share.

pub mod action;
pub mod config;
pub mod document;
pub mod error;
pub mod ids;

// Re-export the most commonly used items at the crate root.
pub use action::{ActionRequest, ActionValue};
pub use config::Config;
pub use error::{Error, Result};
pub use document::*;
pub use ids::*;
