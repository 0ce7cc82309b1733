//! Unified error type for the docforge workspace.
//!
//! All crates funnel their failures into [`Error`]. Build-time problems
//! (unknown action ids, rejected parameters) are distinguished from run-time
//! failures via [`Error::is_validation`], so callers can tell "the pipeline
//! was never built" apart from "the run aborted".

use std::fmt;
use std::path::Path;

/// Unified error type covering all failure modes in docforge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested action id is not in the catalog.
    #[error("unknown action: {action_id}")]
    UnknownAction {
        /// The identifier that was looked up.
        action_id: String,
    },

    /// A declared action's parameter failed validation at build time.
    #[error("invalid parameter for {action_id} [{field}]: {message}")]
    InvalidParameter {
        /// The action the parameter belongs to.
        action_id: String,
        /// The offending field name.
        field: String,
        /// What was expected.
        message: String,
    },

    /// The editing host failed. Always fatal at run time.
    #[error("host error [{operation}]: {message}")]
    Host {
        /// The host operation that failed (e.g. "open", "save", "merge").
        operation: String,
        /// Human-readable error description.
        message: String,
    },

    /// A stage-directory reset or stage-in copy failed. Fatal.
    #[error("staging error [{path}]: {message}")]
    Staging {
        /// The path that could not be prepared or copied.
        path: String,
        /// Human-readable error description.
        message: String,
    },

    /// A stepping call arrived before the run was started.
    #[error("run not started")]
    NotStarted,

    /// A second start call arrived for a processor that already ran.
    #[error("run already started")]
    AlreadyStarted,

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// True for build-time validation failures, i.e. errors raised before
    /// any execution starts.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::UnknownAction { .. } | Error::InvalidParameter { .. }
        )
    }

    /// Convenience constructor for [`Error::UnknownAction`].
    pub fn unknown_action(action_id: impl Into<String>) -> Self {
        Error::UnknownAction {
            action_id: action_id.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidParameter`].
    pub fn invalid_parameter(
        action_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            action_id: action_id.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Host`].
    pub fn host(operation: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::Host {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Staging`].
    pub fn staging(path: &Path, message: impl fmt::Display) -> Self {
        Error::Staging {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
