//! Raw declared-action types.
//!
//! An [`ActionRequest`] is exactly what a user writes in a scenario file or
//! passes over the CLI: an action id plus an optional content value. The
//! pipeline compiles requests into typed commands; nothing here knows how an
//! action executes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content value attached to a declared action.
///
/// Untagged: scenario files write a bare string or integer (or omit the key
/// entirely for actions that take no content).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionValue {
    /// No content declared.
    #[default]
    Empty,
    /// Free-form text (search needles, replacement text, font names, ...).
    Text(String),
    /// Integer content (move counts, line spacing).
    Number(i64),
}

impl ActionValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ActionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ActionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for ActionValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// One user-declared action, not yet validated against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Catalog identifier, e.g. `"search_forward"`.
    #[serde(rename = "id")]
    pub action_id: String,
    /// Declared content, if any.
    #[serde(default, skip_serializing_if = "ActionValue::is_empty")]
    pub content: ActionValue,
}

impl ActionRequest {
    pub fn new(action_id: impl Into<String>, content: impl Into<ActionValue>) -> Self {
        Self {
            action_id: action_id.into(),
            content: content.into(),
        }
    }

    /// A request with no content value.
    pub fn bare(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            content: ActionValue::Empty,
        }
    }
}
