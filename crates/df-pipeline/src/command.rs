//! Typed commands and their execution outcomes.
//!
//! A [`Command`] is the validated, compiled form of one declared action. The
//! variant set is closed: every action in the catalog maps onto one of the
//! five [`CommandKind`] categories, and each category's payload carries only
//! the fields that category needs.

use serde::{Deserialize, Serialize};
use std::fmt;

use df_core::{
    ActionValue, BreakKind, Direction, Landmark, MoveUnit, Result, SelectUnit, TextFormat,
};

use crate::commands;
use crate::context::ActionContext;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Fixed command classification; drives container grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Locate,
    Insert,
    Select,
    Update,
    Mixing,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locate => write!(f, "locate"),
            Self::Insert => write!(f, "insert"),
            Self::Select => write!(f, "select"),
            Self::Update => write!(f, "update"),
            Self::Mixing => write!(f, "mixing"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What a command execution did, when it did not take the run down with it.
///
/// `succeeded: false` is the non-fatal failure path ("not found", "no active
/// selection"); host failures are `Err(_)` from [`Command::execute`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub succeeded: bool,
    pub message: Option<String>,
}

impl Outcome {
    pub fn ok() -> Self {
        Self {
            succeeded: true,
            message: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-category operations
// ---------------------------------------------------------------------------

/// Cursor-driving operations. Never touch document content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOp {
    /// Search and collapse at the far edge of the match.
    Search { text: String, direction: Direction },
    /// Relative motion, clamped at the document bounds.
    Move {
        unit: MoveUnit,
        direction: Direction,
        count: u32,
    },
    /// Absolute jump.
    Jump(Landmark),
}

/// Content insertion at a collapsed cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOp {
    Text(String),
    Break(BreakKind),
}

/// Selection-establishing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOp {
    /// Select the structural unit around the cursor.
    Unit(SelectUnit),
    /// Search and select the match itself.
    Match { text: String, direction: Direction },
    /// Extend the selection from its anchor through the next match.
    Through { text: String, direction: Direction },
}

/// Mutations of the active selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOp {
    Replace(String),
    Format(TextFormat),
}

/// n-to-1 operations over the whole working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixingOp {
    /// Concatenate the working set into one document in the container's
    /// output directory.
    Merge,
}

// ---------------------------------------------------------------------------
// CommandKind / Command
// ---------------------------------------------------------------------------

/// Closed set of command payloads, one variant per category.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Locate(LocateOp),
    Insert(InsertOp),
    Select(SelectOp),
    Update(UpdateOp),
    Mixing(MixingOp),
}

impl CommandKind {
    pub fn category(&self) -> Category {
        match self {
            Self::Locate(_) => Category::Locate,
            Self::Insert(_) => Category::Insert,
            Self::Select(_) => Category::Select,
            Self::Update(_) => Category::Update,
            Self::Mixing(_) => Category::Mixing,
        }
    }
}

/// One validated, executable pipeline step.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Catalog id this command was built from.
    pub action_id: &'static str,
    /// Human-facing name from the catalog.
    pub display_name: &'static str,
    /// The declared content value, kept for display and logging.
    pub content: ActionValue,
    /// Typed payload.
    pub kind: CommandKind,
}

impl Command {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Mixing commands always seal the open container and get their own.
    pub fn is_mixing(&self) -> bool {
        matches!(self.kind, CommandKind::Mixing(_))
    }

    /// Display form for logs and progress reports, e.g. `Insert Text(hello)`.
    pub fn describe(&self) -> String {
        if self.content.is_empty() {
            self.display_name.to_string()
        } else {
            format!("{}({})", self.display_name, self.content)
        }
    }

    /// Run this command against the shared context.
    ///
    /// `Ok(Outcome { succeeded: false, .. })` is a non-fatal step failure;
    /// the caller logs it and continues. `Err(_)` is fatal to the run.
    pub fn execute(&self, ctx: &mut ActionContext) -> Result<Outcome> {
        match &self.kind {
            CommandKind::Locate(op) => commands::locate::execute(op, ctx),
            CommandKind::Insert(op) => commands::insert::execute(op, ctx),
            CommandKind::Select(op) => commands::select::execute(op, ctx),
            CommandKind::Update(op) => commands::update::execute(op, ctx),
            CommandKind::Mixing(op) => commands::mixing::execute(op, ctx),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: CommandKind, content: ActionValue) -> Command {
        Command {
            action_id: "sample",
            display_name: "Sample",
            content,
            kind,
        }
    }

    #[test]
    fn category_per_kind() {
        let cases = [
            (
                CommandKind::Locate(LocateOp::Jump(Landmark::DocumentStart)),
                Category::Locate,
            ),
            (
                CommandKind::Insert(InsertOp::Break(BreakKind::Page)),
                Category::Insert,
            ),
            (
                CommandKind::Select(SelectOp::Unit(SelectUnit::Line)),
                Category::Select,
            ),
            (
                CommandKind::Update(UpdateOp::Replace("x".into())),
                Category::Update,
            ),
            (CommandKind::Mixing(MixingOp::Merge), Category::Mixing),
        ];
        for (kind, category) in cases {
            assert_eq!(kind.category(), category);
        }
    }

    #[test]
    fn only_mixing_is_mixing() {
        let merge = sample(CommandKind::Mixing(MixingOp::Merge), ActionValue::Empty);
        assert!(merge.is_mixing());

        let jump = sample(
            CommandKind::Locate(LocateOp::Jump(Landmark::DocumentEnd)),
            ActionValue::Empty,
        );
        assert!(!jump.is_mixing());
    }

    #[test]
    fn describe_includes_content() {
        let cmd = sample(
            CommandKind::Insert(InsertOp::Text("hello".into())),
            ActionValue::from("hello"),
        );
        assert_eq!(cmd.describe(), "Sample(hello)");

        let bare = sample(CommandKind::Mixing(MixingOp::Merge), ActionValue::Empty);
        assert_eq!(bare.describe(), "Sample");
    }
}
