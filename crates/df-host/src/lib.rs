//! df-host: the document-editing host boundary.
//!
//! The pipeline drives an external, stateful editing host through the narrow
//! [`DocumentHost`] / [`DocumentSession`] pair defined here. The host is
//! non-reentrant by contract: one session at a time, exactly one open
//! document per session, and no concurrent calls against a session.
//!
//! [`TextHost`] is the bundled implementation over plain UTF-8 text files;
//! real hosts (word processors driven over automation interfaces) implement
//! the same pair.

pub mod text;

pub use text::{TextHost, PAGE_SEPARATOR};

use std::path::{Path, PathBuf};

use df_core::{BreakKind, Direction, Landmark, MoveUnit, Result, SelectUnit, TextFormat};

/// Factory side of the host boundary: opens sessions and performs the host's
/// n-to-1 document merge.
///
/// Implementations must be cheap to share (`Arc<dyn DocumentHost>`); all
/// per-document state lives in the session.
pub trait DocumentHost: Send + Sync {
    /// Short host name for logs and error messages.
    fn name(&self) -> &'static str;

    /// Open a document for editing.
    ///
    /// The cursor starts collapsed at the document start. Failing to open
    /// (missing file, unreadable content) is a host error and fatal to the
    /// run.
    fn open(&self, path: &Path) -> Result<Box<dyn DocumentSession>>;

    /// Concatenate `inputs` in order into a single new document at `output`.
    ///
    /// Requires at least one input. No session may be open while merging.
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;
}

/// One open document. The session tracks a single cursor/selection: a
/// collapsed selection is the cursor.
///
/// Methods returning `Result<bool>` use `Ok(false)` for "the document did
/// not cooperate" (text not found, structural context not met); the caller
/// decides whether that is a failure. `Err(_)` always means the host itself
/// failed and is fatal.
pub trait DocumentSession {
    /// Path of the document this session edits.
    fn path(&self) -> &Path;

    /// Search from the cursor and collapse at the match on success: at the
    /// match end for [`Direction::Down`], at the match start for
    /// [`Direction::Up`]. On `Ok(false)` the cursor is unchanged.
    fn find(&mut self, text: &str, direction: Direction) -> Result<bool>;

    /// Relative cursor motion, clamped at the document bounds. A non-empty
    /// selection first collapses at the edge the motion leaves from.
    fn move_cursor(&mut self, unit: MoveUnit, direction: Direction, count: u32) -> Result<()>;

    /// Collapse the cursor at an absolute landmark.
    fn jump_to(&mut self, landmark: Landmark) -> Result<()>;

    /// True when the selection is non-empty.
    fn has_selection(&self) -> bool;

    /// Insert text at the cursor, leaving the cursor collapsed after the
    /// insertion.
    fn insert_text(&mut self, text: &str) -> Result<()>;

    /// Insert a paragraph or page break at the cursor.
    fn insert_break(&mut self, kind: BreakKind) -> Result<()>;

    /// Select the structural unit around the cursor. `Ok(false)` when the
    /// unit is not available here (e.g. [`SelectUnit::Cell`] outside a
    /// table); the selection is then unchanged.
    fn select_unit(&mut self, unit: SelectUnit) -> Result<bool>;

    /// Search from the cursor and select the match itself. `Ok(false)` when
    /// not found; the selection is then unchanged.
    fn select_match(&mut self, text: &str, direction: Direction) -> Result<bool>;

    /// Extend the selection from its anchor through the next match.
    /// `Ok(false)` when not found; the selection is then unchanged.
    fn select_through(&mut self, text: &str, direction: Direction) -> Result<bool>;

    /// Replace the selection, leaving the replacement selected (so a
    /// following formatting command applies to it).
    fn replace_selection(&mut self, text: &str) -> Result<()>;

    /// Apply a formatting change to the selection.
    fn apply_format(&mut self, format: &TextFormat) -> Result<()>;

    /// Persist the buffer back to the document path.
    fn save(&mut self) -> Result<()>;

    /// Release the session, surfacing release errors. Dropping a session
    /// releases it silently; an abort path may rely on that.
    fn close(self: Box<Self>) -> Result<()>;
}

impl std::fmt::Debug for dyn DocumentSession + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}
