//! Insert commands: add content at the cursor position.

use df_core::Result;

use crate::command::{InsertOp, Outcome};
use crate::context::ActionContext;

/// Execute an insert operation against the open session.
///
/// Insertion requires a collapsed cursor; an active selection is a non-fatal
/// refusal, never an implicit overwrite.
pub(crate) fn execute(op: &InsertOp, ctx: &mut ActionContext) -> Result<Outcome> {
    let session = ctx.session_mut()?;
    if session.has_selection() {
        return Ok(Outcome::failed("insertion requires a collapsed cursor"));
    }
    match op {
        InsertOp::Text(text) => {
            session.insert_text(text)?;
            Ok(Outcome::ok_with(format!("inserted {} chars", text.chars().count())))
        }
        InsertOp::Break(kind) => {
            session.insert_break(*kind)?;
            Ok(Outcome::ok())
        }
    }
}
