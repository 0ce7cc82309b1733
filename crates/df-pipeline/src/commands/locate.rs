//! Locate commands: cursor movement without touching document content.

use df_core::Result;

use crate::command::{LocateOp, Outcome};
use crate::context::ActionContext;

/// Execute a locate operation against the open session.
///
/// A search that finds no match is a non-fatal miss (`succeeded == false`);
/// movement and jumps clamp at the document bounds and always succeed.
pub(crate) fn execute(op: &LocateOp, ctx: &mut ActionContext) -> Result<Outcome> {
    let session = ctx.session_mut()?;
    match op {
        LocateOp::Search { text, direction } => {
            if session.find(text, *direction)? {
                Ok(Outcome::ok())
            } else {
                Ok(Outcome::failed(format!("\"{text}\" not found")))
            }
        }
        LocateOp::Move {
            unit,
            direction,
            count,
        } => {
            session.move_cursor(*unit, *direction, *count)?;
            Ok(Outcome::ok())
        }
        LocateOp::Jump(landmark) => {
            session.jump_to(*landmark)?;
            Ok(Outcome::ok())
        }
    }
}
