//! Select commands: establish the selection later update commands act on.

use df_core::Result;

use crate::command::{Outcome, SelectOp};
use crate::context::ActionContext;

/// Execute a select operation against the open session.
///
/// All variants report a non-fatal miss when the host cannot form the
/// requested selection (no match, no such structure at the cursor).
pub(crate) fn execute(op: &SelectOp, ctx: &mut ActionContext) -> Result<Outcome> {
    let session = ctx.session_mut()?;
    match op {
        SelectOp::Unit(unit) => {
            if session.select_unit(*unit)? {
                Ok(Outcome::ok())
            } else {
                Ok(Outcome::failed(format!("cannot select {unit} here")))
            }
        }
        SelectOp::Match { text, direction } => {
            if session.select_match(text, *direction)? {
                Ok(Outcome::ok())
            } else {
                Ok(Outcome::failed(format!("\"{text}\" not found")))
            }
        }
        SelectOp::Through { text, direction } => {
            if session.select_through(text, *direction)? {
                Ok(Outcome::ok())
            } else {
                Ok(Outcome::failed(format!("\"{text}\" not found")))
            }
        }
    }
}
