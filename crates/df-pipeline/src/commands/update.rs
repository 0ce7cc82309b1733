//! Update commands: rewrite or reformat the active selection.

use df_core::Result;

use crate::command::{Outcome, UpdateOp};
use crate::context::ActionContext;

/// Execute an update operation against the open session.
///
/// Updates act on whatever selection the preceding commands established;
/// with no active selection the command reports a non-fatal miss rather
/// than guessing a target.
pub(crate) fn execute(op: &UpdateOp, ctx: &mut ActionContext) -> Result<Outcome> {
    let session = ctx.session_mut()?;
    if !session.has_selection() {
        return Ok(Outcome::failed("no active selection"));
    }
    match op {
        UpdateOp::Replace(text) => {
            session.replace_selection(text)?;
            Ok(Outcome::ok_with(format!(
                "replaced selection with {} chars",
                text.chars().count(),
            )))
        }
        UpdateOp::Format(format) => {
            session.apply_format(format)?;
            Ok(Outcome::ok_with(format!("applied {format}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use df_core::{Direction, TextFormat};
    use df_host::TextHost;

    use super::*;

    fn context_with(text: &str) -> (tempfile::TempDir, ActionContext) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let mut ctx = ActionContext::new(Arc::new(TextHost::new()));
        ctx.open_session(&path).unwrap();
        (dir, ctx)
    }

    #[test]
    fn update_without_selection_is_nonfatal() {
        let (_dir, mut ctx) = context_with("text");
        let op = UpdateOp::Replace("new".into());
        let outcome = execute(&op, &mut ctx).unwrap();
        assert!(!outcome.succeeded);
        assert_eq!(outcome.message.as_deref(), Some("no active selection"));
    }

    #[test]
    fn replace_rewrites_selection() {
        let (_dir, mut ctx) = context_with("old words here");
        ctx.session_mut()
            .unwrap()
            .select_match("old", Direction::Down)
            .unwrap();

        let op = UpdateOp::Replace("new".into());
        let outcome = execute(&op, &mut ctx).unwrap();
        assert!(outcome.succeeded);
        assert_eq!(
            outcome.message.as_deref(),
            Some("replaced selection with 3 chars"),
        );
    }

    #[test]
    fn format_reports_what_was_applied() {
        let (_dir, mut ctx) = context_with("styled text");
        ctx.session_mut()
            .unwrap()
            .select_match("styled", Direction::Down)
            .unwrap();

        let op = UpdateOp::Format(TextFormat::Font("Arial".into()));
        let outcome = execute(&op, &mut ctx).unwrap();
        assert!(outcome.succeeded);
        assert_eq!(outcome.message.as_deref(), Some("applied font=Arial"));
    }
}
