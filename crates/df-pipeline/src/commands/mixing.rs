//! Mixing commands: combine the whole working set into one document.

use df_core::{Error, Result};

use crate::command::{MixingOp, Outcome};
use crate::context::ActionContext;

/// Execute a mixing operation.
///
/// Unlike the per-file categories, mixing runs once per container against
/// the full working set and has no open session: it hands every input path
/// to the host's merge entry point, writes the result into the container's
/// staging directory, and narrows the working set to that single output so
/// later containers operate on the merged document.
pub(crate) fn execute(op: &MixingOp, ctx: &mut ActionContext) -> Result<Outcome> {
    match op {
        MixingOp::Merge => merge(ctx),
    }
}

fn merge(ctx: &mut ActionContext) -> Result<Outcome> {
    let dir = ctx
        .stage_dir()
        .ok_or_else(|| Error::host("merge", "no container is active"))?
        .to_path_buf();

    let inputs = ctx.input_paths().to_vec();
    let extension = inputs
        .first()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .unwrap_or("txt")
        .to_string();
    let output = dir.join(format!("merged.{extension}"));
    let count = inputs.len();

    ctx.host().merge(&inputs, &output)?;

    ctx.set_current_file(Some(output.clone()));
    ctx.replace_inputs(vec![output]);

    Ok(Outcome::ok_with(format!(
        "merged {count} documents into merged.{extension}",
    )))
}
