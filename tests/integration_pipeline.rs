//! Pipeline integration tests
//!
//! End-to-end runs of the action pipeline over real files on disk, driven
//! the same way the CLI drives it: build a manager from declared actions,
//! hand it to a processor with a text host, and check what lands where.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::tempdir;

use df_core::{ActionRequest, Config, RunId};
use df_host::TextHost;
use df_pipeline::{ActionProcessor, Catalog, CommandManager, LogLevel, RunState, Workspace};

fn write_doc(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn processor_over(requests: &[ActionRequest], stage_root: &Path) -> ActionProcessor {
    let manager = CommandManager::build(requests, &Catalog::builtin(), stage_root).unwrap();
    ActionProcessor::new(manager, Arc::new(TextHost::new()))
}

#[test]
fn batch_edit_runs_over_every_document() {
    let docs = tempdir().unwrap();
    let a = write_doc(docs.path(), "a.txt", "Lorem OLD ipsum");
    let b = write_doc(docs.path(), "b.txt", "OLD at the start");
    let stage = tempdir().unwrap();

    let requests = vec![
        ActionRequest::new("search_and_select", "OLD"),
        ActionRequest::new("replace_text", "NEW"),
    ];
    let mut processor = processor_over(&requests, stage.path());
    processor.process(vec![a.clone(), b.clone()]).unwrap();

    assert_eq!(processor.state(), RunState::Completed);

    // Each command logged one info record per document, nothing else.
    let log = processor.context().log();
    assert_eq!(log.count(LogLevel::Info), 4);
    assert_eq!(log.count(LogLevel::Warn), 0);
    assert_eq!(log.count(LogLevel::Error), 0);

    let records = log.records();
    assert_eq!(records[0].file.as_deref(), Some("a.txt"));
    assert!(records[0].message.starts_with("Search and Select(OLD)"));
    assert_eq!(records[3].file.as_deref(), Some("b.txt"));
    assert!(records[3].message.starts_with("Replace Text(NEW)"));

    // Edits land in the staged copies; the originals stay as they were.
    assert_eq!(
        fs::read_to_string(stage.path().join("1-batch/a.txt")).unwrap(),
        "Lorem NEW ipsum",
    );
    assert_eq!(
        fs::read_to_string(stage.path().join("1-batch/b.txt")).unwrap(),
        "NEW at the start",
    );
    assert_eq!(fs::read_to_string(&a).unwrap(), "Lorem OLD ipsum");
    assert_eq!(fs::read_to_string(&b).unwrap(), "OLD at the start");
}

#[test]
fn missed_search_warns_and_the_rest_still_runs() {
    let docs = tempdir().unwrap();
    let doc = write_doc(docs.path(), "doc.txt", "alpha beta");
    let stage = tempdir().unwrap();

    // The first two commands fail without consequence: the search finds
    // nothing, so the replace has no selection. The pair after them still
    // rewrites the line.
    let requests = vec![
        ActionRequest::new("search_and_select", "missing"),
        ActionRequest::new("replace_text", "x"),
        ActionRequest::bare("select_line"),
        ActionRequest::new("replace_text", "gamma line"),
    ];
    let mut processor = processor_over(&requests, stage.path());
    processor.process(vec![doc]).unwrap();

    assert_eq!(processor.state(), RunState::Completed);

    let log = processor.context().log();
    assert_eq!(log.count(LogLevel::Warn), 2);
    assert_eq!(log.count(LogLevel::Info), 2);
    assert_eq!(log.count(LogLevel::Error), 0);

    assert_eq!(
        fs::read_to_string(stage.path().join("1-batch/doc.txt")).unwrap(),
        "gamma line",
    );
}

#[test]
fn merge_pipeline_narrows_to_one_artifact() {
    let docs = tempdir().unwrap();
    let one = write_doc(docs.path(), "one.txt", "first document");
    let two = write_doc(docs.path(), "two.txt", "second document");
    let three = write_doc(docs.path(), "three.txt", "third document");
    let stage = tempdir().unwrap();

    let requests = vec![
        ActionRequest::bare("goto_document_end"),
        ActionRequest::new("insert_text", " END"),
        ActionRequest::bare("merge_documents"),
        ActionRequest::new("search_and_select", "END"),
        ActionRequest::new("replace_text", "DONE"),
    ];
    let mut processor = processor_over(&requests, stage.path());
    processor.process(vec![one, two, three]).unwrap();

    assert_eq!(processor.state(), RunState::Completed);

    // 2 commands x 3 files, then the merge, then 2 commands on the merged
    // document.
    let progress = processor.context().progress().snapshot();
    assert_eq!(progress.total_tasks, 9);
    assert_eq!(progress.done_tasks, 9);
    assert_eq!(progress.done_files, 4);

    // The merge concatenated the already-edited copies.
    let merged = fs::read_to_string(stage.path().join("2-mixing/merged.txt")).unwrap();
    assert!(merged.contains("first document END"));
    assert!(merged.contains("second document END"));
    assert!(merged.contains("third document END"));

    // The batch after the merge edited only the first match.
    let final_text = fs::read_to_string(stage.path().join("3-batch/merged.txt")).unwrap();
    assert!(final_text.contains("first document DONE"));
    assert!(final_text.contains("second document END"));

    assert_eq!(
        processor.context().input_paths(),
        &[stage.path().join("3-batch/merged.txt")],
    );
}

#[test]
fn stage_root_mirrors_the_container_sequence() {
    let docs = tempdir().unwrap();
    let doc = write_doc(docs.path(), "doc.txt", "text");
    let stage = tempdir().unwrap();

    let requests = vec![
        ActionRequest::bare("select_document"),
        ActionRequest::bare("merge_documents"),
        ActionRequest::bare("goto_document_start"),
    ];
    let mut processor = processor_over(&requests, stage.path());
    processor.process(vec![doc]).unwrap();

    let mut entries: Vec<String> = fs::read_dir(stage.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, ["1-batch", "2-mixing", "3-batch"]);
}

#[test]
fn config_scenario_drives_a_full_run() {
    let docs = tempdir().unwrap();
    let doc = write_doc(docs.path(), "notes.txt", "draft draft draft");

    let config = Config::from_toml(
        r#"
[[scenario]]
name = "finalize"
description = "Mark the notes as final"

[[scenario.action]]
id = "search_and_select"
content = "draft"

[[scenario.action]]
id = "replace_text"
content = "final"
"#,
    )
    .unwrap();

    let scenario = config.scenario("finalize").unwrap();
    let run_id = RunId::new();
    let workspace = Workspace::temp(run_id, false).unwrap();

    let manager =
        CommandManager::build(&scenario.actions, &Catalog::builtin(), workspace.root()).unwrap();
    let mut processor = ActionProcessor::new(manager, Arc::new(TextHost::new()));
    processor.process(vec![doc]).unwrap();

    assert_eq!(processor.state(), RunState::Completed);
    let staged = workspace.root().join("1-batch/notes.txt");
    assert_eq!(
        fs::read_to_string(staged).unwrap(),
        "final draft draft",
    );

    let summary = processor.summary(run_id);
    assert_eq!(summary.run_id, run_id);
    assert_eq!(summary.done_tasks, 2);
    assert_eq!(summary.warnings, 0);
}
