//! Shared execution context.
//!
//! [`ActionContext`] carries everything a running pipeline mutates: the
//! working set of document paths, the single open host session, and the
//! shared progress counters and run log. The engine itself is single
//! threaded; only the counters and the log are built to be read from other
//! threads, so a progress display can watch a run without touching it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use df_core::{Error, Result};
use df_host::{DocumentHost, DocumentSession};

use crate::log::RunLog;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Point-in-time view of the run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Tasks executed so far.
    pub done_tasks: usize,
    /// Tasks the run will execute in total.
    pub total_tasks: usize,
    /// Documents fully processed so far.
    pub done_files: usize,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    done_tasks: usize,
    total_tasks: usize,
    done_files: usize,
}

/// Lock-guarded run counters, shareable across threads.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    inner: RwLock<Counters>,
}

impl ProgressTracker {
    /// Zero the counters for a fresh run with `total_tasks` tasks ahead.
    pub fn reset(&self, total_tasks: usize) {
        *self.inner.write() = Counters {
            total_tasks,
            ..Counters::default()
        };
    }

    /// Count one executed task and return the counters as of that moment.
    pub fn task_done(&self) -> ProgressSnapshot {
        let mut inner = self.inner.write();
        inner.done_tasks += 1;
        ProgressSnapshot {
            done_tasks: inner.done_tasks,
            total_tasks: inner.total_tasks,
            done_files: inner.done_files,
        }
    }

    /// Count one fully processed document.
    pub fn file_done(&self) {
        self.inner.write().done_files += 1;
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.inner.read();
        ProgressSnapshot {
            done_tasks: inner.done_tasks,
            total_tasks: inner.total_tasks,
            done_files: inner.done_files,
        }
    }
}

// ---------------------------------------------------------------------------
// ActionContext
// ---------------------------------------------------------------------------

/// Mutable state threaded through every command execution.
pub struct ActionContext {
    host: Arc<dyn DocumentHost>,
    /// The inputs the run started with. Never changes after [`Self::init`].
    init_input_paths: Vec<PathBuf>,
    /// The current working set; mixing commands replace it wholesale.
    input_paths: Vec<PathBuf>,
    current_file: Option<PathBuf>,
    stage_dir: Option<PathBuf>,
    session: Option<Box<dyn DocumentSession>>,
    progress: Arc<ProgressTracker>,
    log: Arc<RunLog>,
}

impl ActionContext {
    pub fn new(host: Arc<dyn DocumentHost>) -> Self {
        Self {
            host,
            init_input_paths: Vec::new(),
            input_paths: Vec::new(),
            current_file: None,
            stage_dir: None,
            session: None,
            progress: Arc::new(ProgressTracker::default()),
            log: Arc::new(RunLog::new()),
        }
    }

    /// Arm the context for a run: snapshot the inputs and zero the counters.
    pub fn init(&mut self, inputs: Vec<PathBuf>, total_tasks: usize) {
        self.init_input_paths = inputs.clone();
        self.input_paths = inputs;
        self.current_file = None;
        self.stage_dir = None;
        self.progress.reset(total_tasks);
    }

    pub fn host(&self) -> &dyn DocumentHost {
        self.host.as_ref()
    }

    /// The untouched inputs the run was started with.
    pub fn init_input_paths(&self) -> &[PathBuf] {
        &self.init_input_paths
    }

    /// The documents commands currently operate on.
    pub fn input_paths(&self) -> &[PathBuf] {
        &self.input_paths
    }

    /// Swap the working set, as a mixing command does after merging.
    pub fn replace_inputs(&mut self, inputs: Vec<PathBuf>) {
        self.input_paths = inputs;
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
    }

    /// File name of the current document, for log records.
    pub fn current_file_label(&self) -> Option<String> {
        self.current_file
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// File name of the current document with a `-` placeholder, for
    /// progress lines that always want something to print.
    pub fn current_file_name(&self) -> String {
        self.current_file_label().unwrap_or_else(|| "-".to_string())
    }

    /// Point the context at the container directory now being executed.
    pub fn enter_container(&mut self, dir: &Path) {
        self.stage_dir = Some(dir.to_path_buf());
    }

    /// Staging directory of the container currently executing.
    pub fn stage_dir(&self) -> Option<&Path> {
        self.stage_dir.as_deref()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Shareable handle to the counters, for an observer thread.
    pub fn progress_handle(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    /// Shareable handle to the run log.
    pub fn log_handle(&self) -> Arc<RunLog> {
        Arc::clone(&self.log)
    }

    // -- Session lifecycle --------------------------------------------------

    /// Open a host session on `path` and make it the current document.
    ///
    /// # Errors
    ///
    /// Fails if a session is already open; the engine processes one
    /// document at a time.
    pub fn open_session(&mut self, path: &Path) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::host("open", "a document session is already open"));
        }
        let session = self.host.open(path)?;
        self.session = Some(session);
        self.current_file = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "opened document session");
        Ok(())
    }

    pub fn has_open_session(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, or an error when no document is open.
    pub fn session_mut(&mut self) -> Result<&mut (dyn DocumentSession + 'static)> {
        self.session
            .as_deref_mut()
            .ok_or_else(|| Error::host("session", "no open document"))
    }

    /// Close the open session, optionally saving first. A no-op when no
    /// session is open.
    pub fn close_session(&mut self, save: bool) -> Result<()> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        if save {
            session.save()?;
        }
        session.close()
    }

    /// Drop whatever session is open without saving. Used on abort, safe to
    /// call any number of times.
    pub fn cleanup(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("discarded open document session");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use df_host::TextHost;

    use super::*;

    fn write_doc(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        path
    }

    fn fresh_context() -> ActionContext {
        ActionContext::new(Arc::new(TextHost::new()))
    }

    #[test]
    fn progress_counts_tasks_and_files() {
        let tracker = ProgressTracker::default();
        tracker.reset(3);

        let first = tracker.task_done();
        assert_eq!(first.done_tasks, 1);
        assert_eq!(first.total_tasks, 3);
        assert_eq!(first.done_files, 0);

        tracker.file_done();
        tracker.task_done();
        let now = tracker.snapshot();
        assert_eq!(now.done_tasks, 2);
        assert_eq!(now.done_files, 1);

        tracker.reset(5);
        assert_eq!(tracker.snapshot().done_tasks, 0);
        assert_eq!(tracker.snapshot().total_tasks, 5);
    }

    #[test]
    fn init_snapshots_the_original_inputs() {
        let mut ctx = fresh_context();
        ctx.init(vec![PathBuf::from("/a.txt"), PathBuf::from("/b.txt")], 4);

        ctx.replace_inputs(vec![PathBuf::from("/merged.txt")]);
        assert_eq!(ctx.input_paths().len(), 1);
        assert_eq!(ctx.init_input_paths().len(), 2);
        assert_eq!(ctx.init_input_paths()[0], PathBuf::from("/a.txt"));
    }

    #[test]
    fn double_open_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "doc.txt", "text");

        let mut ctx = fresh_context();
        ctx.open_session(&path).unwrap();
        assert!(ctx.has_open_session());
        assert!(ctx.open_session(&path).is_err());
    }

    #[test]
    fn session_access_without_open_fails() {
        let mut ctx = fresh_context();
        assert!(ctx.session_mut().is_err());
        assert!(!ctx.has_open_session());
    }

    #[test]
    fn session_mut_hands_out_a_reusable_edit_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "doc.txt", "abc");

        let mut ctx = fresh_context();
        ctx.open_session(&path).unwrap();

        let session = ctx.session_mut().unwrap();
        session.insert_text("one ").unwrap();
        session.insert_text("two ").unwrap();
        ctx.close_session(true).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one two abc");
    }

    #[test]
    fn close_with_save_writes_edits_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "doc.txt", "abc");

        let mut ctx = fresh_context();
        ctx.open_session(&path).unwrap();
        ctx.session_mut().unwrap().insert_text("x").unwrap();
        ctx.close_session(true).unwrap();

        assert!(!ctx.has_open_session());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "xabc");
    }

    #[test]
    fn cleanup_discards_edits_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "doc.txt", "abc");

        let mut ctx = fresh_context();
        ctx.open_session(&path).unwrap();
        ctx.session_mut().unwrap().insert_text("x").unwrap();
        ctx.cleanup();
        ctx.cleanup();

        assert!(!ctx.has_open_session());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc");
    }

    #[test]
    fn close_without_open_session_is_a_no_op() {
        let mut ctx = fresh_context();
        ctx.close_session(true).unwrap();
    }

    #[test]
    fn current_file_name_falls_back() {
        let mut ctx = fresh_context();
        assert_eq!(ctx.current_file_name(), "-");
        assert!(ctx.current_file_label().is_none());

        ctx.set_current_file(Some(PathBuf::from("/stage/1-batch/report.txt")));
        assert_eq!(ctx.current_file_name(), "report.txt");
        assert_eq!(ctx.current_file_label().as_deref(), Some("report.txt"));
    }
}
