//! The action processor: drives containers to completion, one task per step.
//!
//! A task is one command execution: per file for batch containers, once per
//! container for mixing. [`ActionProcessor::process`] runs a whole pipeline;
//! [`ActionProcessor::step`] executes exactly one task and returns, so a
//! caller can interleave its own work between tasks or stop early. Both
//! paths share the same cursor, so a stepped run and a processed run do the
//! same work in the same order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use df_core::{Error, Result, RunId};
use df_host::DocumentHost;

use crate::command::{Command, Outcome};
use crate::container::ContainerKind;
use crate::context::ActionContext;
use crate::manager::CommandManager;
use crate::workspace;

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Lifecycle of one processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunState {
    /// Built but not started.
    NotStarted,
    /// Started and mid-pipeline.
    Running,
    /// Every task ran; non-fatal failures do not prevent this state.
    Completed,
    /// A fatal error or an explicit abort ended the run early.
    Aborted,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not-started"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

// ---------------------------------------------------------------------------
// Step reporting
// ---------------------------------------------------------------------------

/// Owned snapshot handed to the step callback after each task.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Label of the container the task ran in, e.g. `1-batch`.
    pub stage: String,
    /// Tasks executed so far, this one included.
    pub done_tasks: usize,
    /// Tasks the run will execute in total.
    pub total_tasks: usize,
    /// File name of the document the task touched, `-` when none.
    pub file: String,
    /// Display form of the executed command.
    pub action: String,
}

/// Invoked after every executed task.
pub type StepCallback = Box<dyn Fn(&StepReport) + Send>;

/// Invoked after each document finishes a batch container.
pub type FileCallback = Box<dyn Fn(&Path) + Send>;

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Position of the next task: container, then file within it, then command.
#[derive(Debug, Default, Clone, Copy)]
struct Cursor {
    container: usize,
    file: usize,
    command: usize,
    /// Whether the current batch container has staged its input copies.
    staged: bool,
}

impl Cursor {
    fn next_container(&mut self) {
        self.container += 1;
        self.file = 0;
        self.command = 0;
        self.staged = false;
    }
}

// ---------------------------------------------------------------------------
// RunSummary
// ---------------------------------------------------------------------------

/// Final accounting of a run, exported alongside the log.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub state: RunState,
    pub done_tasks: usize,
    pub total_tasks: usize,
    pub done_files: usize,
    pub warnings: usize,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// ActionProcessor
// ---------------------------------------------------------------------------

/// Executes a built pipeline against a document host.
pub struct ActionProcessor {
    manager: CommandManager,
    context: ActionContext,
    state: RunState,
    cursor: Cursor,
    step_callback: Option<StepCallback>,
    file_callback: Option<FileCallback>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl ActionProcessor {
    pub fn new(manager: CommandManager, host: Arc<dyn DocumentHost>) -> Self {
        Self {
            manager,
            context: ActionContext::new(host),
            state: RunState::NotStarted,
            cursor: Cursor::default(),
            step_callback: None,
            file_callback: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Report each executed task to `callback`.
    pub fn with_step_callback(mut self, callback: StepCallback) -> Self {
        self.step_callback = Some(callback);
        self
    }

    /// Report each fully processed document to `callback`.
    pub fn with_file_callback(mut self, callback: FileCallback) -> Self {
        self.file_callback = Some(callback);
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn context(&self) -> &ActionContext {
        &self.context
    }

    /// Arm the run: snapshot inputs, size the counters, reset the staging
    /// directories.
    ///
    /// A pipeline with no containers completes immediately.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyStarted`] when called on anything but a fresh
    /// processor; staging errors leave the processor unstarted.
    pub fn start(&mut self, inputs: Vec<PathBuf>) -> Result<()> {
        if self.state != RunState::NotStarted {
            return Err(Error::AlreadyStarted);
        }

        let total = self.manager.total_tasks(inputs.len());
        self.context.init(inputs, total);
        self.manager.reset_stage_dirs()?;
        self.started_at = Some(Utc::now());

        if self.manager.is_empty() {
            self.state = RunState::Completed;
            self.finished_at = self.started_at;
            tracing::info!("run completed: no commands to execute");
            return Ok(());
        }

        self.state = RunState::Running;
        tracing::info!(
            total_tasks = total,
            files = self.context.input_paths().len(),
            containers = self.manager.len(),
            "run started"
        );
        Ok(())
    }

    /// Execute exactly one task.
    ///
    /// Returns `Ok(true)` while tasks remain, `Ok(false)` once the run has
    /// completed (including the call that executed the final task). Calling
    /// on a finished run keeps returning `Ok(false)`.
    ///
    /// # Errors
    ///
    /// [`Error::NotStarted`] before [`Self::start`]. A fatal task error
    /// aborts the run, releases any open session, and is returned as-is.
    pub fn step(&mut self) -> Result<bool> {
        match self.state {
            RunState::NotStarted => return Err(Error::NotStarted),
            RunState::Completed | RunState::Aborted => return Ok(false),
            RunState::Running => {}
        }

        match self.advance() {
            Ok(()) => {
                if self.cursor.container >= self.manager.len() {
                    self.complete();
                    Ok(false)
                } else {
                    Ok(true)
                }
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Run the pipeline to completion.
    ///
    /// # Errors
    ///
    /// Same as [`Self::start`] and [`Self::step`]; the first fatal error
    /// aborts the run and is propagated unchanged.
    pub fn process(&mut self, inputs: Vec<PathBuf>) -> Result<()> {
        self.start(inputs)?;
        while self.step()? {}
        Ok(())
    }

    /// Stop a running pipeline. The open session, if any, is discarded
    /// without saving. A no-op unless the run is mid-pipeline.
    pub fn abort(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.context
            .log()
            .error("run aborted", self.context.current_file_label());
        self.context.cleanup();
        self.state = RunState::Aborted;
        self.finished_at = Some(Utc::now());
    }

    /// Final accounting for export.
    pub fn summary(&self, run_id: RunId) -> RunSummary {
        let progress = self.context.progress().snapshot();
        RunSummary {
            run_id,
            state: self.state,
            done_tasks: progress.done_tasks,
            total_tasks: progress.total_tasks,
            done_files: progress.done_files,
            warnings: self.context.log().count(crate::log::LogLevel::Warn),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    // -- Internals ----------------------------------------------------------

    /// Execute the next task and settle any bookkeeping it finishes: closing
    /// a document after its last command, moving to the next container.
    /// Containers with no work (an empty working set) are skipped outright.
    fn advance(&mut self) -> Result<()> {
        loop {
            let Some(container) = self.manager.containers().get(self.cursor.container) else {
                return Ok(());
            };

            match container.kind() {
                ContainerKind::Mixing => {
                    let Some(command) = container.commands().first() else {
                        self.cursor.next_container();
                        continue;
                    };
                    self.context.enter_container(container.output_dir());
                    let label = container.label();

                    let outcome = command.execute(&mut self.context)?;
                    self.record_outcome(command, &outcome);
                    self.report_step(&label, command);

                    self.cursor.next_container();
                    return Ok(());
                }
                ContainerKind::Batch => {
                    if self.context.input_paths().is_empty() {
                        self.cursor.next_container();
                        continue;
                    }
                    if !self.cursor.staged {
                        self.context.enter_container(container.output_dir());
                        let staged = workspace::stage_files(
                            self.context.input_paths(),
                            container.output_dir(),
                        )?;
                        self.context.replace_inputs(staged);
                        self.cursor.staged = true;
                    }

                    let commands = container.commands();
                    if commands.is_empty() {
                        self.cursor.next_container();
                        continue;
                    }

                    if !self.context.has_open_session() {
                        let path = self.context.input_paths()[self.cursor.file].clone();
                        self.context.open_session(&path)?;
                    }

                    let command = &commands[self.cursor.command];
                    let label = container.label();

                    let outcome = command.execute(&mut self.context)?;
                    self.record_outcome(command, &outcome);
                    self.report_step(&label, command);

                    self.cursor.command += 1;
                    if self.cursor.command >= commands.len() {
                        self.context.close_session(true)?;
                        self.context.progress().file_done();
                        self.notify_file_done();
                        self.cursor.file += 1;
                        self.cursor.command = 0;
                        if self.cursor.file >= self.context.input_paths().len() {
                            self.cursor.next_container();
                        }
                    }
                    return Ok(());
                }
            }
        }
    }

    /// Write the task's outcome to the run log: info for success, warn for a
    /// non-fatal failure.
    fn record_outcome(&self, command: &Command, outcome: &Outcome) {
        let file = self.context.current_file_label();
        let message = match &outcome.message {
            Some(detail) => format!("{}: {detail}", command.describe()),
            None if outcome.succeeded => format!("{}: done", command.describe()),
            None => format!("{} failed", command.describe()),
        };
        if outcome.succeeded {
            self.context.log().info(message, file);
        } else {
            self.context.log().warn(message, file);
        }
    }

    /// Count the task and hand the step callback an owned snapshot.
    fn report_step(&self, stage: &str, command: &Command) {
        let snapshot = self.context.progress().task_done();
        if let Some(callback) = &self.step_callback {
            callback(&StepReport {
                stage: stage.to_string(),
                done_tasks: snapshot.done_tasks,
                total_tasks: snapshot.total_tasks,
                file: self.context.current_file_name(),
                action: command.describe(),
            });
        }
    }

    fn notify_file_done(&self) {
        if let Some(callback) = &self.file_callback {
            if let Some(path) = self.context.current_file() {
                callback(path);
            }
        }
    }

    fn complete(&mut self) {
        self.state = RunState::Completed;
        self.finished_at = Some(Utc::now());
        let progress = self.context.progress().snapshot();
        tracing::info!(
            done_tasks = progress.done_tasks,
            done_files = progress.done_files,
            "run completed"
        );
    }

    /// Abort on a fatal error: record it, release the session, freeze the
    /// counters where they stand.
    fn fail(&mut self, error: &Error) {
        self.context.log().error(
            format!("run aborted: {error}"),
            self.context.current_file_label(),
        );
        self.context.cleanup();
        self.state = RunState::Aborted;
        self.finished_at = Some(Utc::now());
    }
}
