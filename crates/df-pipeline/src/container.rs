//! Command containers: ordered groups of commands sharing one staging
//! directory.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::Command;

/// What a container holds, which decides how the processor drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// Per-file commands, applied to every document in the working set.
    Batch,
    /// A single n-to-1 command run once against the whole working set.
    Mixing,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Batch => write!(f, "batch"),
            Self::Mixing => write!(f, "mixing"),
        }
    }
}

/// One pipeline segment: a run of commands plus the staging directory their
/// document copies live in.
///
/// Containers are numbered from 1 in build order; the number and kind form
/// the staging directory name (`1-batch`, `2-mixing`, ...), so a staging
/// root read after a run reproduces the pipeline structure on disk.
#[derive(Debug)]
pub struct CommandContainer {
    sequence_index: usize,
    kind: ContainerKind,
    output_dir: PathBuf,
    commands: Vec<Command>,
}

impl CommandContainer {
    pub(crate) fn new(sequence_index: usize, kind: ContainerKind, stage_root: &Path) -> Self {
        let label = format!("{sequence_index}-{kind}");
        Self {
            sequence_index,
            kind,
            output_dir: stage_root.join(label),
            commands: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// 1-based position in the pipeline.
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Directory this container stages and writes documents in.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Directory name, e.g. `3-mixing`. Doubles as the stage label in logs
    /// and progress reports.
    pub fn label(&self) -> String {
        format!("{}-{}", self.sequence_index, self.kind)
    }

    /// How many execution tasks this container contributes for a working
    /// set of `file_count` documents.
    pub fn task_count(&self, file_count: usize) -> usize {
        match self.kind {
            ContainerKind::Batch => self.commands.len() * file_count,
            ContainerKind::Mixing => 1,
        }
    }
}
