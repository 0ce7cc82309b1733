//! Command manager: compiles declared actions into commands and groups them
//! into containers.

use std::path::{Path, PathBuf};

use df_core::{ActionRequest, Error, Result};

use crate::catalog::Catalog;
use crate::command::Command;
use crate::container::{CommandContainer, ContainerKind};

/// Owns the built pipeline: every command, grouped into containers in
/// declaration order.
///
/// Grouping is greedy. Consecutive per-file commands share one batch
/// container; a mixing command seals whatever container is open and takes a
/// container of its own, so the pipeline alternates between batch segments
/// and n-to-1 merge points.
#[derive(Debug)]
pub struct CommandManager {
    containers: Vec<CommandContainer>,
    stage_root: PathBuf,
}

impl CommandManager {
    /// Compile `requests` against the catalog and group the results.
    ///
    /// # Errors
    ///
    /// Fails on the first request the catalog rejects; no partial pipeline
    /// is ever returned.
    pub fn build(
        requests: &[ActionRequest],
        catalog: &Catalog,
        stage_root: &Path,
    ) -> Result<Self> {
        let mut manager = Self {
            containers: Vec::new(),
            stage_root: stage_root.to_path_buf(),
        };
        for request in requests {
            let command = catalog.build(request)?;
            manager.add(command);
        }
        Ok(manager)
    }

    /// Append one command, opening a new container when the grouping rule
    /// calls for it.
    fn add(&mut self, command: Command) {
        if command.is_mixing() {
            let mut container = self.open_container(ContainerKind::Mixing);
            container.push(command);
            self.containers.push(container);
            return;
        }

        match self.containers.last_mut() {
            Some(last) if last.kind() == ContainerKind::Batch => last.push(command),
            _ => {
                let mut container = self.open_container(ContainerKind::Batch);
                container.push(command);
                self.containers.push(container);
            }
        }
    }

    fn open_container(&self, kind: ContainerKind) -> CommandContainer {
        CommandContainer::new(self.containers.len() + 1, kind, &self.stage_root)
    }

    pub fn containers(&self) -> &[CommandContainer] {
        &self.containers
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Number of containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Total execution tasks for a run starting with `file_count` documents.
    ///
    /// Batch containers contribute one task per command per document; a
    /// mixing container contributes a single task and narrows the working
    /// set to one document for everything after it.
    pub fn total_tasks(&self, file_count: usize) -> usize {
        let mut files = file_count;
        let mut total = 0;
        for container in &self.containers {
            total += container.task_count(files);
            if container.kind() == ContainerKind::Mixing {
                files = 1;
            }
        }
        total
    }

    /// Create every container's staging directory, wiping leftovers from a
    /// previous run at the same root.
    pub fn reset_stage_dirs(&self) -> Result<()> {
        for container in &self.containers {
            let dir = container.output_dir();
            if dir.exists() {
                std::fs::remove_dir_all(dir).map_err(|e| Error::staging(dir, e))?;
            }
            std::fs::create_dir_all(dir).map_err(|e| Error::staging(dir, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> ActionRequest {
        ActionRequest::bare("select_line")
    }

    fn mixing() -> ActionRequest {
        ActionRequest::bare("merge_documents")
    }

    fn manager_for(requests: &[ActionRequest]) -> CommandManager {
        CommandManager::build(requests, &Catalog::builtin(), Path::new("/tmp/stage")).unwrap()
    }

    fn kinds(manager: &CommandManager) -> Vec<ContainerKind> {
        manager.containers().iter().map(|c| c.kind()).collect()
    }

    #[test]
    fn consecutive_batch_commands_share_a_container() {
        let manager = manager_for(&[batch(), batch(), batch()]);
        assert_eq!(kinds(&manager), [ContainerKind::Batch]);
        assert_eq!(manager.containers()[0].commands().len(), 3);
    }

    #[test]
    fn mixing_seals_the_open_container() {
        let manager = manager_for(&[batch(), mixing(), batch()]);
        assert_eq!(
            kinds(&manager),
            [
                ContainerKind::Batch,
                ContainerKind::Mixing,
                ContainerKind::Batch,
            ],
        );
    }

    #[test]
    fn back_to_back_mixing_gets_separate_containers() {
        let manager = manager_for(&[mixing(), mixing()]);
        assert_eq!(kinds(&manager), [ContainerKind::Mixing, ContainerKind::Mixing]);
    }

    #[test]
    fn interleaved_pipeline_groups_greedily() {
        let manager = manager_for(&[
            batch(),
            batch(),
            mixing(),
            batch(),
            batch(),
            mixing(),
            batch(),
        ]);
        assert_eq!(manager.len(), 5);
        assert_eq!(
            kinds(&manager),
            [
                ContainerKind::Batch,
                ContainerKind::Mixing,
                ContainerKind::Batch,
                ContainerKind::Mixing,
                ContainerKind::Batch,
            ],
        );
        let indices: Vec<usize> = manager
            .containers()
            .iter()
            .map(|c| c.sequence_index())
            .collect();
        assert_eq!(indices, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn build_fails_on_first_bad_request() {
        let requests = [batch(), ActionRequest::bare("not_an_action"), batch()];
        let err =
            CommandManager::build(&requests, &Catalog::builtin(), Path::new("/tmp/stage"))
                .unwrap_err();
        assert!(matches!(err, Error::UnknownAction { .. }));
    }

    #[test]
    fn totals_account_for_mixing_narrowing() {
        // Two batch commands over three files, one merge, one batch command
        // over the single merged file.
        let manager = manager_for(&[batch(), batch(), mixing(), batch()]);
        assert_eq!(manager.total_tasks(3), 3 * 2 + 1 + 1);
        assert_eq!(manager.total_tasks(1), 2 + 1 + 1);
    }

    #[test]
    fn totals_for_empty_working_set_count_only_mixing() {
        let manager = manager_for(&[batch(), mixing()]);
        assert_eq!(manager.total_tasks(0), 1);
    }

    #[test]
    fn reset_stage_dirs_wipes_previous_contents() {
        let root = tempfile::tempdir().unwrap();
        let requests = [batch(), mixing()];
        let manager =
            CommandManager::build(&requests, &Catalog::builtin(), root.path()).unwrap();

        manager.reset_stage_dirs().unwrap();
        let first = manager.containers()[0].output_dir().to_path_buf();
        assert!(first.is_dir());

        let leftover = first.join("stale.txt");
        std::fs::write(&leftover, "old run").unwrap();
        manager.reset_stage_dirs().unwrap();
        assert!(first.is_dir());
        assert!(!leftover.exists());
    }
}
