//! Staging workspace for pipeline runs.
//!
//! A [`Workspace`] owns the staging root a run writes under. Every container
//! gets its own directory inside it, named after the container label, so the
//! on-disk layout after a run mirrors the pipeline structure. Temporary
//! workspaces delete themselves on drop; kept and fixed-root workspaces
//! stay behind for inspection.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use df_core::{Error, Result, RunId};

/// Staging root for one pipeline run.
pub struct Workspace {
    root: PathBuf,
    run_id: RunId,
    /// Present when the workspace owns a self-deleting temp directory.
    temp: Option<TempDir>,
}

impl Workspace {
    /// Create a workspace under the system temp directory.
    ///
    /// With `keep` set, the directory is a plain `docforge-<run-id>` folder
    /// that survives the process; otherwise it is removed on drop.
    pub fn temp(run_id: RunId, keep: bool) -> Result<Self> {
        if keep {
            let root = std::env::temp_dir().join(format!("docforge-{run_id}"));
            std::fs::create_dir_all(&root).map_err(|e| Error::staging(&root, e))?;
            return Ok(Self {
                root,
                run_id,
                temp: None,
            });
        }

        let temp = tempfile::Builder::new().prefix("docforge-").tempdir()?;
        Ok(Self {
            root: temp.path().to_path_buf(),
            run_id,
            temp: Some(temp),
        })
    }

    /// Create a workspace at a caller-chosen root. The directory is created
    /// if missing and never deleted by the workspace.
    pub fn at(root: impl Into<PathBuf>, run_id: RunId) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|e| Error::staging(&root, e))?;
        Ok(Self {
            root,
            run_id,
            temp: None,
        })
    }

    /// The staging root containers live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// True when the staging root outlives this workspace.
    pub fn is_kept(&self) -> bool {
        self.temp.is_none()
    }
}

/// Copy `inputs` into `dir`, preserving file names.
///
/// Same-named inputs from different directories get a `-<n>` suffix on the
/// stem, where `n` starts at their 1-based position in the list and grows
/// until the name is free, so every staged copy keeps a distinct name.
/// Returns the staged paths in input order.
///
/// # Errors
///
/// Fails on the first copy that does not succeed.
pub fn stage_files(inputs: &[PathBuf], dir: &Path) -> Result<Vec<PathBuf>> {
    let mut taken: HashSet<OsString> = HashSet::new();
    let mut staged = Vec::with_capacity(inputs.len());

    for (index, input) in inputs.iter().enumerate() {
        let name = unique_name(input, index, &taken);
        let target = dir.join(&name);
        std::fs::copy(input, &target).map_err(|e| Error::staging(input, e))?;
        taken.insert(name);
        staged.push(target);
    }

    Ok(staged)
}

fn unique_name(input: &Path, index: usize, taken: &HashSet<OsString>) -> OsString {
    let base = match input.file_name() {
        Some(name) => OsString::from(name),
        None => OsString::from(format!("input-{}", index + 1)),
    };
    if !taken.contains(&base) {
        return base;
    }

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let ext = input.extension().and_then(|e| e.to_str());
    let mut n = index + 1;
    loop {
        let candidate = match ext {
            Some(ext) => OsString::from(format!("{stem}-{n}.{ext}")),
            None => OsString::from(format!("{stem}-{n}")),
        };
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
