//! Implementations of the docforge CLI commands.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use df_core::{ActionRequest, Config, RunId};
use df_host::TextHost;
use df_pipeline::{ActionProcessor, Catalog, CommandManager, Workspace};

/// Config locations probed when `--config` is not given, in order.
const CONFIG_CANDIDATES: &[&str] = &["./docforge.toml", "~/.config/docforge/config.toml"];

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub inputs: Vec<PathBuf>,
    pub scenario: Option<String>,
    pub actions: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub keep_staging: bool,
    pub dry_run: bool,
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

pub fn run(args: RunArgs) -> Result<()> {
    let config = find_config(args.config.as_deref())?;

    let requests = load_requests(&args, &config)?;
    if requests.is_empty() {
        bail!("the action list is empty; nothing to run");
    }

    let files = resolve_inputs(&args.inputs, &config.input.extensions)?;
    if files.is_empty() {
        bail!("no input documents found");
    }

    let run_id = RunId::new();
    let keep = args.keep_staging || config.staging.keep;
    let workspace = match &config.staging.root {
        Some(root) => Workspace::at(root.clone(), run_id)?,
        None => Workspace::temp(run_id, keep)?,
    };

    let manager = CommandManager::build(&requests, &Catalog::builtin(), workspace.root())
        .context("invalid action list")?;

    if args.dry_run {
        print_plan(&manager, files.len());
        return Ok(());
    }

    println!(
        "Run {run_id}: {} task(s) over {} document(s)",
        manager.total_tasks(files.len()),
        files.len(),
    );

    let mut processor = ActionProcessor::new(manager, Arc::new(TextHost::new()))
        .with_step_callback(Box::new(|report| {
            println!(
                "[{}/{}] {} {}: {}",
                report.done_tasks, report.total_tasks, report.stage, report.file, report.action,
            );
        }));

    let result = processor.process(files);
    let summary = processor.summary(run_id);

    let out_dir = args.output.unwrap_or_else(|| config.output.dir.clone());
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    if config.output.export_log {
        let log_path = out_dir.join("run-log.json");
        let payload = serde_json::json!({
            "summary": summary,
            "records": processor.context().log().records(),
        });
        std::fs::write(&log_path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("cannot write {}", log_path.display()))?;
    }

    if workspace.is_kept() {
        println!("Staging kept at {}", workspace.root().display());
    }

    match result {
        Ok(()) => {
            let outputs = processor.context().input_paths().to_vec();
            let exported = df_pipeline::stage_files(&outputs, &out_dir)?;
            println!(
                "Exported {} document(s) to {}",
                exported.len(),
                out_dir.display(),
            );
            println!(
                "Run completed: {}/{} task(s), {} warning(s)",
                summary.done_tasks, summary.total_tasks, summary.warnings,
            );
            Ok(())
        }
        Err(error) => Err(error).with_context(|| format!("run {run_id} aborted")),
    }
}

fn load_requests(args: &RunArgs, config: &Config) -> Result<Vec<ActionRequest>> {
    if let Some(name) = &args.scenario {
        let scenario = config
            .scenario(name)
            .with_context(|| format!("scenario '{name}' not found in config"))?;
        return Ok(scenario.actions.clone());
    }
    if let Some(path) = &args.actions {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read action list {}", path.display()))?;
        let requests: Vec<ActionRequest> = serde_json::from_str(&text)
            .with_context(|| format!("invalid action list {}", path.display()))?;
        return Ok(requests);
    }
    bail!("nothing to run: pass --scenario <name> or --actions <file.json>");
}

/// Expand the mixed file/directory arguments into a flat, deduplicated
/// document list. Directories are scanned recursively and filtered by the
/// configured extensions; files named explicitly are taken as-is.
fn resolve_inputs(inputs: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut resolved = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("cannot scan {}", input.display()))?;
                if entry.file_type().is_file()
                    && has_extension(entry.path(), extensions)
                    && seen.insert(entry.path().to_path_buf())
                {
                    resolved.push(entry.into_path());
                }
            }
        } else if input.is_file() {
            if seen.insert(input.clone()) {
                resolved.push(input.clone());
            }
        } else {
            bail!("input does not exist: {}", input.display());
        }
    }

    Ok(resolved)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

fn find_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path).with_context(|| format!("config {}", path.display()));
    }
    for candidate in CONFIG_CANDIDATES {
        let expanded = shellexpand::tilde(candidate);
        let path = Path::new(expanded.as_ref());
        if path.exists() {
            return Config::load(path).with_context(|| format!("config {}", path.display()));
        }
    }
    Ok(Config::default())
}

fn print_plan(manager: &CommandManager, file_count: usize) {
    println!(
        "Pipeline: {} container(s), {} task(s) over {} document(s)",
        manager.len(),
        manager.total_tasks(file_count),
        file_count,
    );
    for container in manager.containers() {
        println!(
            "  {}: {} command(s)",
            container.label(),
            container.commands().len(),
        );
        for (i, command) in container.commands().iter().enumerate() {
            println!("    {}. {}", i + 1, command.describe());
        }
    }
    println!("[DRY RUN] No documents were touched");
}

// ---------------------------------------------------------------------------
// actions
// ---------------------------------------------------------------------------

pub fn list_actions(json: bool) -> Result<()> {
    let catalog = Catalog::builtin();

    if json {
        let entries: Vec<_> = catalog
            .specs()
            .iter()
            .map(|spec| {
                serde_json::json!({
                    "id": spec.id,
                    "name": spec.display_name,
                    "category": spec.category,
                    "content": spec.content.to_string(),
                    "description": spec.description,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for spec in catalog.specs() {
        println!(
            "{:<22} {:<8} {:<36} {}",
            spec.id,
            spec.category,
            format!("content: {}", spec.content),
            spec.description,
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn validate(config_path: Option<PathBuf>) -> Result<()> {
    let path = match config_path {
        Some(path) => Some(path),
        None => CONFIG_CANDIDATES.iter().find_map(|candidate| {
            let expanded = shellexpand::tilde(candidate);
            let path = PathBuf::from(expanded.as_ref());
            path.exists().then_some(path)
        }),
    };

    let Some(path) = path else {
        println!("No config file found; defaults are valid");
        return Ok(());
    };

    println!("Validating {}", path.display());
    let config = Config::load(&path)?;

    let warnings = config.validate();
    for warning in &warnings {
        println!("  warning: {warning}");
    }

    let catalog = Catalog::builtin();
    let mut errors = Vec::new();
    for scenario in &config.scenarios {
        for request in &scenario.actions {
            if let Err(e) = catalog.build(request) {
                errors.push(format!("scenario '{}': {e}", scenario.name));
            }
        }
    }

    if !errors.is_empty() {
        for error in &errors {
            println!("  error: {error}");
        }
        bail!("{} error(s) found", errors.len());
    }

    println!("Configuration is valid");
    println!("  Scenarios: {}", config.scenarios.len());
    println!("  Input extensions: {}", config.input.extensions.join(", "));
    println!("  Output dir: {}", config.output.dir.display());
    if !warnings.is_empty() {
        println!("  Warnings: {}", warnings.len());
    }
    Ok(())
}
