use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};

use hmm_update::defaults::{self, Defaults};
use hmm_update::files::{self, FileReport, SkippedFile, UpdateOptions, UpdateSummary};
use hmm_update::migrate::Warning;
use hmm_update::utils::validation;

use super::CmdResult;

#[derive(Args)]
pub struct UpdateArgs {
    /// Source files or directories to update in place
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    /// File extensions to process when walking directories (replaces configured list)
    #[arg(long, value_name = "EXT", num_args = 1..)]
    pub exts: Vec<String>,

    /// Glob pattern to skip, relative to the walked directory (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Config file to use instead of ./hmm-update.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum UpdateOutput {
    #[serde(rename = "update")]
    Update {
        paths: Vec<String>,
        dry_run: bool,
        files: Vec<FileReport>,
        warnings: Vec<Warning>,
        skipped: Vec<SkippedFile>,
        summary: UpdateSummary,
    },
}

pub fn run(args: UpdateArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<UpdateOutput> {
    validation::require_non_empty_vec(&args.paths, "paths", "At least one path is required")?;

    let defaults = resolve_defaults(&args)?;
    let options = UpdateOptions::from_defaults(defaults, args.dry_run);

    let paths: Vec<PathBuf> = args
        .paths
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .collect();

    let report = files::run_update(&paths, &options)?;

    Ok((
        UpdateOutput::Update {
            paths: paths.iter().map(|p| p.display().to_string()).collect(),
            dry_run: report.dry_run,
            files: report.files,
            warnings: report.warnings,
            skipped: report.skipped,
            summary: report.summary,
        },
        0,
    ))
}

/// Config file (explicit or ./hmm-update.json) with CLI flags layered on top.
fn resolve_defaults(args: &UpdateArgs) -> hmm_update::Result<Defaults> {
    let mut defaults = match &args.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            defaults::load_config_from_path(Path::new(expanded.as_ref()))?.defaults
        }
        None => defaults::load_config().defaults,
    };

    if !args.exts.is_empty() {
        defaults.extensions = args
            .exts
            .iter()
            .map(|ext| validation::require_non_empty(ext, "exts", "Extension must not be empty"))
            .map(|ext| ext.map(str::to_string))
            .collect::<hmm_update::Result<Vec<_>>>()?;
    }

    defaults.exclude.extend(args.exclude.iter().cloned());
    Ok(defaults)
}
