//! File driver: feeds source files through the line rewriter and writes
//! them back.
//!
//! 1. Expand each path argument into target files (walk directories, filter by
//!    extension and exclude globs, refuse protected files)
//! 2. Rewrite every line of each file in order
//! 3. Write changed files back atomically (unless dry-run)
//!
//! Files that are not valid UTF-8 are skipped without a warning and are not
//! counted as touched.

use glob_match::glob_match;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::migrate::{rewrite_line, Diagnostics, RunSummary, Warning};
use crate::utils::io::{self, TextContent};
use crate::utils::parser;

// ============================================================================
// Types
// ============================================================================

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub extensions: Vec<String>,
    pub protected_files: Vec<String>,
    pub exclude: Vec<String>,
    pub skip_dirs: Vec<String>,
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

impl UpdateOptions {
    pub fn from_defaults(defaults: Defaults, dry_run: bool) -> Self {
        Self {
            extensions: defaults.extensions,
            protected_files: defaults.protected_files,
            exclude: defaults.exclude,
            skip_dirs: defaults.skip_dirs,
            dry_run,
        }
    }

    fn is_protected(&self, path: &Path) -> Option<&str> {
        let name = path.file_name()?.to_str()?;
        self.protected_files
            .iter()
            .find(|protected| protected.as_str() == name)
            .map(|p| p.as_str())
    }

    fn has_extension(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|pattern| glob_match(pattern, relative))
    }
}

/// The rewritten text of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRewrite {
    pub text: String,
    pub changed_lines: usize,
    pub warnings: Vec<Warning>,
}

/// Per-file entry in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub changed_lines: usize,
    pub warnings: usize,
    /// Whether new content was written to disk.
    pub written: bool,
}

/// A file left untouched because it could not be decoded.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Outcome of processing a single file.
#[derive(Debug)]
pub enum FileOutcome {
    Updated {
        report: FileReport,
        diagnostics: Diagnostics,
    },
    Skipped(SkippedFile),
}

/// The full result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub files: Vec<FileReport>,
    pub warnings: Vec<Warning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFile>,
    pub summary: UpdateSummary,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub files_touched: usize,
    pub files_changed: usize,
    pub warnings_emitted: usize,
}

impl UpdateSummary {
    fn new(run: RunSummary, files_changed: usize) -> Self {
        Self {
            files_touched: run.files_touched,
            files_changed,
            warnings_emitted: run.warnings_emitted,
        }
    }
}

// ============================================================================
// Rewriting
// ============================================================================

/// Rewrite file content line by line, preserving every line ending.
pub fn rewrite_content(content: &str) -> ContentRewrite {
    let mut text = String::with_capacity(content.len());
    let mut changed_lines = 0;
    let mut warnings = Vec::new();

    for (index, line) in parser::split_lines_inclusive(content).into_iter().enumerate() {
        let rewrite = rewrite_line(line, index + 1);
        if rewrite.changed(line) {
            changed_lines += 1;
        }
        warnings.extend(rewrite.warnings);
        text.push_str(&rewrite.text);
    }

    ContentRewrite {
        text,
        changed_lines,
        warnings,
    }
}

/// Process one file. Warnings are tagged with `display` as their file.
pub fn update_file(path: &Path, display: &str, options: &UpdateOptions) -> Result<FileOutcome> {
    let content = match io::read_text_file(path, &format!("read {}", display))? {
        TextContent::Text(text) => text,
        TextContent::Undecodable(reason) => {
            log_status!("skip", "{}: {}", display, reason);
            return Ok(FileOutcome::Skipped(SkippedFile {
                file: display.to_string(),
                reason,
            }));
        }
    };

    log_status!("update", "Updating: {}", display);

    let rewrite = rewrite_content(&content);
    let mut diagnostics = Diagnostics::new();
    diagnostics.record_file();
    for warning in rewrite.warnings {
        let warning = warning.in_file(display);
        log_status!("warning", "{}", warning.render());
        diagnostics.record_warning(warning);
    }

    let changed = rewrite.text != content;
    let written = changed && !options.dry_run;
    if written {
        io::write_file_atomic(path, &rewrite.text, &format!("write {}", display))?;
    }

    Ok(FileOutcome::Updated {
        report: FileReport {
            file: display.to_string(),
            changed_lines: rewrite.changed_lines,
            warnings: diagnostics.warnings_emitted(),
            written,
        },
        diagnostics,
    })
}

// ============================================================================
// Target collection
// ============================================================================

/// Expand a path argument into the files to process. Protected files found
/// along the way are recorded as warnings and left out.
pub fn collect_targets(
    path: &Path,
    options: &UpdateOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(name) = options.is_protected(path) {
            protect(path.display().to_string(), name, diagnostics);
            return Ok(Vec::new());
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        return Err(Error::path_not_found(path.display().to_string()));
    }

    let mut files = Vec::new();
    walk_recursive(path, path, options, diagnostics, &mut files);
    Ok(files)
}

fn protect(display: String, name: &str, diagnostics: &mut Diagnostics) {
    let warning = Warning::protected_file(display, name);
    log_status!("warning", "{}", warning.render());
    diagnostics.record_warning(warning);
}

fn walk_recursive(
    dir: &Path,
    root: &Path,
    options: &UpdateOptions,
    diagnostics: &mut Diagnostics,
    files: &mut Vec<PathBuf>,
) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    // Symlinked directories are not descended into; symlinked files are.
    let mut paths: Vec<(PathBuf, bool)> = entries
        .flatten()
        .map(|entry| {
            let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
            (entry.path(), is_symlink)
        })
        .collect();
    paths.sort();

    for (path, is_symlink) in paths {
        let relative = parser::relative_slash_path(&path, root);

        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if is_symlink || options.skip_dirs.contains(&name) || options.is_excluded(&relative) {
                continue;
            }
            walk_recursive(&path, root, options, diagnostics, files);
        } else if !path.is_file() {
            continue;
        } else if let Some(name) = options.is_protected(&path) {
            protect(path.display().to_string(), name, diagnostics);
        } else if options.has_extension(&path) && !options.is_excluded(&relative) {
            files.push(path);
        }
    }
}

// ============================================================================
// Run
// ============================================================================

/// Update every file reachable from `paths`, folding per-file diagnostics into
/// one run total.
pub fn run_update(paths: &[PathBuf], options: &UpdateOptions) -> Result<UpdateReport> {
    let mut run = Diagnostics::new();
    let mut files = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let targets = collect_targets(path, options, &mut run)?;

        for target in targets {
            let display = target.display().to_string();
            match update_file(&target, &display, options)? {
                FileOutcome::Updated {
                    report,
                    diagnostics,
                } => {
                    run.absorb(diagnostics);
                    files.push(report);
                }
                FileOutcome::Skipped(skip) => skipped.push(skip),
            }
        }
    }

    let files_changed = files.iter().filter(|f| f.changed_lines > 0).count();
    let summary = UpdateSummary::new(run.summary(), files_changed);

    log_status!(
        "update",
        "Updated {} files with {} warnings.",
        summary.files_touched,
        summary.warnings_emitted
    );

    Ok(UpdateReport {
        files,
        warnings: run.into_warnings(),
        skipped,
        summary,
        dry_run: options.dry_run,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::WarningKind;
    use std::fs;

    fn options() -> UpdateOptions {
        UpdateOptions::from_defaults(Defaults::default(), false)
    }

    #[test]
    fn rewrite_content_preserves_line_endings() {
        let content = "hmm_vec3 a;\r\nHMM_Vec3i(1, 2, 3);\nint x;\r";
        let rewrite = rewrite_content(content);
        assert_eq!(rewrite.text, "HMM_Vec3 a;\r\nHMM_V3(1, 2, 3);\nint x;\r");
        assert_eq!(rewrite.changed_lines, 2);
    }

    #[test]
    fn rewrite_content_numbers_warnings_by_line() {
        let content = "int a;\nint b;\nm = HMM_Rotate(Angle(), axis);\n";
        let rewrite = rewrite_content(content);
        assert_eq!(rewrite.warnings.len(), 1);
        assert_eq!(rewrite.warnings[0].line, Some(3));
    }

    #[test]
    fn update_file_writes_rewritten_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camera.c");
        fs::write(&path, "hmm_mat4 p = HMM_Perspective(60.0f, aspect, 0.1f, 100.0f);\n").unwrap();

        let outcome = update_file(&path, "camera.c", &options()).unwrap();
        let FileOutcome::Updated { report, diagnostics } = outcome else {
            panic!("expected camera.c to be updated");
        };

        assert!(report.written);
        assert_eq!(report.changed_lines, 1);
        assert_eq!(diagnostics.files_touched(), 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "HMM_Mat4 p = HMM_Perspective_RH_NO(HMM_AngleDeg(60.0f), aspect, 0.1f, 100.0f);\n"
        );
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("math.h");
        fs::write(&path, "hmm_vec2 v;\n").unwrap();

        let dry = UpdateOptions::from_defaults(Defaults::default(), true);
        let outcome = update_file(&path, "math.h", &dry).unwrap();
        let FileOutcome::Updated { report, .. } = outcome else {
            panic!("expected math.h to be processed");
        };

        assert!(!report.written);
        assert_eq!(report.changed_lines, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hmm_vec2 v;\n");
    }

    #[test]
    fn undecodable_file_is_skipped_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.c");
        let bytes = [b'h', b'm', b'm', b'_', b'v', b'e', b'c', b'3', 0xff, b'\n'];
        fs::write(&path, bytes).unwrap();

        let report = run_update(&[dir.path().to_path_buf()], &options()).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.summary.files_touched, 0);
        assert_eq!(report.summary.warnings_emitted, 0);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn protected_header_is_never_opened() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("HandmadeMath.h");
        fs::write(&header, "hmm_vec3 HMM_Vec3(float X, float Y, float Z);\n").unwrap();
        fs::write(dir.path().join("main.c"), "hmm_vec3 v;\n").unwrap();

        let report = run_update(&[dir.path().to_path_buf()], &options()).unwrap();

        assert_eq!(
            fs::read_to_string(&header).unwrap(),
            "hmm_vec3 HMM_Vec3(float X, float Y, float Z);\n"
        );
        assert_eq!(report.summary.files_touched, 1);
        assert_eq!(report.summary.warnings_emitted, 1);
        assert_eq!(report.warnings[0].kind, WarningKind::ProtectedFile);
    }

    #[test]
    fn protected_header_passed_directly_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("HandmadeMath.h");
        fs::write(&header, "hmm_vec3 v;\n").unwrap();

        let report = run_update(&[header.clone()], &options()).unwrap();

        assert!(report.files.is_empty());
        assert_eq!(report.summary.warnings_emitted, 1);
        assert_eq!(fs::read_to_string(&header).unwrap(), "hmm_vec3 v;\n");
    }

    #[test]
    fn each_protected_occurrence_warns() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/HandmadeMath.h"), "").unwrap();
        fs::write(dir.path().join("b/HandmadeMath.h"), "").unwrap();

        let report = run_update(&[dir.path().to_path_buf()], &options()).unwrap();
        assert_eq!(report.summary.warnings_emitted, 2);
        assert_eq!(report.summary.files_touched, 0);
    }

    #[test]
    fn extension_filter_applies_to_walked_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "hmm_vec3\n").unwrap();
        fs::write(dir.path().join("shader.glsl"), "hmm_vec3\n").unwrap();

        let walked = run_update(&[dir.path().to_path_buf()], &options()).unwrap();
        assert_eq!(walked.summary.files_touched, 0);

        let direct = run_update(&[dir.path().join("shader.glsl")], &options()).unwrap();
        assert_eq!(direct.summary.files_touched, 1);
        assert_eq!(fs::read_to_string(dir.path().join("shader.glsl")).unwrap(), "HMM_Vec3\n");
    }

    #[test]
    fn exclude_globs_and_vcs_dirs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("third_party/glm")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("third_party/glm/glm.h"), "hmm_vec3\n").unwrap();
        fs::write(dir.path().join(".git/hook.c"), "hmm_vec3\n").unwrap();
        fs::write(dir.path().join("src/app.cpp"), "hmm_vec3\n").unwrap();

        let mut opts = options();
        opts.exclude = vec!["third_party/**".to_string()];
        let report = run_update(&[dir.path().to_path_buf()], &opts).unwrap();

        assert_eq!(report.files.len(), 1);
        assert!(report.files[0].file.ends_with("app.cpp"));
    }

    #[test]
    fn summary_counts_match_emitted_warnings() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.c"),
            "HMM_Rotate(f(x), axis);\nHMM_LinearCombineSSE(l, r);\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.c"), "HMM_Rotate(GetAngle(), axis);\n").unwrap();
        fs::write(dir.path().join("c.c"), "int unrelated;\n").unwrap();
        fs::write(dir.path().join("HandmadeMath.h"), "").unwrap();

        let report = run_update(&[dir.path().to_path_buf()], &options()).unwrap();

        let per_file: usize = report.files.iter().map(|f| f.warnings).sum();
        assert_eq!(report.summary.files_touched, 3);
        assert_eq!(report.summary.files_changed, 2);
        assert_eq!(report.summary.warnings_emitted, per_file + 1);
        assert_eq!(report.summary.warnings_emitted, report.warnings.len());
        assert_eq!(report.summary.warnings_emitted, 4);
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.cpp");
        let content = concat!(
            "hmm_mat4 view = HMM_LookAt(eye, center, up);\n",
            "hmm_mat4 r = HMM_Rotate(GetAngle(), axis);\n",
        );
        fs::write(&path, content).unwrap();

        run_update(&[path.clone()], &options()).unwrap();
        let after_first = fs::read_to_string(&path).unwrap();

        let second = run_update(&[path.clone()], &options()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
        assert_eq!(second.summary.warnings_emitted, 0);
        assert_eq!(second.summary.files_changed, 0);
        assert!(!second.files[0].written);
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = run_update(&[PathBuf::from("/nonexistent/src")], &options()).unwrap_err();
        assert_eq!(err.code.as_str(), "path.not_found");
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_loop_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.c"), "hmm_vec3 v;\n").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let report = run_update(&[dir.path().to_path_buf()], &options()).unwrap();

        assert_eq!(report.summary.files_touched, 1);
        assert_eq!(report.files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_source_is_rewritten_through_the_link() {
        let outside = tempfile::tempdir().unwrap();
        let real = outside.path().join("real.c");
        fs::write(&real, "hmm_vec3 v;\n").unwrap();

        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link.c");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let report = run_update(&[dir.path().to_path_buf()], &options()).unwrap();

        assert_eq!(report.summary.files_touched, 1);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "HMM_Vec3 v;\n");
    }

    #[cfg(unix)]
    #[test]
    fn rewritten_file_keeps_executable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exec.c");
        fs::write(&path, "hmm_vec3 v;\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        run_update(&[path.clone()], &options()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755, "mode was {:o}", mode);
        assert_eq!(fs::read_to_string(&path).unwrap(), "HMM_Vec3 v;\n");
    }
}
