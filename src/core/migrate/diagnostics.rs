//! Warning records and the run-wide collector.
//!
//! The collector is an explicit value: each file is processed into its own
//! [`Diagnostics`] and folded into the run total with [`Diagnostics::absorb`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A renamed function now routes through an implicit fallback path.
    FallbackNotice,
    /// A renamed function lost its reduced-precision variant.
    PrecisionNotice,
    /// A degree argument could not be wrapped automatically.
    UnsafeWrap,
    /// The library header itself was found and left alone.
    ProtectedFile,
}

/// A warning produced while rewriting, before it is pinned to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: WarningKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn at_line(self, line: usize) -> Warning {
        Warning {
            kind: self.kind,
            file: None,
            line: Some(line),
            message: self.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// File path as given or discovered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Line number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
}

impl Warning {
    pub fn protected_file(path: impl Into<String>, name: &str) -> Self {
        Self {
            kind: WarningKind::ProtectedFile,
            file: Some(path.into()),
            line: None,
            message: format!("{} will not be replaced by this script.", name),
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Single-line form used for status logging.
    pub fn render(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => format!("{} line {}: {}", file, line, self.message),
            (None, Some(line)) => format!("Line {}: {}", line, self.message),
            _ => self.message.clone(),
        }
    }
}

/// Totals read once at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_touched: usize,
    pub warnings_emitted: usize,
}

/// Append-only warning sink plus the files-touched counter.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    files_touched: usize,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file(&mut self) {
        self.files_touched += 1;
    }

    pub fn record_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Fold another collector's events into this one.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.files_touched += other.files_touched;
        self.warnings.extend(other.warnings);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }

    pub fn files_touched(&self) -> usize {
        self.files_touched
    }

    pub fn warnings_emitted(&self) -> usize {
        self.warnings.len()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            files_touched: self.files_touched,
            warnings_emitted: self.warnings.len(),
        }
    }
}
