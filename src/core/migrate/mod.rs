//! Handmade Math 1.x → 2.0 source migration.
//!
//! Rewrites one line at a time, with no memory between lines:
//! 1. Find `hmm_`/`HMM_` identifiers ([`matcher`])
//! 2. Rename each through its category's ordered rule table ([`engine`])
//! 3. Suffix handed functions with their convention ([`handedness`])
//! 4. Wrap degree arguments of calls that now take radians ([`degrees`])
//!
//! Cases that cannot be fixed mechanically come back as [`Warning`]s.

pub mod degrees;
pub mod diagnostics;
pub mod engine;
pub mod handedness;
pub mod matcher;
pub mod rules;

pub use degrees::{wrap_renamed_calls, WrappedLine};
pub use diagnostics::{Diagnostics, Notice, RunSummary, Warning, WarningKind};
pub use engine::{rewrite_identifier, Rewrite};
pub use matcher::{find_identifiers, IdentifierMatch, NameCategory};
pub use rules::{RenameRule, RuleEffect};

/// A rewritten line and the warnings raised while rewriting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
    pub text: String,
    pub warnings: Vec<Warning>,
}

impl LineRewrite {
    pub fn changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Rewrite a single line. `line_number` is 1-indexed and only used to label
/// warnings. Any line ending is carried through untouched.
///
/// Degree wrapping only considers calls renamed on this pass, so 2.0 code
/// (including the output of an earlier run) is never wrapped twice.
pub fn rewrite_line(line: &str, line_number: usize) -> LineRewrite {
    let mut notices = Vec::new();
    let mut renamed = String::with_capacity(line.len());
    let mut renamed_at = Vec::new();
    let mut last = 0;

    for ident in find_identifiers(line) {
        renamed.push_str(&line[last..ident.start]);
        last = ident.end;

        if ident.is_migrated_type() {
            renamed.push_str(ident.text);
            continue;
        }

        let rewrite = rewrite_identifier(ident.text);
        if rewrite.name != ident.text {
            renamed_at.push(renamed.len());
        }
        notices.extend(rewrite.notices);
        renamed.push_str(&rewrite.name);
    }
    renamed.push_str(&line[last..]);

    let wrapped = wrap_renamed_calls(&renamed, &renamed_at);
    notices.extend(wrapped.notices);

    LineRewrite {
        text: wrapped.text,
        warnings: notices
            .into_iter()
            .map(|notice| notice.at_line(line_number))
            .collect(),
    }
}
