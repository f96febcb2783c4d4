//! Identifier scanning.

use regex::Regex;
use std::sync::LazyLock;

use super::rules::{MIGRATED_TYPES, NEW_PREFIX, OLD_PREFIX};

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Either prefix, then a greedy identifier body. No word boundary on the
    // left, matching how the library's names appear glued into macros.
    Regex::new(&format!(
        r"(?:{}|{})\w+",
        regex::escape(OLD_PREFIX),
        regex::escape(NEW_PREFIX)
    ))
    .unwrap()
});

/// Which rename table governs a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCategory {
    Type,
    Function,
}

impl NameCategory {
    /// Lowercase-prefixed tokens are types, everything else is a function.
    pub fn of(token: &str) -> Self {
        if token.starts_with(OLD_PREFIX) {
            NameCategory::Type
        } else {
            NameCategory::Function
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMatch<'a> {
    /// Byte offset of the token in the line.
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    pub category: NameCategory,
    /// The token is immediately followed by `(`.
    pub opens_call: bool,
}

impl IdentifierMatch<'_> {
    /// A 2.0 type name left behind by an earlier run. Old constructors with
    /// the same spelling are always called, so a bare occurrence is a type.
    pub fn is_migrated_type(&self) -> bool {
        self.category == NameCategory::Function
            && !self.opens_call
            && MIGRATED_TYPES.contains(&self.text)
    }
}

/// Lazily yield prefixed identifiers in `line`, left to right.
pub fn find_identifiers(line: &str) -> impl Iterator<Item = IdentifierMatch<'_>> {
    IDENTIFIER_PATTERN.find_iter(line).map(move |m| IdentifierMatch {
        start: m.start(),
        end: m.end(),
        text: m.as_str(),
        category: NameCategory::of(m.as_str()),
        opens_call: line[m.end()..].starts_with('('),
    })
}
