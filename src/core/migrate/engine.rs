//! Per-identifier rename engine.
//!
//! 1. Pick the rule table from the token's prefix.
//! 2. Walk the table in declaration order, replacing every occurrence of each
//!    rule's match text in the working name.
//! 3. Run the rule's side effect (notice, dimension normalization) when it fires.
//! 4. For functions, annotate handedness once the table is exhausted.

use regex::Regex;
use std::sync::LazyLock;

use super::diagnostics::Notice;
use super::handedness;
use super::matcher::NameCategory;
use super::rules::{RenameRule, RuleEffect, FUNCTION_RULES, TYPE_RULES};

static DIMENSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[VM]\d[ivfd]?").unwrap());

static INTEGER_CONSTRUCTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(V\d)I").unwrap());

/// The outcome of renaming one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub name: String,
    pub notices: Vec<Notice>,
}

impl NameCategory {
    pub fn rules(&self) -> &'static [RenameRule] {
        match self {
            NameCategory::Type => TYPE_RULES,
            NameCategory::Function => FUNCTION_RULES,
        }
    }
}

/// Rename a single prefixed identifier.
pub fn rewrite_identifier(token: &str) -> Rewrite {
    let category = NameCategory::of(token);
    let mut notices = Vec::new();
    let mut name = apply_rules(token, category.rules(), &mut notices);

    if category == NameCategory::Function {
        name = handedness::annotate(&name);
    }

    Rewrite { name, notices }
}

fn apply_rules(token: &str, rules: &[RenameRule], notices: &mut Vec<Notice>) -> String {
    let mut name = token.to_string();

    for rule in rules {
        if !rule.applies_to(&name) {
            continue;
        }
        name = name.replace(rule.from, rule.to);

        match rule.effect {
            RuleEffect::None => {}
            RuleEffect::Notice { kind, message } => notices.push(Notice::new(kind, message)),
            RuleEffect::NormalizeDimension => name = normalize_dimensions(&name),
        }
    }

    name
}

/// Uppercase `V3f`-style markers, then fold `V2I` integer constructors into `V2`.
fn normalize_dimensions(name: &str) -> String {
    let upper = DIMENSION_TAG
        .replace_all(name, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned();

    let Some(caps) = INTEGER_CONSTRUCTOR.captures(&upper) else {
        return upper;
    };
    let marker = caps[0].to_string();
    let tag = caps[1].to_string();
    upper.replace(&marker, &tag)
}
