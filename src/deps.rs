//! Textual dependency detection between declarations.
//!
//! A declaration depends on every other declaration whose name occurs in its
//! raw text. Results are always listed aliases first, then enums, then
//! interfaces, each in discovery order.

use std::collections::HashSet;

use serde::Deserialize;

use crate::declaration::{Declaration, Declarations};

/// How a declaration name is matched against another declaration's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain substring containment. `Id` matches inside `Identity`.
    #[default]
    Substring,
    /// Only matches bounded by non-identifier characters on both sides.
    Word,
}

/// Names of the declarations `decl` references, excluding itself.
pub fn find_dependencies<'a>(
    decl: &Declaration,
    all: &'a Declarations,
    mode: MatchMode,
) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    all.lookup_order()
        .map(|candidate| candidate.name.as_str())
        .filter(|name| *name != decl.name)
        .filter(|name| references(&decl.raw_text, name, mode))
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Whether `text` references `name` under the given matching mode.
pub fn references(text: &str, name: &str, mode: MatchMode) -> bool {
    if name.is_empty() {
        return false;
    }
    match mode {
        MatchMode::Substring => text.contains(name),
        MatchMode::Word => text.match_indices(name).any(|(start, _)| {
            let before = text[..start].chars().next_back();
            let after = text[start + name.len()..].chars().next();
            !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
        }),
    }
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}
