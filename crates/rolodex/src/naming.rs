//! Naming policy: pure functions from enum/column identifiers to the
//! table, constraint and display names written to the database.
//!
//! Everything here is deterministic, so re-running with unchanged input
//! produces identical names and therefore zero net schema change.

use crate::config::SyncConfig;
use crate::model::MemberDecl;

/// Physical lookup table name for an enum: prefix + name + suffix.
pub fn table_name(config: &SyncConfig, enum_name: &str) -> String {
    format!(
        "{}{}{}",
        config.table_name_prefix, enum_name, config.table_name_suffix
    )
}

/// Constraint name for a referencing column: `FK_<table>_<column>`.
pub fn foreign_key_name(table: &str, column: &str) -> String {
    format!("FK_{}_{}", table, column)
}

/// Display label stored for a member.
///
/// An explicit description override wins verbatim; otherwise the raw
/// identifier, word-split when enabled.
pub fn display_name(member: &MemberDecl, split_words: bool) -> String {
    if let Some(description) = &member.description {
        return description.clone();
    }
    if split_words {
        split_pascal_case(&member.ident)
    } else {
        member.ident.clone()
    }
}

/// Insert spaces between the words of a PascalCase identifier.
///
/// A space goes before every uppercase letter that follows a lowercase
/// letter, and before the last letter of an acronym run when a lowercase
/// letter follows it. Runs of capitals otherwise stay together:
/// `SomeValue` -> `Some Value`, `ABValue` -> `AB Value`,
/// `HTMLParser` -> `HTML Parser`.
pub fn split_pascal_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let acronym_end =
                prev.is_uppercase() && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || acronym_end {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}
