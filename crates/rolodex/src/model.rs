//! Lookup model building.
//!
//! Turns the raw facts supplied by a discovery collaborator — enum
//! declarations and column references — into the normalized
//! [`LookupDbModel`] everything downstream consumes. The model is rebuilt
//! fresh every run; nothing persists between runs except the database
//! itself.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::config::SyncConfig;
use crate::error::Error;
use crate::{Result, naming};

/// Declared underlying width of a source enum.
///
/// Source languages can declare more widths than lookup tables support;
/// anything but [`IntWidth::Byte`] and [`IntWidth::Int`] is rejected
/// during model building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    Byte,
    Short,
    Int,
    Long,
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntWidth::Byte => write!(f, "byte"),
            IntWidth::Short => write!(f, "short"),
            IntWidth::Int => write!(f, "int"),
            IntWidth::Long => write!(f, "long"),
        }
    }
}

/// Storage key type of a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKey {
    Tinyint,
    Int,
}

impl NumericKey {
    /// The column type of the generated `Id` column.
    pub fn sql_type(self) -> &'static str {
        match self {
            NumericKey::Tinyint => "tinyint",
            NumericKey::Int => "int",
        }
    }
}

/// One declared member of a source enum, as reported by discovery.
#[derive(Debug, Clone)]
pub struct MemberDecl {
    pub id: i64,
    /// Raw identifier as written in code, e.g. `DarkBlue`.
    pub ident: String,
    /// Explicit display-label override; wins over the identifier.
    pub description: Option<String>,
    /// Runtime-only members exist in code but must never appear in the
    /// database.
    pub runtime_only: bool,
}

/// One source enum, as reported by discovery.
#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub name: String,
    pub width: IntWidth,
    pub members: Vec<MemberDecl>,
}

/// A physical column that must be constrained to an enum's lookup table.
///
/// Columns nested under value-object properties are resolved to their
/// single physical column before this fact reaches us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumReference {
    pub table: String,
    pub column: String,
    pub enum_name: String,
}

/// One row destined for a lookup table: stored key and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupMember {
    pub id: i64,
    pub name: String,
}

/// One lookup table: logical name, key type and desired rows.
#[derive(Debug, Clone)]
pub struct LookupData {
    /// Logical enum identifier, pre-prefix.
    pub name: String,
    pub key: NumericKey,
    /// At most one member per distinct id; runtime-only members excluded.
    pub values: Vec<LookupMember>,
}

/// The artifact handed to planning: one lookup per distinct enum type,
/// one reference per enum-typed column, both deduplicated.
#[derive(Debug, Clone, Default)]
pub struct LookupDbModel {
    pub lookups: Vec<LookupData>,
    pub references: Vec<EnumReference>,
}

/// Build the normalized model from raw discovery facts.
///
/// References drive inclusion: an enum appears in `lookups` once, the
/// first time a reference names it, in reference order. A reference to an
/// undeclared enum aborts the build — proceeding would mis-map a
/// constraint.
pub fn build_model(
    decls: &[EnumDecl],
    references: &[EnumReference],
    config: &SyncConfig,
) -> Result<LookupDbModel> {
    let by_name: IndexMap<&str, &EnumDecl> =
        decls.iter().map(|decl| (decl.name.as_str(), decl)).collect();

    let mut lookups: IndexMap<&str, LookupData> = IndexMap::new();
    let mut deduped: Vec<EnumReference> = Vec::new();

    for reference in references {
        if deduped.contains(reference) {
            continue;
        }
        deduped.push(reference.clone());

        if lookups.contains_key(reference.enum_name.as_str()) {
            continue;
        }
        let Some(decl) = by_name.get(reference.enum_name.as_str()) else {
            return Err(Error::MissingEnum {
                enum_name: reference.enum_name.clone(),
                table: reference.table.clone(),
                column: reference.column.clone(),
            });
        };
        lookups.insert(decl.name.as_str(), lookup_data(decl, config)?);
    }

    Ok(LookupDbModel {
        lookups: lookups.into_values().collect(),
        references: deduped,
    })
}

fn lookup_data(decl: &EnumDecl, config: &SyncConfig) -> Result<LookupData> {
    let key = match decl.width {
        IntWidth::Byte => NumericKey::Tinyint,
        IntWidth::Int => NumericKey::Int,
        width => {
            return Err(Error::UnsupportedKeyWidth {
                enum_name: decl.name.clone(),
                width,
            });
        }
    };

    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for member in &decl.members {
        if member.runtime_only {
            continue;
        }
        // Value aliases keep the first declaration only.
        if !seen.insert(member.id) {
            continue;
        }
        values.push(LookupMember {
            id: member.id,
            name: naming::display_name(member, config.split_words),
        });
    }

    Ok(LookupData {
        name: decl.name.clone(),
        key,
        values,
    })
}
