//! Schema synchronization: guarded CREATE TABLE and ADD CONSTRAINT
//! statements, one per lookup / per reference.
//!
//! Every statement carries its own `IF OBJECT_ID(...) IS NULL` guard, so
//! replaying it against a database that is already in the desired state is
//! a no-op. Ordering matters only in one place: a foreign key must follow
//! the creation of the lookup table it targets (see [`crate::sync`]).

use rolodex_sql::{Ident, Lit, NLit, Statement};

use crate::config::SyncConfig;
use crate::model::{EnumReference, LookupData};
use crate::naming;

/// Comment attached to every generated table, warning operators away from
/// hand edits.
const TABLE_DESCRIPTION: &str =
    "Automatically generated. Contents will be overwritten on app startup; do not edit by hand.";

/// Create the lookup table for an enum, if an object of that name does not
/// already exist.
///
/// Columns are fixed: `Id` (the lookup's key type, primary key) and `Name`
/// (`nvarchar` of the configured length). The `MS_Description` extended
/// property rides inside the same guarded block, so it is written exactly
/// once, on creation.
pub fn create_table(config: &SyncConfig, lookup: &LookupData) -> Statement {
    let table = naming::table_name(config, &lookup.name);
    Statement::text(format!(
        r"IF OBJECT_ID({guard}, 'U') IS NULL
begin
    CREATE TABLE {ident} (Id {key} PRIMARY KEY, Name nvarchar({len}));
    exec sys.sp_addextendedproperty @name=N'MS_Description', @level0type=N'SCHEMA', @level0name=N'dbo', @level1type=N'TABLE',
        @level1name={name_lit}, @value={value_lit};
end",
        guard = Lit(&table),
        ident = Ident(&table),
        key = lookup.key.sql_type(),
        len = config.name_field_length,
        name_lit = NLit(&table),
        value_lit = NLit(TABLE_DESCRIPTION),
    ))
}

/// Constrain a referencing column to its lookup table's `Id`, if a
/// constraint of that name does not already exist.
pub fn add_foreign_key(config: &SyncConfig, reference: &EnumReference) -> Statement {
    let constraint = naming::foreign_key_name(&reference.table, &reference.column);
    let lookup_table = naming::table_name(config, &reference.enum_name);
    Statement::text(format!(
        "IF OBJECT_ID({guard}, 'F') IS NULL ALTER TABLE {table} ADD CONSTRAINT {constraint} FOREIGN KEY ({column}) REFERENCES {lookup} (Id);",
        guard = Lit(&constraint),
        table = Ident(&reference.table),
        column = Ident(&reference.column),
        lookup = Ident(&lookup_table),
    ))
}
