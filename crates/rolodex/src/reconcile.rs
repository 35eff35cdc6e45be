//! Data reconciliation: a three-way set merge between the rows an enum
//! declares and the rows its lookup table currently holds.
//!
//! Each lookup gets one self-contained batch: stage the desired rows in a
//! session-local temp table, `MERGE` against the target keyed on `Id`
//! (update changed names, insert new ids, delete retired ones), drop the
//! staging table. Tables reconcile independently; there is no cross-table
//! coupling.
//!
//! Values travel either as bound parameters (default) or as escaped
//! inline literals, for execution paths that cannot carry bindings. Both
//! modes produce identical end states.

use std::fmt::Write;

use rolodex_sql::{Ident, Params, SqlValue, Statement};

use crate::config::SyncConfig;
use crate::model::LookupData;
use crate::naming;

/// Emit the reconciliation batch for one lookup table.
///
/// The staging table is re-created fresh at the start of the batch — the
/// leading drop guard clears any `#lookups` a failed earlier batch may
/// have leaked into the session, so a replay never trips over stale
/// staging state. An empty `values` list stages nothing and the merge's
/// DELETE arm empties the target table.
pub fn populate(config: &SyncConfig, lookup: &LookupData) -> Statement {
    let table = naming::table_name(config, &lookup.name);
    let mut sql = String::new();
    let mut params = Params::new();

    sql.push_str("IF OBJECT_ID('tempdb..#lookups') IS NOT NULL DROP TABLE #lookups;\n");
    let _ = writeln!(
        sql,
        "CREATE TABLE #lookups (Id int, Name nvarchar({}) COLLATE database_default);",
        config.name_field_length
    );

    for (index, member) in lookup.values.iter().enumerate() {
        if config.parameterized {
            let id = params.bind(format!("id{index}"), SqlValue::Int(member.id));
            let name = params.bind(format!("name{index}"), SqlValue::Text(member.name.clone()));
            let _ = writeln!(sql, "INSERT INTO #lookups (Id, Name) VALUES ({id}, {name});");
        } else {
            let id = SqlValue::Int(member.id).to_literal();
            let name = SqlValue::Text(member.name.clone()).to_literal();
            let _ = writeln!(sql, "INSERT INTO #lookups (Id, Name) VALUES ({id}, {name});");
        }
    }

    let _ = writeln!(
        sql,
        r"MERGE INTO {} dst
    USING #lookups src ON src.Id = dst.Id
    WHEN MATCHED AND src.Name <> dst.Name THEN
        UPDATE SET Name = src.Name
    WHEN NOT MATCHED THEN
        INSERT (Id, Name)
        VALUES (src.Id, src.Name)
    WHEN NOT MATCHED BY SOURCE THEN
        DELETE
;",
        Ident(&table)
    );
    sql.push_str("DROP TABLE #lookups;");

    Statement::with_params(sql, params.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LookupMember, NumericKey};
    use rolodex_sql::SqlParam;

    fn lookup(values: Vec<LookupMember>) -> LookupData {
        LookupData {
            name: "Colour".to_string(),
            key: NumericKey::Int,
            values,
        }
    }

    fn member(id: i64, name: &str) -> LookupMember {
        LookupMember {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn parameterized_batch_stages_then_merges() {
        let stmt = populate(
            &SyncConfig::default(),
            &lookup(vec![member(1, "Red"), member(2, "Dark Blue")]),
        );
        insta::assert_snapshot!(stmt.sql, @r"
IF OBJECT_ID('tempdb..#lookups') IS NOT NULL DROP TABLE #lookups;
CREATE TABLE #lookups (Id int, Name nvarchar(255) COLLATE database_default);
INSERT INTO #lookups (Id, Name) VALUES (@P1, @P2);
INSERT INTO #lookups (Id, Name) VALUES (@P3, @P4);
MERGE INTO [Enum_Colour] dst
    USING #lookups src ON src.Id = dst.Id
    WHEN MATCHED AND src.Name <> dst.Name THEN
        UPDATE SET Name = src.Name
    WHEN NOT MATCHED THEN
        INSERT (Id, Name)
        VALUES (src.Id, src.Name)
    WHEN NOT MATCHED BY SOURCE THEN
        DELETE
;
DROP TABLE #lookups;
");
    }

    #[test]
    fn parameterized_bindings_interleave_ids_and_names() {
        let stmt = populate(
            &SyncConfig::default(),
            &lookup(vec![member(1, "Red"), member(3, "Blue")]),
        );
        assert_eq!(
            stmt.params,
            vec![
                SqlParam { name: "id0".to_string(), value: SqlValue::Int(1) },
                SqlParam { name: "name0".to_string(), value: SqlValue::Text("Red".to_string()) },
                SqlParam { name: "id1".to_string(), value: SqlValue::Int(3) },
                SqlParam { name: "name1".to_string(), value: SqlValue::Text("Blue".to_string()) },
            ]
        );
    }

    #[test]
    fn literal_mode_inlines_escaped_values_and_binds_nothing() {
        let config = SyncConfig {
            parameterized: false,
            ..SyncConfig::default()
        };
        let stmt = populate(&config, &lookup(vec![member(1, "Won't Fix")]));
        assert!(
            stmt.sql
                .contains("INSERT INTO #lookups (Id, Name) VALUES (1, N'Won''t Fix');")
        );
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn both_modes_stage_the_same_rows() {
        let desired = lookup(vec![member(1, "Red"), member(2, "Green")]);
        let bound = populate(&SyncConfig::default(), &desired);
        let literal = populate(
            &SyncConfig {
                parameterized: false,
                ..SyncConfig::default()
            },
            &desired,
        );

        // Same statement shape either way; only the value transport differs.
        assert_eq!(bound.sql.lines().count(), literal.sql.lines().count());
        assert_eq!(bound.params.len(), 4);
        assert!(literal.sql.contains("VALUES (1, N'Red')"));
        assert!(literal.sql.contains("VALUES (2, N'Green')"));
    }

    #[test]
    fn empty_lookup_stages_nothing_but_still_merges() {
        let stmt = populate(&SyncConfig::default(), &lookup(vec![]));
        assert!(!stmt.sql.contains("INSERT INTO #lookups"));
        assert!(stmt.sql.contains("WHEN NOT MATCHED BY SOURCE THEN"));
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn staging_table_is_dropped_on_both_ends() {
        let stmt = populate(&SyncConfig::default(), &lookup(vec![member(1, "Red")]));
        assert!(
            stmt.sql
                .starts_with("IF OBJECT_ID('tempdb..#lookups') IS NOT NULL DROP TABLE #lookups;")
        );
        assert!(stmt.sql.ends_with("DROP TABLE #lookups;"));
    }

    #[test]
    fn staging_name_column_matches_configured_width() {
        let config = SyncConfig {
            name_field_length: 64,
            ..SyncConfig::default()
        };
        let stmt = populate(&config, &lookup(vec![]));
        assert!(
            stmt.sql
                .contains("CREATE TABLE #lookups (Id int, Name nvarchar(64) COLLATE database_default);")
        );
    }
}
