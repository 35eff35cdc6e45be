//! Orchestration: turn a model into an ordered statement plan and run it.
//!
//! The plan is pure — the same model and configuration always yield the
//! same statements, which is what makes repeat runs net no-ops. Ordering
//! invariant: every table-creation statement precedes every foreign-key
//! statement, with row reconciliation in between, so a constraint is never
//! added before the table (and rows) it validates against.

use std::fmt;

use rolodex_sql::Statement;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::error::Error;
use crate::model::LookupDbModel;
use crate::runner::StatementRunner;
use crate::{Result, naming, reconcile, schema};

/// One planned operation, for diagnostics when its statement fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    CreateTable {
        table: String,
    },
    Populate {
        table: String,
    },
    AddForeignKey {
        table: String,
        column: String,
        constraint: String,
    },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::CreateTable { table } => write!(f, "creating lookup table [{table}]"),
            Op::Populate { table } => write!(f, "reconciling rows of [{table}]"),
            Op::AddForeignKey {
                table,
                column,
                constraint,
            } => write!(f, "adding constraint {constraint} on [{table}].[{column}]"),
        }
    }
}

/// A statement together with the operation it implements.
#[derive(Debug, Clone)]
pub struct Planned {
    pub op: Op,
    pub statement: Statement,
}

/// Produce the full, ordered statement plan for a model.
///
/// Fails fast on invalid configuration, before anything touches the
/// database.
pub fn plan(model: &LookupDbModel, config: &SyncConfig) -> Result<Vec<Planned>> {
    if config.name_field_length == 0 {
        return Err(Error::InvalidConfig(
            "name_field_length must be at least 1".to_string(),
        ));
    }

    let mut planned =
        Vec::with_capacity(model.lookups.len() * 2 + model.references.len());

    for lookup in &model.lookups {
        planned.push(Planned {
            op: Op::CreateTable {
                table: naming::table_name(config, &lookup.name),
            },
            statement: schema::create_table(config, lookup),
        });
    }

    for lookup in &model.lookups {
        planned.push(Planned {
            op: Op::Populate {
                table: naming::table_name(config, &lookup.name),
            },
            statement: reconcile::populate(config, lookup),
        });
    }

    for reference in &model.references {
        planned.push(Planned {
            op: Op::AddForeignKey {
                table: reference.table.clone(),
                column: reference.column.clone(),
                constraint: naming::foreign_key_name(&reference.table, &reference.column),
            },
            statement: schema::add_foreign_key(config, reference),
        });
    }

    Ok(planned)
}

/// Plan and execute, one statement at a time.
///
/// Each statement is awaited before the next is issued. The first failure
/// aborts the run with the planned operation attached; nothing is retried,
/// and a rerun from the start is always safe because every statement is
/// individually guarded.
pub async fn apply<R: StatementRunner>(
    model: &LookupDbModel,
    config: &SyncConfig,
    runner: &mut R,
) -> Result<()> {
    let planned = plan(model, config)?;
    info!(
        lookups = model.lookups.len(),
        references = model.references.len(),
        statements = planned.len(),
        "synchronizing lookup tables"
    );

    for item in &planned {
        debug!(op = %item.op, params = item.statement.params.len(), "executing");
        runner
            .execute(&item.statement.sql, &item.statement.params)
            .await
            .map_err(|source| Error::Execution {
                op: item.op.to_string(),
                source,
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnumReference, LookupData, LookupMember, NumericKey};

    fn model() -> LookupDbModel {
        LookupDbModel {
            lookups: vec![LookupData {
                name: "Colour".to_string(),
                key: NumericKey::Int,
                values: vec![LookupMember {
                    id: 1,
                    name: "Red".to_string(),
                }],
            }],
            references: vec![EnumReference {
                table: "Car".to_string(),
                column: "BodyColour".to_string(),
                enum_name: "Colour".to_string(),
            }],
        }
    }

    #[test]
    fn plan_orders_create_populate_constrain() {
        let planned = plan(&model(), &SyncConfig::default()).unwrap();
        let ops: Vec<&Op> = planned.iter().map(|p| &p.op).collect();
        assert!(matches!(ops[0], Op::CreateTable { table } if table == "Enum_Colour"));
        assert!(matches!(ops[1], Op::Populate { table } if table == "Enum_Colour"));
        assert!(
            matches!(ops[2], Op::AddForeignKey { constraint, .. } if constraint == "FK_Car_BodyColour")
        );
    }

    #[test]
    fn planning_twice_yields_identical_statements() {
        let config = SyncConfig::default();
        let first = plan(&model(), &config).unwrap();
        let second = plan(&model(), &config).unwrap();
        let sql = |p: &[Planned]| p.iter().map(|i| i.statement.clone()).collect::<Vec<_>>();
        assert_eq!(sql(&first), sql(&second));
    }

    #[test]
    fn zero_name_length_is_rejected_before_planning() {
        let config = SyncConfig {
            name_field_length: 0,
            ..SyncConfig::default()
        };
        let err = plan(&model(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn op_descriptions_name_the_objects_involved() {
        let planned = plan(&model(), &SyncConfig::default()).unwrap();
        let descriptions: Vec<String> = planned.iter().map(|p| p.op.to_string()).collect();
        assert_eq!(descriptions[0], "creating lookup table [Enum_Colour]");
        assert_eq!(
            descriptions[2],
            "adding constraint FK_Car_BodyColour on [Car].[BodyColour]"
        );
    }
}
