//! The statement-execution collaborator.
//!
//! The core never talks to a database directly; it hands every statement
//! (text plus ordered bindings) to a [`StatementRunner`]. Implement the
//! trait over whatever connection you have, wrap it in [`TracedRunner`]
//! for query logging, or enable the `mssql` feature for a ready-made
//! tiberius implementation.

use std::future::Future;
use std::pin::Pin;

use rolodex_sql::SqlParam;
use tracing::Instrument;

use crate::error::BoxError;

/// Future returned by [`StatementRunner::execute`].
pub type ExecuteFuture<'a> = Pin<Box<dyn Future<Output = Result<u64, BoxError>> + Send + 'a>>;

/// Executes one statement against the target store.
///
/// Placeholders in the statement text are positional (`@P1`, `@P2`, ...)
/// and map to `params` by order; the binding names are diagnostic only.
/// Returns the affected row count where the backend reports one. Errors
/// are propagated to the caller unchanged — the run aborts at the first
/// failure and is safe to replay from the start.
pub trait StatementRunner: Send {
    fn execute<'a>(&'a mut self, sql: &'a str, params: &'a [SqlParam]) -> ExecuteFuture<'a>;
}

/// A runner wrapper that logs every statement via tracing.
///
/// Records a `debug_span!` per statement with the SQL text, the binding
/// count and the affected row count.
pub struct TracedRunner<R> {
    inner: R,
}

impl<R: StatementRunner> TracedRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: StatementRunner> StatementRunner for TracedRunner<R> {
    fn execute<'a>(&'a mut self, sql: &'a str, params: &'a [SqlParam]) -> ExecuteFuture<'a> {
        let span = tracing::debug_span!(
            "db.execute",
            sql = %sql,
            params = params.len(),
            affected = tracing::field::Empty,
        );
        Box::pin(
            async move {
                let affected = self.inner.execute(sql, params).await?;
                tracing::Span::current().record("affected", affected);
                Ok(affected)
            }
            .instrument(span),
        )
    }
}

/// SQL Server execution via tiberius.
#[cfg(feature = "mssql")]
pub mod mssql {
    use rolodex_sql::{SqlParam, SqlValue};
    use tiberius::ToSql;
    use tokio::net::TcpStream;
    use tokio_util::compat::Compat;

    use super::{ExecuteFuture, StatementRunner};

    /// tiberius binds parameters positionally as `@P1`, `@P2`, ... —
    /// exactly the placeholders the emission layer renders.
    impl StatementRunner for tiberius::Client<Compat<TcpStream>> {
        fn execute<'a>(&'a mut self, sql: &'a str, params: &'a [SqlParam]) -> ExecuteFuture<'a> {
            Box::pin(async move {
                let bound: Vec<&dyn ToSql> = params
                    .iter()
                    .map(|p| match &p.value {
                        SqlValue::Int(v) => v as &dyn ToSql,
                        SqlValue::Text(v) => v as &dyn ToSql,
                    })
                    .collect();
                let result = tiberius::Client::execute(self, sql, &bound).await?;
                Ok(result.total())
            })
        }
    }
}
