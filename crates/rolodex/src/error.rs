use thiserror::Error;

use crate::model::IntWidth;

/// Boxed error carried across the statement-runner boundary.
///
/// Runner failures are propagated to the caller unchanged; the run is not
/// retried, since every emitted statement is guarded and safe to replay
/// once the underlying cause is fixed.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// A column references an enum the discovery input never declared.
    /// Proceeding would silently mis-map a constraint, so the run aborts
    /// before issuing any statement.
    #[error("no declaration for enum `{enum_name}` referenced by {table}.{column}")]
    MissingEnum {
        enum_name: String,
        table: String,
        column: String,
    },

    /// Only byte- and int-backed enums have a lookup key type.
    #[error("enum `{enum_name}` is {width}-backed; only byte and int enums are supported")]
    UnsupportedKeyWidth { enum_name: String, width: IntWidth },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A statement failed for a reason other than pre-existence. The
    /// planned operation's description pins down which table/column/enum
    /// to look at.
    #[error("{op} failed: {source}")]
    Execution {
        op: String,
        #[source]
        source: BoxError,
    },
}
