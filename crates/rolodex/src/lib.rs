//! Enum lookup-table synchronization for SQL Server.
//!
//! Application code declares enums; databases want lookup tables and
//! foreign keys. This crate keeps the two in line: on every startup or
//! migration step it creates missing lookup tables, reconciles their rows
//! against the enum members currently declared in code (insert new values,
//! rename changed labels, delete retired ones) and constrains every
//! enum-typed column to its lookup table. Every statement it issues is
//! guarded, so a run is safe to replay as often as you like.
//!
//! Discovery of which columns hold which enum is the caller's business
//! (an ORM, a static registry, generated code); it hands over plain
//! [`EnumDecl`] and [`EnumReference`] facts. Statement execution is a
//! single trait seam, [`StatementRunner`] — implement it over whatever
//! connection you have, or enable the `mssql` feature for a ready-made
//! tiberius implementation.
//!
//! ```ignore
//! use rolodex::{EnumDecl, EnumReference, IntWidth, MemberDecl, SyncConfig};
//!
//! let decls = vec![EnumDecl {
//!     name: "Colour".into(),
//!     width: IntWidth::Int,
//!     members: vec![
//!         MemberDecl { id: 1, ident: "Red".into(), description: None, runtime_only: false },
//!         MemberDecl { id: 2, ident: "DarkBlue".into(), description: None, runtime_only: false },
//!     ],
//! }];
//! let references = vec![EnumReference {
//!     table: "Car".into(),
//!     column: "BodyColour".into(),
//!     enum_name: "Colour".into(),
//! }];
//!
//! let config = SyncConfig::default();
//! let model = rolodex::build_model(&decls, &references, &config)?;
//! rolodex::apply(&model, &config, &mut client).await?;
//! // Enum_Colour now holds {1: "Red", 2: "Dark Blue"} and
//! // Car.BodyColour carries FK_Car_BodyColour.
//! ```

pub mod config;
mod error;
pub mod model;
pub mod naming;
pub mod reconcile;
pub mod runner;
pub mod schema;
pub mod sync;

pub use config::SyncConfig;
pub use error::{BoxError, Error};
pub use model::{
    EnumDecl, EnumReference, IntWidth, LookupData, LookupDbModel, LookupMember, MemberDecl,
    NumericKey, build_model,
};
pub use runner::{StatementRunner, TracedRunner};
pub use sync::{Op, Planned, apply, plan};

// Re-export the statement types runners consume.
pub use rolodex_sql::{SqlParam, SqlValue, Statement};

/// Result type for rolodex operations.
pub type Result<T> = std::result::Result<T, Error>;
