//! # Spandl
//! Translation of abstract table definitions into the DDL of a target SQL dialect.
//!
//! A [`CreateTableStatement`] describes a table to create without committing to any
//! syntax: ordered columns with their types, nullability, commit-timestamp markers,
//! a primary key and foreign keys. A [`CreateTableTranslator`] renders it as the
//! DDL text one dialect accepts, using an [`EscapingPolicy`] for identifier quoting
//! and name qualification. Translators are resolved from a static selection table
//! keyed by [`Dialect`], the highest-priority supporting translator winning.
//!
//! The primary dialect is Cloud Spanner, whose `CREATE TABLE` departs from ANSI in
//! a few ways: the primary key sits after the closing parenthesis, foreign keys are
//! appended inline, there is no auto-increment (a commit-timestamp option stands in
//! for it) and created tables take no catalog or schema qualifier.
//!
//! ```
//! use spandl::{translate, CreateTableStatement, DataType, Dialect, Ready};
//!
//! let statement = CreateTableStatement::builder()
//!     .name("t1")
//!     .column("id", DataType::Int64)
//!     .column("name", DataType::string())
//!     .not_null("id")
//!     .commit_timestamp("id")
//!     .primary_key(["id"])
//!     .build();
//! let ddl = translate(Dialect::Spanner, &statement).unwrap();
//! assert_eq!(
//!     ddl[0].sql(),
//!     "CREATE TABLE t1 (id INT64 NOT NULL OPTIONS ( allow_commit_timestamp = true ), name STRING) PRIMARY KEY (id)"
//! );
//! ```

pub mod builder;
pub mod data_type;
pub mod dialect_translation;
pub mod escape;
pub mod setup;
pub mod statement;

pub use builder::{Ready, With, WithIterator};
pub use data_type::DataType;
pub use dialect_translation::{
    translate, translator_for, CreateTableTranslator, Ddl, Dialect,
};
pub use escape::{EscapingPolicy, ObjectKind};
pub use statement::{CreateTableStatement, ForeignKeyConstraint, ForeignKeyReference};
