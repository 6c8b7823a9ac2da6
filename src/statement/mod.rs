//! This module defines the `CreateTableStatement` struct
//! A `CreateTableStatement` is the dialect-agnostic intent to create a table,
//! handed to a [crate::dialect_translation] translator to be rendered as DDL
//! text, then discarded. Column declaration order is output order.
//!

pub mod builder;

use std::{
    collections::{HashMap, HashSet},
    error, fmt, result,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data_type::DataType;

pub use builder::CreateTableBuilder;

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    InvalidStatement(String),
    UnknownColumn(String),
    Other(String),
}

impl Error {
    pub fn invalid_statement(desc: impl fmt::Display) -> Error {
        Error::InvalidStatement(desc.to_string())
    }
    pub fn unknown_column(column: impl fmt::Display) -> Error {
        Error::UnknownColumn(format!("{} is not a declared column", column))
    }
    pub fn other<T: fmt::Display>(desc: T) -> Error {
        Error::Other(desc.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidStatement(desc) => writeln!(f, "InvalidStatement: {}", desc),
            Error::UnknownColumn(desc) => writeln!(f, "UnknownColumn: {}", desc),
            Error::Other(err) => writeln!(f, "{}", err),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// How a foreign key designates its referenced table. The two forms are
/// mutually exclusive by construction.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForeignKeyReference {
    /// A pre-formatted references expression such as `sales.orders(id)`
    Raw(String),
    /// A fully decomposed reference
    Columns {
        catalog: Option<String>,
        schema: Option<String>,
        table: String,
        columns: Vec<String>,
    },
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyConstraint {
    column: String,
    reference: ForeignKeyReference,
}

impl ForeignKeyConstraint {
    pub fn new<S: Into<String>>(column: S, reference: ForeignKeyReference) -> ForeignKeyConstraint {
        ForeignKeyConstraint {
            column: column.into(),
            reference,
        }
    }

    /// A foreign key carrying a pre-formatted references expression
    pub fn raw<S: Into<String>, R: Into<String>>(column: S, references: R) -> ForeignKeyConstraint {
        ForeignKeyConstraint::new(column, ForeignKeyReference::Raw(references.into()))
    }

    /// A foreign key referencing columns of another table by name
    pub fn columns<S, T, I, C>(column: S, table: T, columns: I) -> ForeignKeyConstraint
    where
        S: Into<String>,
        T: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        ForeignKeyConstraint::new(
            column,
            ForeignKeyReference::Columns {
                catalog: None,
                schema: None,
                table: table.into(),
                columns: columns.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn reference(&self) -> &ForeignKeyReference {
        &self.reference
    }
}

/// The intent to create a table: ordered columns with their types and
/// nullability, commit-timestamp markers, an optional primary key and foreign
/// keys. The structure carries no dialect knowledge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    catalog: Option<String>,
    schema: Option<String>,
    table: String,
    /// Declaration order of the columns, preserved in the DDL output
    columns: Vec<String>,
    column_types: HashMap<String, DataType>,
    not_null_columns: HashSet<String>,
    commit_timestamp_columns: HashSet<String>,
    primary_key: Option<Vec<String>>,
    foreign_keys: Vec<ForeignKeyConstraint>,
}

impl CreateTableStatement {
    /// Builder
    pub fn builder() -> CreateTableBuilder {
        CreateTableBuilder::new()
    }

    pub fn catalog(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look the type of a column up. A statement built through the builder
    /// always resolves its own columns; a statement deserialized from an
    /// inconsistent document may not.
    pub fn column_type(&self, column: &str) -> Result<&DataType> {
        self.column_types
            .get(column)
            .ok_or_else(|| Error::unknown_column(column))
    }

    pub fn is_not_null(&self, column: &str) -> bool {
        self.not_null_columns.contains(column)
    }

    pub fn is_commit_timestamp(&self, column: &str) -> bool {
        self.commit_timestamp_columns.contains(column)
    }

    pub fn primary_key(&self) -> Option<&[String]> {
        self.primary_key.as_deref()
    }

    pub fn foreign_keys(&self) -> &[ForeignKeyConstraint] {
        &self.foreign_keys
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.table, self.columns.iter().join(", "))
    }
}
