//! Builder for [`CreateTableStatement`], in the typestate style: the table
//! name is required before `build` becomes available, everything else is
//! optional.

use std::collections::{HashMap, HashSet};

use super::{CreateTableStatement, Error, ForeignKeyConstraint, Result};
use crate::{
    builder::{Ready, With},
    data_type::DataType,
};

#[derive(Clone, Debug, Default)]
pub struct WithoutName;
#[derive(Clone, Debug)]
pub struct WithName(String);

/// A builder for table creation statements
#[derive(Clone, Debug, Default)]
pub struct CreateTableBuilder<RequireName = WithoutName> {
    name: RequireName,
    catalog: Option<String>,
    schema: Option<String>,
    columns: Vec<String>,
    column_types: HashMap<String, DataType>,
    not_null_columns: HashSet<String>,
    commit_timestamp_columns: HashSet<String>,
    primary_key: Option<Vec<String>>,
    foreign_keys: Vec<ForeignKeyConstraint>,
}

impl CreateTableBuilder<WithoutName> {
    pub fn new() -> Self {
        CreateTableBuilder::default()
    }
}

impl<RequireName> CreateTableBuilder<RequireName> {
    pub fn name<S: Into<String>>(self, name: S) -> CreateTableBuilder<WithName> {
        CreateTableBuilder {
            name: WithName(name.into()),
            catalog: self.catalog,
            schema: self.schema,
            columns: self.columns,
            column_types: self.column_types,
            not_null_columns: self.not_null_columns,
            commit_timestamp_columns: self.commit_timestamp_columns,
            primary_key: self.primary_key,
            foreign_keys: self.foreign_keys,
        }
    }

    pub fn catalog<S: Into<String>>(mut self, catalog: S) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn schema<S: Into<String>>(mut self, schema: S) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Declare a column; declaration order is the DDL output order
    pub fn column<S: Into<String>, T: Into<DataType>>(mut self, name: S, data_type: T) -> Self {
        let name = name.into();
        self.columns.push(name.clone());
        self.column_types.insert(name, data_type.into());
        self
    }

    /// Mark a declared column NOT NULL
    pub fn not_null<S: Into<String>>(mut self, column: S) -> Self {
        self.not_null_columns.insert(column.into());
        self
    }

    /// Mark a declared column to receive the commit-timestamp option, the
    /// dialect substitute for auto-increment
    pub fn commit_timestamp<S: Into<String>>(mut self, column: S) -> Self {
        self.commit_timestamp_columns.insert(column.into());
        self
    }

    pub fn primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn foreign_key(mut self, constraint: ForeignKeyConstraint) -> Self {
        self.foreign_keys.push(constraint);
        self
    }
}

impl<RequireName, S: Into<String>, T: Into<DataType>> With<(S, T)>
    for CreateTableBuilder<RequireName>
{
    fn with(self, (name, data_type): (S, T)) -> Self {
        self.column(name, data_type)
    }
}

impl<RequireName> With<ForeignKeyConstraint> for CreateTableBuilder<RequireName> {
    fn with(self, constraint: ForeignKeyConstraint) -> Self {
        self.foreign_key(constraint)
    }
}

impl Ready<CreateTableStatement> for CreateTableBuilder<WithName> {
    type Error = Error;

    fn try_build(self) -> Result<CreateTableStatement> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column) {
                return Err(Error::invalid_statement(format!(
                    "column {} is declared twice",
                    column
                )));
            }
        }
        for column in self
            .not_null_columns
            .iter()
            .chain(&self.commit_timestamp_columns)
        {
            if !self.column_types.contains_key(column) {
                return Err(Error::unknown_column(column));
            }
        }
        if let Some(primary_key) = &self.primary_key {
            if primary_key.is_empty() {
                return Err(Error::invalid_statement("the primary key has no column"));
            }
            for column in primary_key {
                if !self.column_types.contains_key(column) {
                    return Err(Error::unknown_column(column));
                }
            }
        }
        Ok(CreateTableStatement {
            catalog: self.catalog,
            schema: self.schema,
            table: self.name.0,
            columns: self.columns,
            column_types: self.column_types,
            not_null_columns: self.not_null_columns,
            commit_timestamp_columns: self.commit_timestamp_columns,
            primary_key: self.primary_key,
            foreign_keys: self.foreign_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WithIterator;

    #[test]
    fn test_build() {
        let statement = CreateTableStatement::builder()
            .name("t1")
            .with_iter([("id", DataType::Int64), ("name", DataType::string())])
            .not_null("id")
            .primary_key(["id"])
            .build();
        assert_eq!(statement.columns(), ["id", "name"]);
    }

    #[test]
    fn test_duplicate_column() {
        let result = CreateTableStatement::builder()
            .name("t1")
            .column("id", DataType::Int64)
            .column("id", DataType::string())
            .try_build();
        assert!(result.is_err());
    }

    #[test]
    fn test_marker_on_undeclared_column() {
        let result = CreateTableStatement::builder()
            .name("t1")
            .column("id", DataType::Int64)
            .commit_timestamp("updated_at")
            .try_build();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_primary_key() {
        let result = CreateTableStatement::builder()
            .name("t1")
            .column("id", DataType::Int64)
            .primary_key(Vec::<String>::new())
            .try_build();
        assert!(result.is_err());
    }

    #[test]
    fn test_primary_key_on_undeclared_column() {
        let result = CreateTableStatement::builder()
            .name("t1")
            .column("id", DataType::Int64)
            .primary_key(["uid"])
            .try_build();
        assert!(result.is_err());
    }
}
