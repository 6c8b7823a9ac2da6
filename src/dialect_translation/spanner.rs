//! The Spanner dialect.
//!
//! Spanner's `CREATE TABLE` departs from the ANSI layout in a few ways, see
//! https://cloud.google.com/spanner/docs/data-definition-language#ddl_syntax
//! - the primary key sits after the closing parenthesis of the column list
//! - foreign keys are appended inline after the column list
//! - there is no auto-increment; columns marked for generated values get the
//!   commit-timestamp option instead
//! - the created table takes no catalog or schema qualifier
//!

use super::{CreateTableTranslator, Ddl, Dialect, Result, PRIORITY_DIALECT};
use crate::{
    data_type::DataType,
    escape::{EscapingPolicy, ObjectKind},
    statement::CreateTableStatement,
};

#[derive(Clone, Copy, Debug)]
pub struct SpannerTranslator;

impl CreateTableTranslator for SpannerTranslator {
    fn supports(&self, dialect: Dialect) -> bool {
        matches!(dialect, Dialect::Spanner)
    }

    fn priority(&self) -> i32 {
        PRIORITY_DIALECT
    }

    fn data_type(&self, data_type: &DataType) -> Result<String> {
        Ok(match data_type {
            DataType::Bool => "BOOL".into(),
            DataType::Int64 => "INT64".into(),
            DataType::Float64 => "FLOAT64".into(),
            DataType::Numeric => "NUMERIC".into(),
            DataType::Date => "DATE".into(),
            DataType::Timestamp => "TIMESTAMP".into(),
            DataType::Json => "JSON".into(),
            DataType::String(Some(size)) => format!("STRING({})", size),
            DataType::String(None) => "STRING".into(),
            DataType::Bytes(Some(size)) => format!("BYTES({})", size),
            DataType::Bytes(None) => "BYTES".into(),
            DataType::Array(element) => format!("ARRAY<{}>", self.data_type(element)?),
        })
    }

    /// The commit timestamp stands in for auto-increment, which the dialect
    /// does not have
    fn auto_increment_clause(&self) -> &str {
        "OPTIONS ( allow_commit_timestamp = true )"
    }

    /// Catalog and schema qualifiers are not supported on created tables,
    /// whatever the statement carries
    fn created_table_name(
        &self,
        statement: &CreateTableStatement,
        policy: &EscapingPolicy,
    ) -> String {
        policy.escape(statement.table(), ObjectKind::Table)
    }

    fn translate(
        &self,
        statement: &CreateTableStatement,
        policy: &EscapingPolicy,
    ) -> Result<Vec<Ddl>> {
        log::debug!("translating CREATE TABLE for {} as Spanner DDL", statement);
        let mut buffer = String::from("CREATE TABLE ");
        buffer.push_str(&self.created_table_name(statement, policy));
        buffer.push_str(" (");
        let mut columns = statement.columns().iter().peekable();
        while let Some(column) = columns.next() {
            buffer.push_str(&self.column_definition(statement, column, policy)?);
            if columns.peek().is_some() {
                buffer.push_str(", ");
            }
        }
        buffer.push(')');
        // Foreign keys sit outside the column list; the separator is a bare
        // comma, the leading space belongs to the next clause
        let mut constraints = statement.foreign_keys().iter().peekable();
        while let Some(constraint) = constraints.next() {
            buffer.push_str(" FOREIGN KEY (");
            buffer.push_str(&policy.escape(constraint.column(), ObjectKind::Column));
            buffer.push_str(") REFERENCES ");
            buffer.push_str(&self.foreign_key_reference(constraint, policy));
            if constraints.peek().is_some() {
                buffer.push(',');
            }
        }
        // The primary key comes after the closing parenthesis
        if let Some(primary_key) = statement.primary_key().filter(|columns| !columns.is_empty()) {
            buffer.push_str(" PRIMARY KEY (");
            buffer.push_str(&policy.escape_column_names(primary_key.iter().map(String::as_str)));
            buffer.push(')');
        }
        Ok(vec![Ddl::new(buffer, statement.table())])
    }
}
