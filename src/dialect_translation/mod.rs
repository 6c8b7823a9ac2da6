//! # Translation of table creation statements into dialect DDL
//!
//! Each dialect is a unit struct implementing [`CreateTableTranslator`]. The
//! trait ships default methods producing ANSI-flavored DDL; a dialect
//! overrides the pieces where its syntax departs from that, the way
//! [`spanner::SpannerTranslator`] replaces the whole statement layout.
//!
//! Translators advertise which dialects they support and a selection
//! priority; [`translator_for`] resolves the translator for a dialect from a
//! static table, the highest-priority supporting translator winning. This
//! replaces runtime plugin discovery with a lookup decided at compile time.
//!

pub mod postgresql;
pub mod spanner;

use std::{error, fmt, result};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    data_type::{self, DataType},
    escape::{EscapingPolicy, ObjectKind},
    statement::{self, CreateTableStatement, ForeignKeyConstraint, ForeignKeyReference},
};

pub use postgresql::PostgreSqlTranslator;
pub use spanner::SpannerTranslator;

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    UnsupportedType(String),
    InvalidStatement(String),
    Other(String),
}

impl Error {
    pub fn unsupported_type(data_type: impl fmt::Display, dialect: impl fmt::Display) -> Error {
        Error::UnsupportedType(format!("{} cannot be rendered for {}", data_type, dialect))
    }
    pub fn other<T: fmt::Display>(desc: T) -> Error {
        Error::Other(desc.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedType(desc) => writeln!(f, "UnsupportedType: {}", desc),
            Error::InvalidStatement(desc) => writeln!(f, "InvalidStatement: {}", desc),
            Error::Other(err) => writeln!(f, "{}", err),
        }
    }
}

impl error::Error for Error {}

impl From<data_type::Error> for Error {
    fn from(err: data_type::Error) -> Self {
        Error::Other(err.to_string())
    }
}
impl From<statement::Error> for Error {
    fn from(err: statement::Error) -> Self {
        Error::InvalidStatement(err.to_string())
    }
}

pub type Result<T> = result::Result<T, Error>;

/// The target dialects known to the selection table
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    GenericSql,
    Spanner,
    PostgreSql,
}

impl Dialect {
    /// The escaping policy the dialect ships with
    pub fn escaping_policy(&self) -> EscapingPolicy {
        match self {
            Dialect::GenericSql => EscapingPolicy::ansi(),
            Dialect::Spanner => EscapingPolicy::spanner(),
            Dialect::PostgreSql => EscapingPolicy::postgresql(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::GenericSql => write!(f, "generic SQL"),
            Dialect::Spanner => write!(f, "Spanner"),
            Dialect::PostgreSql => write!(f, "PostgreSQL"),
        }
    }
}

/// A DDL statement together with the table it belongs to, so the host can
/// keep its dependency bookkeeping across statements
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ddl {
    sql: String,
    table: String,
}

impl Ddl {
    pub fn new<S: Into<String>, T: Into<String>>(sql: S, table: T) -> Ddl {
        Ddl {
            sql: sql.into(),
            table: table.into(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

impl fmt::Display for Ddl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Priority of the fallback translator
pub const PRIORITY_DEFAULT: i32 = 1;
/// Priority of a dialect-specific translator
pub const PRIORITY_DIALECT: i32 = 5;

/// Trait for rendering a [`CreateTableStatement`] as dialect DDL.
/// Translators are stateless: `translate` only reads its inputs and is safe
/// to call concurrently for independent statements.
pub trait CreateTableTranslator: Sync {
    /// Whether this translator can produce DDL for the dialect
    fn supports(&self, dialect: Dialect) -> bool;

    /// Selection priority, the highest supporting translator wins
    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    /// Render a column type for the dialect
    fn data_type(&self, data_type: &DataType) -> Result<String>;

    /// The clause appended to columns marked for generated values
    fn auto_increment_clause(&self) -> &str;

    /// The escaped name under which the table is created
    fn created_table_name(
        &self,
        statement: &CreateTableStatement,
        policy: &EscapingPolicy,
    ) -> String {
        policy.escape_qualified(
            statement.catalog(),
            statement.schema(),
            statement.table(),
            ObjectKind::Table,
        )
    }

    /// `<name> <type>`, followed by the nullability and generated-value
    /// clauses when the column carries them
    fn column_definition(
        &self,
        statement: &CreateTableStatement,
        column: &str,
        policy: &EscapingPolicy,
    ) -> Result<String> {
        let mut definition = format!(
            "{} {}",
            policy.escape(column, ObjectKind::Column),
            self.data_type(statement.column_type(column)?)?
        );
        if statement.is_not_null(column) {
            definition.push_str(" NOT NULL");
        }
        if statement.is_commit_timestamp(column) {
            definition.push(' ');
            definition.push_str(self.auto_increment_clause());
        }
        Ok(definition)
    }

    /// The text following `REFERENCES` for a foreign key. A raw references
    /// expression is qualified with the policy's default schema when it
    /// carries no qualifier of its own; a decomposed reference is escaped and
    /// rendered as `table(columns)`.
    fn foreign_key_reference(
        &self,
        constraint: &ForeignKeyConstraint,
        policy: &EscapingPolicy,
    ) -> String {
        match constraint.reference() {
            ForeignKeyReference::Raw(references) => policy.qualify_reference(references),
            ForeignKeyReference::Columns {
                catalog,
                schema,
                table,
                columns,
            } => format!(
                "{}({})",
                policy.escape_qualified(
                    catalog.as_deref(),
                    schema.as_deref(),
                    table,
                    ObjectKind::Table
                ),
                policy.escape_column_names(columns.iter().map(String::as_str)),
            ),
        }
    }

    /// Translate the statement into DDL. The default implementation produces
    /// the ANSI layout with every constraint inside the parenthesized list.
    /// Exactly one statement is returned; the `Vec` leaves room for dialects
    /// needing auxiliary statements.
    fn translate(
        &self,
        statement: &CreateTableStatement,
        policy: &EscapingPolicy,
    ) -> Result<Vec<Ddl>> {
        log::debug!("translating CREATE TABLE for {}", statement);
        let mut items = statement
            .columns()
            .iter()
            .map(|column| self.column_definition(statement, column, policy))
            .collect::<Result<Vec<String>>>()?;
        if let Some(primary_key) = statement.primary_key().filter(|columns| !columns.is_empty()) {
            items.push(format!(
                "PRIMARY KEY ({})",
                policy.escape_column_names(primary_key.iter().map(String::as_str))
            ));
        }
        for constraint in statement.foreign_keys() {
            items.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}",
                policy.escape(constraint.column(), ObjectKind::Column),
                self.foreign_key_reference(constraint, policy)
            ));
        }
        let sql = format!(
            "CREATE TABLE {} ({})",
            self.created_table_name(statement, policy),
            items.iter().join(", ")
        );
        Ok(vec![Ddl::new(sql, statement.table())])
    }
}

/// The fallback translator producing ANSI-flavored DDL
#[derive(Clone, Copy, Debug)]
pub struct GenericSqlTranslator;

impl CreateTableTranslator for GenericSqlTranslator {
    fn supports(&self, _dialect: Dialect) -> bool {
        true
    }

    fn data_type(&self, data_type: &DataType) -> Result<String> {
        Ok(match data_type {
            DataType::Bool => "BOOLEAN".into(),
            DataType::Int64 => "BIGINT".into(),
            DataType::Float64 => "DOUBLE PRECISION".into(),
            DataType::Numeric => "NUMERIC".into(),
            DataType::Date => "DATE".into(),
            DataType::Timestamp => "TIMESTAMP".into(),
            DataType::String(Some(size)) => format!("VARCHAR({})", size),
            DataType::String(None) => "TEXT".into(),
            DataType::Bytes(Some(size)) => format!("VARBINARY({})", size),
            DataType::Bytes(None) => "BLOB".into(),
            DataType::Json | DataType::Array(_) => {
                return Err(Error::unsupported_type(data_type, Dialect::GenericSql))
            }
        })
    }

    fn auto_increment_clause(&self) -> &str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }
}

/// The translators the selection goes through
static TRANSLATORS: &[&dyn CreateTableTranslator] =
    &[&GenericSqlTranslator, &SpannerTranslator, &PostgreSqlTranslator];

/// Resolve the translator for a dialect from the selection table
pub fn translator_for(dialect: Dialect) -> &'static dyn CreateTableTranslator {
    TRANSLATORS
        .iter()
        .filter(|translator| translator.supports(dialect))
        .max_by_key(|translator| translator.priority())
        .copied()
        .unwrap_or(&GenericSqlTranslator)
}

/// Translate a statement with the dialect's own escaping policy
pub fn translate(dialect: Dialect, statement: &CreateTableStatement) -> Result<Vec<Ddl>> {
    translator_for(dialect).translate(statement, &dialect.escaping_policy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::Ready, statement::ForeignKeyConstraint};

    fn orders() -> CreateTableStatement {
        CreateTableStatement::builder()
            .name("orders")
            .schema("sales")
            .column("id", DataType::Int64)
            .column("label", DataType::sized_string(40))
            .not_null("id")
            .primary_key(["id"])
            .build()
    }

    #[test]
    fn test_generic_layout() -> Result<()> {
        let ddl = translate(Dialect::GenericSql, &orders())?;
        assert_eq!(ddl.len(), 1);
        assert_eq!(
            ddl[0].sql(),
            "CREATE TABLE sales.orders (id BIGINT NOT NULL, label VARCHAR(40), PRIMARY KEY (id))"
        );
        assert_eq!(ddl[0].table(), "orders");
        Ok(())
    }

    #[test]
    fn test_generic_auto_increment() -> Result<()> {
        let statement = CreateTableStatement::builder()
            .name("events")
            .column("id", DataType::Int64)
            .commit_timestamp("id")
            .build();
        let ddl = translate(Dialect::GenericSql, &statement)?;
        assert_eq!(
            ddl[0].sql(),
            "CREATE TABLE events (id BIGINT GENERATED BY DEFAULT AS IDENTITY)"
        );
        Ok(())
    }

    #[test]
    fn test_generic_foreign_key() -> Result<()> {
        let statement = CreateTableStatement::builder()
            .name("items")
            .column("order_id", DataType::Int64)
            .foreign_key(ForeignKeyConstraint::columns("order_id", "orders", ["id"]))
            .build();
        let ddl = translate(Dialect::GenericSql, &statement)?;
        assert_eq!(
            ddl[0].sql(),
            "CREATE TABLE items (order_id BIGINT, FOREIGN KEY (order_id) REFERENCES orders(id))"
        );
        Ok(())
    }

    #[test]
    fn test_generic_unsupported_type() {
        let statement = CreateTableStatement::builder()
            .name("documents")
            .column("payload", DataType::Json)
            .build();
        let result = translate(Dialect::GenericSql, &statement);
        assert!(matches!(result, Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn test_selection() {
        assert_eq!(
            translator_for(Dialect::Spanner).priority(),
            PRIORITY_DIALECT
        );
        assert_eq!(
            translator_for(Dialect::PostgreSql).priority(),
            PRIORITY_DIALECT
        );
        assert_eq!(
            translator_for(Dialect::GenericSql).priority(),
            PRIORITY_DEFAULT
        );
    }

    #[test]
    fn test_selection_dispatches_by_dialect() -> Result<()> {
        let statement = CreateTableStatement::builder()
            .name("t")
            .column("id", DataType::Int64)
            .primary_key(["id"])
            .build();
        // The Spanner translator moves the primary key after the column list
        let spanner = translate(Dialect::Spanner, &statement)?;
        assert!(spanner[0].sql().ends_with(") PRIMARY KEY (id)"));
        let generic = translate(Dialect::GenericSql, &statement)?;
        assert!(generic[0].sql().ends_with("PRIMARY KEY (id))"));
        Ok(())
    }

    #[test]
    fn test_missing_column_type_propagates() {
        // A statement deserialized from an inconsistent document fails in the
        // type lookup, not in the translator
        let serialized = r#"{
            "catalog": null,
            "schema": null,
            "table": "t1",
            "columns": ["id", "name"],
            "column_types": {"id": "Int64"},
            "not_null_columns": [],
            "commit_timestamp_columns": [],
            "primary_key": null,
            "foreign_keys": []
        }"#;
        let statement: CreateTableStatement = serde_json::from_str(serialized).unwrap();
        let result = translate(Dialect::Spanner, &statement);
        assert!(matches!(result, Err(Error::InvalidStatement(_))));
    }
}
