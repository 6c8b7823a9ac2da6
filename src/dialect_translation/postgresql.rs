use super::{CreateTableTranslator, Dialect, Result, PRIORITY_DIALECT};
use crate::data_type::DataType;

#[derive(Clone, Copy)]
pub struct PostgreSqlTranslator;

impl CreateTableTranslator for PostgreSqlTranslator {
    fn supports(&self, dialect: Dialect) -> bool {
        matches!(dialect, Dialect::PostgreSql)
    }

    fn priority(&self) -> i32 {
        PRIORITY_DIALECT
    }

    fn data_type(&self, data_type: &DataType) -> Result<String> {
        Ok(match data_type {
            DataType::Bool => "BOOLEAN".into(),
            DataType::Int64 => "BIGINT".into(),
            DataType::Float64 => "DOUBLE PRECISION".into(),
            DataType::Numeric => "NUMERIC".into(),
            DataType::Date => "DATE".into(),
            DataType::Timestamp => "TIMESTAMPTZ".into(),
            DataType::Json => "JSONB".into(),
            DataType::String(Some(size)) => format!("VARCHAR({})", size),
            DataType::String(None) => "TEXT".into(),
            DataType::Bytes(_) => "BYTEA".into(),
            DataType::Array(element) => format!("{}[]", self.data_type(element)?),
        })
    }

    fn auto_increment_clause(&self) -> &str {
        "GENERATED BY DEFAULT AS IDENTITY"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::Ready, dialect_translation::translate, statement::CreateTableStatement,
    };

    #[test]
    fn test_types() -> Result<()> {
        let statement = CreateTableStatement::builder()
            .name("documents")
            .schema("app")
            .column("id", DataType::Int64)
            .column("payload", DataType::Json)
            .column("tags", DataType::array(DataType::string()))
            .not_null("id")
            .primary_key(["id"])
            .build();
        let ddl = translate(Dialect::PostgreSql, &statement)?;
        assert_eq!(
            ddl[0].sql(),
            "CREATE TABLE app.documents (id BIGINT NOT NULL, payload JSONB, tags TEXT[], PRIMARY KEY (id))"
        );
        Ok(())
    }

    #[test]
    fn test_identity_column() -> Result<()> {
        let statement = CreateTableStatement::builder()
            .name("events")
            .column("id", DataType::Int64)
            .not_null("id")
            .commit_timestamp("id")
            .build();
        let ddl = translate(Dialect::PostgreSql, &statement)?;
        assert_eq!(
            ddl[0].sql(),
            "CREATE TABLE events (id BIGINT NOT NULL GENERATED BY DEFAULT AS IDENTITY)"
        );
        Ok(())
    }
}
