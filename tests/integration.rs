use spandl::{
    escape::Quoting, setup, translate, translator_for, CreateTableStatement, DataType, Dialect,
    EscapingPolicy, ForeignKeyConstraint, Ready, WithIterator,
};

/// A migration step as a host framework would assemble it
fn albums() -> CreateTableStatement {
    CreateTableStatement::builder()
        .name("albums")
        .schema("music")
        .with_iter([
            ("id", DataType::Int64),
            ("title", DataType::sized_string(255)),
            ("release_date", DataType::Date),
            ("singer_id", DataType::Int64),
        ])
        .not_null("id")
        .not_null("title")
        .primary_key(["id"])
        .foreign_key(ForeignKeyConstraint::columns("singer_id", "singers", ["id"]))
        .build()
}

const EXPECTED: &[(Dialect, &str)] = &[
    (
        Dialect::Spanner,
        "CREATE TABLE albums (id INT64 NOT NULL, title STRING(255) NOT NULL, release_date DATE, singer_id INT64) FOREIGN KEY (singer_id) REFERENCES singers(id) PRIMARY KEY (id)",
    ),
    (
        Dialect::GenericSql,
        "CREATE TABLE music.albums (id BIGINT NOT NULL, title VARCHAR(255) NOT NULL, release_date DATE, singer_id BIGINT, PRIMARY KEY (id), FOREIGN KEY (singer_id) REFERENCES singers(id))",
    ),
    (
        Dialect::PostgreSql,
        "CREATE TABLE music.albums (id BIGINT NOT NULL, title VARCHAR(255) NOT NULL, release_date DATE, singer_id BIGINT, PRIMARY KEY (id), FOREIGN KEY (singer_id) REFERENCES singers(id))",
    ),
];

#[test]
fn test_dialects() {
    setup::init();
    let statement = albums();
    for (dialect, expected) in EXPECTED {
        let ddl = translate(*dialect, &statement).unwrap();
        assert_eq!(ddl.len(), 1);
        assert_eq!(ddl[0].sql(), *expected, "{}", dialect);
        assert_eq!(ddl[0].table(), "albums");
    }
}

#[test]
fn test_statement_from_json_changeset() {
    // A statement can come out of a serialized changeset document instead of
    // the builder
    let changeset = r#"{
        "catalog": null,
        "schema": null,
        "table": "venues",
        "columns": ["id", "name", "updated_at"],
        "column_types": {
            "id": "Int64",
            "name": {"String": 100},
            "updated_at": "Timestamp"
        },
        "not_null_columns": ["id"],
        "commit_timestamp_columns": ["updated_at"],
        "primary_key": ["id"],
        "foreign_keys": [{"column": "id", "reference": {"Raw": "events"}}]
    }"#;
    let statement: CreateTableStatement = serde_json::from_str(changeset).unwrap();
    let ddl = translate(Dialect::Spanner, &statement).unwrap();
    assert_eq!(
        ddl[0].sql(),
        "CREATE TABLE venues (id INT64 NOT NULL, name STRING(100), updated_at TIMESTAMP OPTIONS ( allow_commit_timestamp = true )) FOREIGN KEY (id) REFERENCES events PRIMARY KEY (id)"
    );
}

#[test]
fn test_systematic_quoting() {
    let statement = CreateTableStatement::builder()
        .name("t")
        .column("id", DataType::Int64)
        .primary_key(["id"])
        .build();
    let policy = EscapingPolicy::spanner().with_quoting(Quoting::Always);
    let ddl = translator_for(Dialect::Spanner)
        .translate(&statement, &policy)
        .unwrap();
    assert_eq!(ddl[0].sql(), "CREATE TABLE `t` (`id` INT64) PRIMARY KEY (`id`)");
}

#[test]
fn test_selection_table() {
    assert!(translator_for(Dialect::Spanner).supports(Dialect::Spanner));
    assert!(!translator_for(Dialect::Spanner).supports(Dialect::PostgreSql));
    assert!(translator_for(Dialect::GenericSql).supports(Dialect::Spanner));
}
