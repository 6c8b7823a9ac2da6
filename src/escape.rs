//! # Identifier escaping policies
//!
//! An [`EscapingPolicy`] captures what a target dialect accepts around names:
//! the quote character, whether identifiers are quoted systematically or only
//! when they have to be, which qualifiers (catalog, schema) the dialect
//! supports, and how unqualified reference strings pick up the session default
//! schema. Policies are plain values handed to the translators; they hold no
//! state of their own.
//!

use itertools::Itertools;
use sqlparser::ast;

/// The kind of object a name designates, for kind-dependent quoting rules
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ObjectKind {
    Catalog,
    Schema,
    Table,
    Column,
}

/// When identifiers get quoted
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Quoting {
    /// Quote only identifiers the dialect could not accept bare
    WhenNeeded,
    /// Quote every identifier
    Always,
}

/// Words that cannot appear bare as a table or column name
const RESERVED_WORDS: &[&str] = &[
    "ALL", "AND", "AS", "BETWEEN", "BY", "CASE", "CAST", "CREATE", "CROSS", "DEFAULT", "DELETE",
    "DISTINCT", "DROP", "ELSE", "EXISTS", "FALSE", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING",
    "IN", "INDEX", "INNER", "INSERT", "INTERVAL", "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE",
    "LIMIT", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RIGHT",
    "SELECT", "SET", "TABLE", "THEN", "TRUE", "UNION", "UPDATE", "VALUES", "WHEN", "WHERE", "WITH",
];

/// The escaping and qualification rules of one dialect
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscapingPolicy {
    quote: char,
    quoting: Quoting,
    supports_catalogs: bool,
    supports_schemas: bool,
    default_schema: Option<String>,
    output_default_schema: bool,
}

impl EscapingPolicy {
    /// Spanner quotes with backticks and takes no qualifier on object names
    pub fn spanner() -> EscapingPolicy {
        EscapingPolicy {
            quote: '`',
            quoting: Quoting::WhenNeeded,
            supports_catalogs: false,
            supports_schemas: false,
            default_schema: None,
            output_default_schema: false,
        }
    }

    pub fn ansi() -> EscapingPolicy {
        EscapingPolicy {
            quote: '"',
            quoting: Quoting::WhenNeeded,
            supports_catalogs: true,
            supports_schemas: true,
            default_schema: None,
            output_default_schema: true,
        }
    }

    pub fn postgresql() -> EscapingPolicy {
        EscapingPolicy {
            supports_catalogs: false,
            ..EscapingPolicy::ansi()
        }
    }

    pub fn with_quoting(mut self, quoting: Quoting) -> EscapingPolicy {
        self.quoting = quoting;
        self
    }

    pub fn with_default_schema<S: Into<String>>(mut self, schema: S) -> EscapingPolicy {
        self.default_schema = Some(schema.into());
        self
    }

    pub fn with_output_default_schema(mut self, output: bool) -> EscapingPolicy {
        self.output_default_schema = output;
        self
    }

    pub fn default_schema(&self) -> Option<&str> {
        self.default_schema.as_deref()
    }

    pub fn output_default_schema(&self) -> bool {
        self.output_default_schema
    }

    /// Quote a single identifier when the policy calls for it
    pub fn escape(&self, name: &str, kind: ObjectKind) -> String {
        self.ident(name, kind).to_string()
    }

    /// Escape a possibly qualified name, dropping the qualifiers the dialect
    /// does not support
    pub fn escape_qualified(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        name: &str,
        kind: ObjectKind,
    ) -> String {
        let mut idents = Vec::new();
        if self.supports_catalogs {
            if let Some(catalog) = catalog {
                idents.push(self.ident(catalog, ObjectKind::Catalog));
            }
        }
        if self.supports_schemas {
            if let Some(schema) = schema {
                idents.push(self.ident(schema, ObjectKind::Schema));
            }
        }
        idents.push(self.ident(name, kind));
        ast::ObjectName(idents).to_string()
    }

    /// Escape and comma-join a column name list
    pub fn escape_column_names<'a, I: IntoIterator<Item = &'a str>>(&self, columns: I) -> String {
        columns
            .into_iter()
            .map(|column| self.escape(column, ObjectKind::Column))
            .join(", ")
    }

    /// Qualify a pre-formatted references expression with the default schema.
    /// An expression that already carries a qualifier is returned unchanged.
    pub fn qualify_reference(&self, reference: &str) -> String {
        match &self.default_schema {
            Some(schema) if self.output_default_schema && !reference.contains('.') => {
                format!("{}.{}", self.escape(schema, ObjectKind::Schema), reference)
            }
            _ => reference.to_string(),
        }
    }

    fn ident(&self, name: &str, kind: ObjectKind) -> ast::Ident {
        let quoted = match self.quoting {
            Quoting::Always => true,
            Quoting::WhenNeeded => Self::needs_quote(name, kind),
        };
        if quoted {
            ast::Ident::with_quote(self.quote, name)
        } else {
            ast::Ident::new(name)
        }
    }

    fn needs_quote(name: &str, kind: ObjectKind) -> bool {
        let word_shaped = name
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !word_shaped {
            return true;
        }
        match kind {
            // Catalog and schema names come from configuration rather than
            // user DDL and stay bare when word-shaped
            ObjectKind::Catalog | ObjectKind::Schema => false,
            ObjectKind::Table | ObjectKind::Column => RESERVED_WORDS
                .iter()
                .any(|word| word.eq_ignore_ascii_case(name)),
        }
    }
}
