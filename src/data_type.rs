//! # Column type descriptors
//!
//! The dialect-agnostic description of column types. Rendering a `DataType` as
//! dialect text is the job of the translators in [crate::dialect_translation];
//! this module only names the types and parses the generic spellings a
//! migration changelog carries (`bigint`, `varchar(40)`, `array<int64>`, ...).
//!

use std::{error, fmt, result, str::FromStr};

use serde::{Deserialize, Serialize};

// Error management

#[derive(Debug, Clone)]
pub enum Error {
    UnknownType(String),
    Other(String),
}

impl Error {
    pub fn unknown_type(name: impl fmt::Display) -> Error {
        Error::UnknownType(format!("Cannot interpret {} as a column type", name))
    }
    pub fn other<T: fmt::Display>(desc: T) -> Error {
        Error::Other(desc.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownType(desc) => writeln!(f, "UnknownType: {}", desc),
            Error::Other(err) => writeln!(f, "{}", err),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// A column type, named after the storage types of the primary target dialect
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int64,
    Float64,
    Numeric,
    Date,
    Timestamp,
    Json,
    /// Variable length text, unbounded when no size is given
    String(Option<u32>),
    /// Variable length binary, unbounded when no size is given
    Bytes(Option<u32>),
    Array(Box<DataType>),
}

impl DataType {
    pub fn string() -> DataType {
        DataType::String(None)
    }

    pub fn sized_string(size: u32) -> DataType {
        DataType::String(Some(size))
    }

    pub fn bytes() -> DataType {
        DataType::Bytes(None)
    }

    pub fn array<T: Into<DataType>>(element: T) -> DataType {
        DataType::Array(Box::new(element.into()))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "bool"),
            DataType::Int64 => write!(f, "int64"),
            DataType::Float64 => write!(f, "float64"),
            DataType::Numeric => write!(f, "numeric"),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp"),
            DataType::Json => write!(f, "json"),
            DataType::String(Some(size)) => write!(f, "string({})", size),
            DataType::String(None) => write!(f, "string"),
            DataType::Bytes(Some(size)) => write!(f, "bytes({})", size),
            DataType::Bytes(None) => write!(f, "bytes"),
            DataType::Array(element) => write!(f, "array<{}>", element),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<DataType> {
        let normalized = s.trim().to_lowercase();
        if let Some(element) = normalized
            .strip_prefix("array<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return Ok(DataType::Array(Box::new(element.parse()?)));
        }
        let (name, size) = match normalized.split_once('(') {
            Some((name, rest)) => {
                let size = rest
                    .strip_suffix(')')
                    .ok_or_else(|| Error::unknown_type(s))?;
                (name.trim(), Some(size.trim()))
            }
            None => (normalized.as_str(), None),
        };
        let size = match size {
            Some("max") | None => None,
            Some(size) => Some(size.parse::<u32>().map_err(|_| Error::unknown_type(s))?),
        };
        match name {
            "bool" | "boolean" => Ok(DataType::Bool),
            "int64" | "bigint" | "int" | "integer" => Ok(DataType::Int64),
            "float64" | "double" | "double precision" | "float" => Ok(DataType::Float64),
            "numeric" | "decimal" => Ok(DataType::Numeric),
            "date" => Ok(DataType::Date),
            "timestamp" | "datetime" => Ok(DataType::Timestamp),
            "json" | "jsonb" => Ok(DataType::Json),
            "string" | "varchar" | "nvarchar" | "text" | "clob" => Ok(DataType::String(size)),
            "bytes" | "blob" | "varbinary" => Ok(DataType::Bytes(size)),
            _ => Err(Error::unknown_type(s)),
        }
    }
}
