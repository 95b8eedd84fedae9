//! SQL data types

use std::fmt;

/// SQL data types for routine parameters and return values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    // Exact numeric types
    Integer,
    Smallint,
    Bigint,

    // Approximate numeric types
    DoublePrecision,

    // Character string types
    Character { length: usize },
    Varchar { max_length: Option<usize> },

    // Boolean type (SQL:1999)
    Boolean,

    /// Absence of a declared type (untyped NULL)
    Null,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Smallint => write!(f, "SMALLINT"),
            DataType::Bigint => write!(f, "BIGINT"),
            DataType::DoublePrecision => write!(f, "DOUBLE PRECISION"),
            DataType::Character { length } => write!(f, "CHARACTER({})", length),
            DataType::Varchar { max_length: Some(n) } => write!(f, "VARCHAR({})", n),
            DataType::Varchar { max_length: None } => write!(f, "VARCHAR"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Null => write!(f, "NULL"),
        }
    }
}
