//! Runtime SQL values

use std::fmt;

use crate::data_type::DataType;

/// A runtime SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Double(f64),
    Varchar(String),
    Boolean(bool),
    Null,
}

impl SqlValue {
    /// The declared type this value matches during signature resolution.
    pub fn data_type(&self) -> DataType {
        match self {
            SqlValue::Integer(_) => DataType::Integer,
            SqlValue::Double(_) => DataType::DoublePrecision,
            SqlValue::Varchar(_) => DataType::Varchar { max_length: None },
            SqlValue::Boolean(_) => DataType::Boolean,
            SqlValue::Null => DataType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Double(d) => write!(f, "{}", d),
            SqlValue::Varchar(s) => write!(f, "{}", s),
            SqlValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            SqlValue::Null => write!(f, "NULL"),
        }
    }
}
