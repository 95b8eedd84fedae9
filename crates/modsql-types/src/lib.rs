//! Types - Core SQL data types and runtime values
//!
//! Provides the `DataType` and `SqlValue` enums shared by the AST, catalog,
//! and executor crates.

mod data_type;
mod sql_value;

pub use data_type::DataType;
pub use sql_value::SqlValue;
