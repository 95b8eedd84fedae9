//! ModSQL - SQL module catalog and command processor
//!
//! This is the root crate that re-exports all components.

pub use modsql_ast as ast;
pub use modsql_catalog as catalog;
pub use modsql_executor as executor;
pub use modsql_storage as storage;
pub use modsql_types as types;
