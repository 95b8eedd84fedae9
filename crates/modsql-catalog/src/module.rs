//! Module - Schema-scoped container for routines

use crate::{
    acl::AclEntry,
    ids::{ModuleId, SchemaId},
};

/// A module row.
///
/// The module is itself an object inside its parent schema, addressable only
/// through that schema, and at the same time acts as the namespace for its
/// member routines.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    /// Unique within the parent schema
    pub name: String,
    pub schema: SchemaId,
    pub owner: String,
    /// Module-level ACL; the only grantable kind on a module is CREATE
    pub acl: Vec<AclEntry>,
}

impl Module {
    pub fn new(id: ModuleId, name: String, schema: SchemaId, owner: String) -> Self {
        Module { id, name, schema, owner, acl: Vec::new() }
    }
}
