//! Schema - Named collection of database objects

use crate::{acl::AclEntry, ids::SchemaId};

/// A schema row: a top-level namespace with an owner and an ACL.
#[derive(Debug, Clone)]
pub struct Schema {
    pub id: SchemaId,
    pub name: String,
    pub owner: String,
    pub acl: Vec<AclEntry>,
}

impl Schema {
    pub fn new(id: SchemaId, name: String, owner: String) -> Self {
        Schema { id, name, owner, acl: Vec::new() }
    }
}
