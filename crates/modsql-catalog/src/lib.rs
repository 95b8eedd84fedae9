//! Catalog - Schema, Module, and Routine Metadata Storage
//!
//! Provides the catalog registry that tracks schemas, modules (schema-scoped
//! routine containers), routines, roles, privileges, and the dependency
//! edges between them.

mod acl;
mod dependency;
pub mod errors;
mod ids;
mod module;
mod routine;
mod schema;
mod store;

pub use acl::{acl_check, acl_grant, acl_new_owner, acl_revoke, AclEntry, PrivilegeSet, PUBLIC};
pub use dependency::{DependencyEdge, DependencyGraph, DependencyKind, ReferencedObject};
pub use errors::CatalogError;
pub use ids::{ModuleId, NamespaceId, ObjectId, RoutineId, SchemaId};
pub use module::Module;
pub use routine::{Routine, RoutineKind, RoutineParam};
pub use schema::Schema;
pub use store::{Catalog, ResolutionContext};
