//! Database catalog store - manages schemas, modules, routines, and roles.
//!
//! This module provides the main `Catalog` struct and is organized into
//! submodules by responsibility:
//!
//! - `schemas` - Schema management operations
//! - `modules` - Module rows and their (schema, name) uniqueness
//! - `routines` - Routine rows, overload sets, replace semantics
//! - `privileges` - Roles, grants, and privilege checks
//! - `session` - Search path and creation-namespace resolution state

use std::collections::{HashMap, HashSet};

use crate::{
    dependency::DependencyGraph,
    ids::{ModuleId, NamespaceId, RoutineId, SchemaId},
    module::Module,
    routine::Routine,
    schema::Schema,
};

mod modules;
mod privileges;
mod routines;
mod schemas;
mod session;

pub use session::ResolutionContext;

/// Role that bootstraps the catalog and owns the default schema.
pub(crate) const BOOTSTRAP_ROLE: &str = "admin";

/// Database catalog - manages all schemas and their objects.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) next_oid: u32,
    pub(crate) schemas: HashMap<SchemaId, Schema>,
    pub(crate) schema_names: HashMap<String, SchemaId>,
    pub(crate) modules: HashMap<ModuleId, Module>,
    /// Uniqueness index: (parent schema, module name) -> module
    pub(crate) module_names: HashMap<(SchemaId, String), ModuleId>,
    pub(crate) routines: HashMap<RoutineId, Routine>,
    /// Overload index: (namespace, routine name) -> candidate set
    pub(crate) routine_names: HashMap<(NamespaceId, String), Vec<RoutineId>>,
    pub(crate) roles: HashSet<String>,
    pub(crate) superusers: HashSet<String>,
    /// group role -> member roles
    pub(crate) role_members: HashMap<String, HashSet<String>>,
    pub(crate) dependencies: DependencyGraph,
    // Session resolution state
    pub(crate) current_schema: String,
    pub(crate) search_path: Vec<NamespaceId>,
    pub(crate) creation_namespace: Option<NamespaceId>,
}

impl Catalog {
    /// Create a new catalog with the bootstrap role and a default "public"
    /// schema on the search path.
    pub fn new() -> Self {
        let mut catalog = Catalog {
            next_oid: 1,
            schemas: HashMap::new(),
            schema_names: HashMap::new(),
            modules: HashMap::new(),
            module_names: HashMap::new(),
            routines: HashMap::new(),
            routine_names: HashMap::new(),
            roles: HashSet::new(),
            superusers: HashSet::new(),
            role_members: HashMap::new(),
            dependencies: DependencyGraph::new(),
            current_schema: "public".to_string(),
            search_path: Vec::new(),
            creation_namespace: None,
        };

        catalog.roles.insert(BOOTSTRAP_ROLE.to_string());
        catalog.superusers.insert(BOOTSTRAP_ROLE.to_string());

        let public_id = catalog.allocate_oid();
        let public = Schema::new(
            SchemaId(public_id),
            "public".to_string(),
            BOOTSTRAP_ROLE.to_string(),
        );
        catalog.schema_names.insert("public".to_string(), public.id);
        catalog.search_path.push(NamespaceId::Schema(public.id));
        catalog.schemas.insert(public.id, public);

        catalog
    }

    /// Allocate the next object id.
    pub(crate) fn allocate_oid(&mut self) -> u32 {
        let oid = self.next_oid;
        self.next_oid += 1;
        oid
    }

    /// Access the dependency graph.
    pub fn dependencies(&self) -> &DependencyGraph {
        &self.dependencies
    }

    /// Mutable access to the dependency graph.
    pub fn dependencies_mut(&mut self) -> &mut DependencyGraph {
        &mut self.dependencies
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
