//! Module row management.
//!
//! Enforces (schema, name) uniqueness and keeps the module's owner, ACL, and
//! owner-dependency edge mutually consistent across rename and ownership
//! transfer. Authorization is the caller's job; these operations only
//! maintain catalog state.

use crate::{
    acl::acl_new_owner,
    errors::CatalogError,
    ids::{ModuleId, NamespaceId, ObjectId, SchemaId},
    module::Module,
};

impl super::Catalog {
    /// Insert a module row.
    ///
    /// Records the module's owner dependency; the caller records the edge to
    /// the parent schema once the whole creating statement has succeeded.
    pub fn create_module(
        &mut self,
        name: String,
        schema: SchemaId,
        owner: String,
    ) -> Result<ModuleId, CatalogError> {
        let schema_name = self
            .schemas
            .get(&schema)
            .map(|s| s.name.clone())
            .ok_or_else(|| CatalogError::SchemaNotFound(format!("{}", schema)))?;
        if !self.roles.contains(&owner) {
            return Err(CatalogError::RoleNotFound(owner));
        }
        if self.module_names.contains_key(&(schema, name.clone())) {
            return Err(CatalogError::DuplicateModule { module_name: name, schema_name });
        }

        let id = ModuleId(self.allocate_oid());
        self.module_names.insert((schema, name.clone()), id);
        self.modules.insert(id, Module::new(id, name, schema, owner.clone()));
        self.dependencies.record_owner(ObjectId::Module(id), &owner);
        Ok(id)
    }

    /// Get a module by id.
    pub fn get_module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(&id)
    }

    pub(crate) fn get_module_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.get_mut(&id)
    }

    /// Look up a module id by (schema, name).
    pub fn module_id(&self, schema: SchemaId, name: &str) -> Option<ModuleId> {
        self.module_names.get(&(schema, name.to_string())).copied()
    }

    /// Check whether a module of this name exists directly in the schema.
    pub fn module_exists(&self, schema: SchemaId, name: &str) -> bool {
        self.module_id(schema, name).is_some()
    }

    /// Rename a module within its schema.
    pub fn rename_module(&mut self, id: ModuleId, new_name: &str) -> Result<(), CatalogError> {
        let (schema, old_name) = {
            let module = self
                .modules
                .get(&id)
                .ok_or_else(|| CatalogError::ModuleNotFound(format!("{}", id)))?;
            (module.schema, module.name.clone())
        };
        if self.module_names.contains_key(&(schema, new_name.to_string())) {
            let schema_name =
                self.schemas.get(&schema).map(|s| s.name.clone()).unwrap_or_default();
            return Err(CatalogError::DuplicateModule {
                module_name: new_name.to_string(),
                schema_name,
            });
        }
        self.module_names.remove(&(schema, old_name));
        self.module_names.insert((schema, new_name.to_string()), id);
        if let Some(module) = self.modules.get_mut(&id) {
            module.name = new_name.to_string();
        }
        Ok(())
    }

    /// Transfer module ownership.
    ///
    /// Returns `false` without touching anything when the new owner already
    /// owns the module, so a dump restore replaying the command is a no-op.
    /// Otherwise the owner column, the ACL's owner references, and the owner
    /// dependency edge are rewritten together.
    pub fn set_module_owner(
        &mut self,
        id: ModuleId,
        new_owner: &str,
    ) -> Result<bool, CatalogError> {
        if !self.roles.contains(new_owner) {
            return Err(CatalogError::RoleNotFound(new_owner.to_string()));
        }
        let module = self
            .modules
            .get_mut(&id)
            .ok_or_else(|| CatalogError::ModuleNotFound(format!("{}", id)))?;
        if module.owner == new_owner {
            return Ok(false);
        }
        let old_owner = std::mem::replace(&mut module.owner, new_owner.to_string());
        acl_new_owner(&mut module.acl, &old_owner, new_owner);
        self.dependencies.change_owner(ObjectId::Module(id), new_owner);
        Ok(true)
    }

    /// Remove a module row and its dependency edges.
    ///
    /// Fails if member routines remain; the caller drops them first (cascade)
    /// or surfaces the dependency violation.
    pub fn drop_module(&mut self, id: ModuleId) -> Result<(), CatalogError> {
        let module = self
            .modules
            .get(&id)
            .ok_or_else(|| CatalogError::ModuleNotFound(format!("{}", id)))?;
        let members = self.module_members(id);
        if !members.is_empty() {
            return Err(CatalogError::ModuleNotEmpty {
                module_name: module.name.clone(),
                member_count: members.len(),
            });
        }
        let schema = module.schema;
        let name = module.name.clone();
        self.module_names.remove(&(schema, name));
        self.modules.remove(&id);
        self.dependencies.remove_object(ObjectId::Module(id));
        Ok(())
    }

    /// Member routines of a module, in id order.
    pub fn module_members(&self, id: ModuleId) -> Vec<crate::ids::RoutineId> {
        let mut members: Vec<_> = self
            .routines
            .values()
            .filter(|r| r.namespace == NamespaceId::Module(id))
            .map(|r| r.id)
            .collect();
        members.sort();
        members
    }
}
