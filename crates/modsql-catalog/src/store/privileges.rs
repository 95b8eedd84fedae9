//! Role and privilege management operations for the catalog.
//!
//! ACLs hang off the object rows (schema, module, routine); the functions
//! here locate the row and apply the ACL primitive. Whether the caller is
//! allowed to grant at all is decided by the executor's privilege gate, not
//! here.

use modsql_ast::PrivilegeType;

use crate::{
    acl::{acl_check, acl_grant, acl_revoke},
    errors::CatalogError,
    ids::{ModuleId, RoutineId, SchemaId},
};

impl super::Catalog {
    // ========================================================================
    // Roles
    // ========================================================================

    /// Create a new role.
    pub fn create_role(&mut self, name: String) -> Result<(), CatalogError> {
        if self.roles.contains(&name) {
            return Err(CatalogError::RoleAlreadyExists(name));
        }
        self.roles.insert(name);
        Ok(())
    }

    /// Drop a role.
    pub fn drop_role(&mut self, name: &str) -> Result<(), CatalogError> {
        if !self.roles.contains(name) {
            return Err(CatalogError::RoleNotFound(name.to_string()));
        }
        self.roles.remove(name);
        self.superusers.remove(name);
        self.role_members.remove(name);
        Ok(())
    }

    /// Check if a role exists.
    pub fn role_exists(&self, name: &str) -> bool {
        self.roles.contains(name)
    }

    /// List all roles.
    pub fn list_roles(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }

    /// Mark or unmark a role as superuser.
    pub fn set_superuser(&mut self, name: &str, superuser: bool) -> Result<(), CatalogError> {
        if !self.roles.contains(name) {
            return Err(CatalogError::RoleNotFound(name.to_string()));
        }
        if superuser {
            self.superusers.insert(name.to_string());
        } else {
            self.superusers.remove(name);
        }
        Ok(())
    }

    pub fn is_superuser(&self, name: &str) -> bool {
        self.superusers.contains(name)
    }

    /// Add `member` to group role `group`.
    pub fn add_role_member(&mut self, group: &str, member: &str) -> Result<(), CatalogError> {
        if !self.roles.contains(group) {
            return Err(CatalogError::RoleNotFound(group.to_string()));
        }
        if !self.roles.contains(member) {
            return Err(CatalogError::RoleNotFound(member.to_string()));
        }
        self.role_members.entry(group.to_string()).or_default().insert(member.to_string());
        Ok(())
    }

    /// A role is a member of itself and of any group it was added to.
    pub fn is_member(&self, role: &str, group: &str) -> bool {
        role == group
            || self.role_members.get(group).map(|m| m.contains(role)).unwrap_or(false)
    }

    // ========================================================================
    // Schema privileges
    // ========================================================================

    pub fn grant_on_schema(
        &mut self,
        schema: SchemaId,
        grantee: &str,
        privilege: PrivilegeType,
        grantor: &str,
    ) -> Result<(), CatalogError> {
        let row = self
            .get_schema_mut(schema)
            .ok_or_else(|| CatalogError::SchemaNotFound(format!("{}", schema)))?;
        acl_grant(&mut row.acl, grantee, privilege, grantor);
        Ok(())
    }

    pub fn revoke_on_schema(
        &mut self,
        schema: SchemaId,
        grantee: &str,
        privilege: PrivilegeType,
    ) -> Result<(), CatalogError> {
        let row = self
            .get_schema_mut(schema)
            .ok_or_else(|| CatalogError::SchemaNotFound(format!("{}", schema)))?;
        acl_revoke(&mut row.acl, grantee, privilege);
        Ok(())
    }

    /// Owner and explicit/PUBLIC grants confer schema privileges.
    pub fn schema_has_privilege(
        &self,
        schema: SchemaId,
        role: &str,
        privilege: PrivilegeType,
    ) -> bool {
        match self.get_schema(schema) {
            Some(row) => row.owner == role || acl_check(&row.acl, role, privilege),
            None => false,
        }
    }

    // ========================================================================
    // Module privileges
    // ========================================================================

    pub fn grant_on_module(
        &mut self,
        module: ModuleId,
        grantee: &str,
        privilege: PrivilegeType,
        grantor: &str,
    ) -> Result<(), CatalogError> {
        let row = self
            .get_module_mut(module)
            .ok_or_else(|| CatalogError::ModuleNotFound(format!("{}", module)))?;
        acl_grant(&mut row.acl, grantee, privilege, grantor);
        Ok(())
    }

    pub fn revoke_on_module(
        &mut self,
        module: ModuleId,
        grantee: &str,
        privilege: PrivilegeType,
    ) -> Result<(), CatalogError> {
        let row = self
            .get_module_mut(module)
            .ok_or_else(|| CatalogError::ModuleNotFound(format!("{}", module)))?;
        acl_revoke(&mut row.acl, grantee, privilege);
        Ok(())
    }

    pub fn module_has_privilege(
        &self,
        module: ModuleId,
        role: &str,
        privilege: PrivilegeType,
    ) -> bool {
        match self.get_module(module) {
            Some(row) => row.owner == role || acl_check(&row.acl, role, privilege),
            None => false,
        }
    }

    // ========================================================================
    // Routine privileges
    // ========================================================================

    pub fn grant_on_routine(
        &mut self,
        routine: RoutineId,
        grantee: &str,
        privilege: PrivilegeType,
        grantor: &str,
    ) -> Result<(), CatalogError> {
        let row = self
            .get_routine_mut(routine)
            .ok_or_else(|| CatalogError::RoutineNotFound(format!("{}", routine)))?;
        acl_grant(&mut row.acl, grantee, privilege, grantor);
        Ok(())
    }

    pub fn revoke_on_routine(
        &mut self,
        routine: RoutineId,
        grantee: &str,
        privilege: PrivilegeType,
    ) -> Result<(), CatalogError> {
        let row = self
            .get_routine_mut(routine)
            .ok_or_else(|| CatalogError::RoutineNotFound(format!("{}", routine)))?;
        acl_revoke(&mut row.acl, grantee, privilege);
        Ok(())
    }

    pub fn routine_has_privilege(
        &self,
        routine: RoutineId,
        role: &str,
        privilege: PrivilegeType,
    ) -> bool {
        match self.get_routine(routine) {
            Some(row) => row.owner == role || acl_check(&row.acl, role, privilege),
            None => false,
        }
    }
}
