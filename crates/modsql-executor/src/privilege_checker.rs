//! Centralized privilege checking for module operations.
//!
//! Module membership mutations need both schema-level CREATE and
//! module-level CREATE; restructuring existing members and renaming,
//! re-owning, or dropping the module itself need ownership. Calling a
//! member routine is gated only by the routine's own ACL.

use modsql_ast::PrivilegeType;
use modsql_catalog::{ModuleId, RoutineId, SchemaId};
use modsql_storage::Database;

use crate::errors::ExecutorError;

/// Centralized privilege checking for all module operations.
pub struct PrivilegeChecker;

impl PrivilegeChecker {
    /// Checks are skipped when security is disabled (testing) or when the
    /// current role is a superuser.
    fn bypass(db: &Database) -> bool {
        !db.is_security_enabled() || db.current_role_is_superuser()
    }

    /// Check CREATE privilege on a schema (required to create any object in
    /// it, modules and module members included).
    pub fn check_schema_create(db: &Database, schema: SchemaId) -> Result<(), ExecutorError> {
        if Self::bypass(db) {
            return Ok(());
        }
        let role = db.get_current_role();
        if db.catalog.schema_has_privilege(schema, &role, PrivilegeType::Create) {
            return Ok(());
        }
        let object = db
            .catalog
            .get_schema(schema)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("{}", schema));
        Err(ExecutorError::InsufficientPrivilege {
            role,
            privilege: "CREATE (schema)".to_string(),
            object,
        })
    }

    /// Check CREATE privilege on a module (required to add or replace
    /// members; schema CREATE alone is not enough).
    pub fn check_module_create(db: &Database, module: ModuleId) -> Result<(), ExecutorError> {
        if Self::bypass(db) {
            return Ok(());
        }
        let role = db.get_current_role();
        if db.catalog.module_has_privilege(module, &role, PrivilegeType::Create) {
            return Ok(());
        }
        let object = db
            .catalog
            .get_module(module)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("{}", module));
        Err(ExecutorError::InsufficientPrivilege {
            role,
            privilege: "CREATE (module)".to_string(),
            object,
        })
    }

    /// Check module ownership (rename, owner change, drop, and member
    /// restructuring; grantable CREATE does not confer this).
    pub fn check_module_owner(db: &Database, module: ModuleId) -> Result<(), ExecutorError> {
        if Self::bypass(db) {
            return Ok(());
        }
        let role = db.get_current_role();
        let row = db
            .catalog
            .get_module(module)
            .ok_or_else(|| ExecutorError::ModuleNotFound(format!("{}", module)))?;
        if row.owner == role {
            return Ok(());
        }
        Err(ExecutorError::NotOwner { role, object: row.name.clone() })
    }

    /// Check EXECUTE on a routine via its own ACL.
    pub fn check_routine_execute(db: &Database, routine: RoutineId) -> Result<(), ExecutorError> {
        if Self::bypass(db) {
            return Ok(());
        }
        let role = db.get_current_role();
        if db.catalog.routine_has_privilege(routine, &role, PrivilegeType::Execute) {
            return Ok(());
        }
        let object = db
            .catalog
            .get_routine(routine)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("{}", routine));
        Err(ExecutorError::InsufficientPrivilege {
            role,
            privilege: "EXECUTE".to_string(),
            object,
        })
    }

    /// Check that the current role may become (is a member of) the target
    /// role, required for ownership transfer.
    pub fn check_can_become(db: &Database, target_role: &str) -> Result<(), ExecutorError> {
        if Self::bypass(db) {
            return Ok(());
        }
        let role = db.get_current_role();
        if db.catalog.is_member(&role, target_role) {
            return Ok(());
        }
        Err(ExecutorError::NotRoleMember { role, target_role: target_role.to_string() })
    }
}
