//! Module-scoped GRANT and REVOKE execution.
//!
//! `ON MODULE m` targets the module's own ACL (CREATE is the only module
//! privilege kind). `ON FUNCTION f(...) IN MODULE m` is a resolution
//! convenience: it locates the member through the module and mutates the
//! routine's own ACL; no module-scoped privilege state exists. The ALL
//! FUNCTIONS form snapshots the member list at execution time, so members
//! added later are unaffected.

use modsql_ast::{ModuleGrantStmt, ModulePrivilegeTarget, ModuleRevokeStmt, PrivilegeType};
use modsql_catalog::{ModuleId, NamespaceId, RoutineId, PUBLIC};
use modsql_storage::Database;
use modsql_types::DataType;

use crate::{errors::ExecutorError, privilege_checker::PrivilegeChecker, resolver::RoutineResolver};

/// Executor for module-scoped GRANT statements.
pub struct ModuleGrantExecutor;

/// Executor for module-scoped REVOKE statements.
pub struct ModuleRevokeExecutor;

impl ModuleGrantExecutor {
    /// Execute GRANT ... [ON MODULE m | ON FUNCTION f IN MODULE m | ON ALL
    /// FUNCTIONS IN MODULE m].
    pub fn execute_grant(stmt: &ModuleGrantStmt, db: &mut Database) -> Result<String, ExecutorError> {
        let (_, module_id) = RoutineResolver::resolve_module(db, &stmt.module_name)?;
        PrivilegeChecker::check_module_owner(db, module_id)?;
        validate_grantees(db, &stmt.grantees)?;
        let grantor = db.get_current_role();

        match &stmt.target {
            ModulePrivilegeTarget::Module => {
                require_module_privilege(stmt.privilege)?;
                for grantee in &stmt.grantees {
                    db.catalog.grant_on_module(module_id, grantee, stmt.privilege, &grantor)?;
                }
                Ok(format!(
                    "Granted {} on module '{}' to {}",
                    stmt.privilege.as_str(),
                    stmt.module_name,
                    stmt.grantees.join(", ")
                ))
            }
            ModulePrivilegeTarget::Function { name, arg_types } => {
                require_routine_privilege(stmt.privilege)?;
                let routine = resolve_member(db, module_id, name, arg_types)?;
                for grantee in &stmt.grantees {
                    db.catalog.grant_on_routine(routine, grantee, stmt.privilege, &grantor)?;
                }
                Ok(format!(
                    "Granted {} on function '{}' in module '{}' to {}",
                    stmt.privilege.as_str(),
                    name,
                    stmt.module_name,
                    stmt.grantees.join(", ")
                ))
            }
            ModulePrivilegeTarget::AllFunctions => {
                require_routine_privilege(stmt.privilege)?;
                // Snapshot, not a standing default policy
                let members = db.catalog.module_members(module_id);
                for routine in &members {
                    for grantee in &stmt.grantees {
                        db.catalog.grant_on_routine(*routine, grantee, stmt.privilege, &grantor)?;
                    }
                }
                Ok(format!(
                    "Granted {} on {} routine(s) in module '{}' to {}",
                    stmt.privilege.as_str(),
                    members.len(),
                    stmt.module_name,
                    stmt.grantees.join(", ")
                ))
            }
        }
    }
}

impl ModuleRevokeExecutor {
    /// Execute REVOKE ... [ON MODULE m | ON FUNCTION f IN MODULE m | ON ALL
    /// FUNCTIONS IN MODULE m].
    pub fn execute_revoke(
        stmt: &ModuleRevokeStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let (_, module_id) = RoutineResolver::resolve_module(db, &stmt.module_name)?;
        PrivilegeChecker::check_module_owner(db, module_id)?;
        validate_grantees(db, &stmt.grantees)?;

        match &stmt.target {
            ModulePrivilegeTarget::Module => {
                require_module_privilege(stmt.privilege)?;
                for grantee in &stmt.grantees {
                    db.catalog.revoke_on_module(module_id, grantee, stmt.privilege)?;
                }
                Ok(format!(
                    "Revoked {} on module '{}' from {}",
                    stmt.privilege.as_str(),
                    stmt.module_name,
                    stmt.grantees.join(", ")
                ))
            }
            ModulePrivilegeTarget::Function { name, arg_types } => {
                require_routine_privilege(stmt.privilege)?;
                let routine = resolve_member(db, module_id, name, arg_types)?;
                for grantee in &stmt.grantees {
                    db.catalog.revoke_on_routine(routine, grantee, stmt.privilege)?;
                }
                Ok(format!(
                    "Revoked {} on function '{}' in module '{}' from {}",
                    stmt.privilege.as_str(),
                    name,
                    stmt.module_name,
                    stmt.grantees.join(", ")
                ))
            }
            ModulePrivilegeTarget::AllFunctions => {
                require_routine_privilege(stmt.privilege)?;
                let members = db.catalog.module_members(module_id);
                for routine in &members {
                    for grantee in &stmt.grantees {
                        db.catalog.revoke_on_routine(*routine, grantee, stmt.privilege)?;
                    }
                }
                Ok(format!(
                    "Revoked {} on {} routine(s) in module '{}' from {}",
                    stmt.privilege.as_str(),
                    members.len(),
                    stmt.module_name,
                    stmt.grantees.join(", ")
                ))
            }
        }
    }
}

/// Locate a member routine by name and signature inside the module.
fn resolve_member(
    db: &Database,
    module: ModuleId,
    name: &str,
    arg_types: &[DataType],
) -> Result<RoutineId, ExecutorError> {
    db.catalog
        .find_routine(NamespaceId::Module(module), name, arg_types)
        .ok_or_else(|| ExecutorError::RoutineNotFound(name.to_string()))
}

/// CREATE is the only privilege kind a module itself carries.
fn require_module_privilege(privilege: PrivilegeType) -> Result<(), ExecutorError> {
    if privilege == PrivilegeType::Create {
        Ok(())
    } else {
        Err(ExecutorError::InvalidPrivilege {
            privilege: privilege.as_str().to_string(),
            object: "a module".to_string(),
        })
    }
}

/// Member routines accept the call-gating kinds, never CREATE.
fn require_routine_privilege(privilege: PrivilegeType) -> Result<(), ExecutorError> {
    match privilege {
        PrivilegeType::Execute | PrivilegeType::References => Ok(()),
        PrivilegeType::Create => Err(ExecutorError::InvalidPrivilege {
            privilege: privilege.as_str().to_string(),
            object: "a routine".to_string(),
        }),
    }
}

/// Every grantee must be an existing role or the PUBLIC pseudo-role.
fn validate_grantees(db: &Database, grantees: &[String]) -> Result<(), ExecutorError> {
    for grantee in grantees {
        if grantee != PUBLIC && !db.catalog.role_exists(grantee) {
            return Err(ExecutorError::RoleNotFound(grantee.clone()));
        }
    }
    Ok(())
}
