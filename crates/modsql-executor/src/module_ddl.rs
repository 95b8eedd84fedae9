//! Module DDL executor.
//!
//! CREATE MODULE executes a composite body: the module row is inserted
//! first, the module is bound as search-path front and creation target, and
//! each embedded definition then runs in order, seeing its predecessors.
//! The whole statement runs inside a transaction scope; rollback unwinds
//! every catalog write, while effective identity and the resolution context
//! are restored explicitly on both exit paths.

use modsql_ast::{
    AlterModuleAddRoutineStmt, AlterModuleAlterRoutineStmt, AlterModuleOwnerStmt,
    AlterModuleRenameStmt, CreateModuleStmt, DropModuleStmt, QualifiedName,
};
use modsql_catalog::{ModuleId, NamespaceId, ObjectId, SchemaId};
use modsql_storage::Database;

use crate::{
    errors::ExecutorError, privilege_checker::PrivilegeChecker, resolver::RoutineResolver,
    routine_ddl::RoutineExecutor,
};

/// Executor for CREATE/ALTER/DROP MODULE statements.
pub struct ModuleExecutor;

impl ModuleExecutor {
    /// Execute CREATE MODULE.
    pub fn execute_create_module(
        stmt: &CreateModuleStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        db.begin_transaction();
        let result = Self::execute_create_module_internal(stmt, db);
        match result {
            Ok(msg) => {
                db.commit_transaction()?;
                Ok(msg)
            }
            Err(e) => {
                db.rollback_transaction()?;
                Err(e)
            }
        }
    }

    fn execute_create_module_internal(
        stmt: &CreateModuleStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let module_name = stmt.module_name.object_name().to_string();
        let schema_id = Self::creation_schema(db, &stmt.module_name)?;
        let schema_name = db
            .catalog
            .get_schema(schema_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        PrivilegeChecker::check_schema_create(db, schema_id)?;

        let invoker = db.get_current_role();
        let owner = stmt.authorization.clone().unwrap_or_else(|| invoker.clone());
        if !db.catalog.role_exists(&owner) {
            return Err(ExecutorError::RoleNotFound(owner));
        }

        // Advisory pre-check only; the insert's uniqueness enforcement is
        // what a concurrent loser actually trips over.
        if stmt.if_not_exists && db.catalog.module_exists(schema_id, &module_name) {
            log::debug!("module {} already exists in schema {}, skipping", module_name, schema_name);
            return Ok(format!(
                "Module '{}' already exists in schema '{}', skipping",
                module_name, schema_name
            ));
        }

        // Body runs as the target owner so members end up owned by it; the
        // invoking identity is restored exactly once, on both exit paths.
        if owner != invoker {
            db.set_current_role(Some(owner.clone()));
        }
        let result = Self::run_create_module_body(stmt, db, schema_id, &module_name, &owner);
        db.set_current_role(Some(invoker));
        result
    }

    fn run_create_module_body(
        stmt: &CreateModuleStmt,
        db: &mut Database,
        schema_id: SchemaId,
        module_name: &str,
        owner: &str,
    ) -> Result<String, ExecutorError> {
        let module_id =
            db.catalog.create_module(module_name.to_string(), schema_id, owner.to_string())?;

        // Shadow the resolution context: module at the front of the search
        // path and bound as the default creation target.
        let saved = db.catalog.save_resolution_context();
        db.catalog.push_creation_namespace(NamespaceId::Module(module_id));

        for element in &stmt.elements {
            if element.routine_name().is_qualified() {
                db.catalog.restore_resolution_context(saved.clone());
                return Err(ExecutorError::InvalidModuleDefinition(format!(
                    "CREATE FUNCTION ({}) specifies a namespace inside of CREATE MODULE ({})",
                    element.routine_name(),
                    module_name
                )));
            }
            // Each element's writes are visible to the next before it runs
            if let Err(e) = RoutineExecutor::dispatch_element(element, db, false) {
                db.catalog.restore_resolution_context(saved.clone());
                return Err(e);
            }
        }

        db.catalog.restore_resolution_context(saved);

        // Module cannot outlive its parent schema; the owner dependency was
        // recorded by the catalog insert, and each member recorded its own
        // edge when it was created inside the bound namespace.
        db.catalog
            .dependencies_mut()
            .add_edge(ObjectId::Module(module_id), ObjectId::Schema(schema_id));

        let member_count = stmt.elements.len();
        if member_count > 0 {
            Ok(format!("Module '{}' created with {} member(s)", module_name, member_count))
        } else {
            Ok(format!("Module '{}' created", module_name))
        }
    }

    /// Execute ALTER MODULE ... CREATE [OR REPLACE] FUNCTION/PROCEDURE.
    pub fn execute_alter_module_add_routine(
        stmt: &AlterModuleAddRoutineStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        db.begin_transaction();
        let result = Self::execute_alter_module_add_routine_internal(stmt, db);
        match result {
            Ok(msg) => {
                db.commit_transaction()?;
                Ok(msg)
            }
            Err(e) => {
                db.rollback_transaction()?;
                Err(e)
            }
        }
    }

    fn execute_alter_module_add_routine_internal(
        stmt: &AlterModuleAddRoutineStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let (schema_id, module_id) = RoutineResolver::resolve_module(db, &stmt.module_name)?;

        // Both levels are required: schema CREATE and module CREATE. Each
        // check names the privilege it found missing.
        PrivilegeChecker::check_schema_create(db, schema_id)?;
        PrivilegeChecker::check_module_create(db, module_id)?;

        let routine_name = stmt.routine.routine_name();
        if routine_name.is_qualified() {
            return Err(ExecutorError::InvalidModuleDefinition(format!(
                "CREATE/REPLACE FUNCTION ({}) specifies a namespace inside of ALTER MODULE ({})",
                routine_name, stmt.module_name
            )));
        }

        let saved = db.catalog.save_resolution_context();
        db.catalog.push_creation_namespace(NamespaceId::Module(module_id));
        let result = RoutineExecutor::dispatch_element(&stmt.routine, db, stmt.or_replace);
        db.catalog.restore_resolution_context(saved);

        let message = result?;
        Ok(format!("{} in module '{}'", message, stmt.module_name))
    }

    /// Execute ALTER MODULE ... ALTER FUNCTION/PROCEDURE.
    ///
    /// Restructuring an existing member requires module ownership, not
    /// merely CREATE privilege.
    pub fn execute_alter_module_alter_routine(
        stmt: &AlterModuleAlterRoutineStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let (_, module_id) = RoutineResolver::resolve_module(db, &stmt.module_name)?;
        PrivilegeChecker::check_module_owner(db, module_id)?;

        if stmt.alter.routine_name.is_qualified() {
            return Err(ExecutorError::InvalidModuleDefinition(format!(
                "ALTER FUNCTION ({}) specifies a namespace inside of ALTER MODULE ({})",
                stmt.alter.routine_name, stmt.module_name
            )));
        }

        RoutineExecutor::execute_alter_routine(&stmt.alter, db, NamespaceId::Module(module_id))
    }

    /// Execute ALTER MODULE ... RENAME TO.
    pub fn execute_rename_module(
        stmt: &AlterModuleRenameStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let (schema_id, module_id) = RoutineResolver::resolve_module(db, &stmt.module_name)?;

        // Name collision surfaces before the ownership error, matching the
        // catalog's own uniqueness enforcement order.
        if db.catalog.module_exists(schema_id, &stmt.new_name) {
            let schema_name = db
                .catalog
                .get_schema(schema_id)
                .map(|s| s.name.clone())
                .unwrap_or_default();
            return Err(ExecutorError::DuplicateModule {
                module_name: stmt.new_name.clone(),
                schema_name,
            });
        }

        PrivilegeChecker::check_module_owner(db, module_id)?;
        db.catalog.rename_module(module_id, &stmt.new_name)?;
        log::debug!("renamed module {} to {}", stmt.module_name, stmt.new_name);
        Ok(format!("Module '{}' renamed to '{}'", stmt.module_name, stmt.new_name))
    }

    /// Execute ALTER MODULE ... OWNER TO.
    pub fn execute_alter_module_owner(
        stmt: &AlterModuleOwnerStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let (_, module_id) = RoutineResolver::resolve_module(db, &stmt.module_name)?;
        if !db.catalog.role_exists(&stmt.new_owner) {
            return Err(ExecutorError::RoleNotFound(stmt.new_owner.clone()));
        }

        // Transfer to the current owner succeeds without further checks, so
        // a dump restore replaying the command is idempotent.
        let current_owner = db
            .catalog
            .get_module(module_id)
            .map(|m| m.owner.clone())
            .unwrap_or_default();
        if current_owner == stmt.new_owner {
            return Ok(format!(
                "Module '{}' owner is already '{}'",
                stmt.module_name, stmt.new_owner
            ));
        }

        PrivilegeChecker::check_module_owner(db, module_id)?;
        PrivilegeChecker::check_can_become(db, &stmt.new_owner)?;

        db.catalog.set_module_owner(module_id, &stmt.new_owner)?;
        Ok(format!("Module '{}' owner changed to '{}'", stmt.module_name, stmt.new_owner))
    }

    /// Execute DROP MODULE.
    pub fn execute_drop_module(
        stmt: &DropModuleStmt,
        db: &mut Database,
    ) -> Result<String, ExecutorError> {
        let resolved = RoutineResolver::resolve_module(db, &stmt.module_name);
        let (_, module_id) = match resolved {
            Ok(ids) => ids,
            Err(ExecutorError::ModuleNotFound(name)) if stmt.if_exists => {
                return Ok(format!("Module '{}' does not exist, skipping", name));
            }
            Err(e) => return Err(e),
        };

        PrivilegeChecker::check_module_owner(db, module_id)?;

        let members = db.catalog.module_members(module_id);
        if !stmt.cascade && !members.is_empty() {
            let dependents = members
                .iter()
                .filter_map(|id| db.catalog.get_routine(*id))
                .map(|r| r.name.clone())
                .collect();
            return Err(ExecutorError::DependencyViolation {
                object: stmt.module_name.to_string(),
                dependents,
            });
        }

        db.begin_transaction();
        let result = Self::drop_module_cascade(db, module_id);
        match result {
            Ok(dropped) => {
                db.commit_transaction()?;
                log::debug!("dropped module {} ({} member(s))", stmt.module_name, dropped);
                if dropped > 0 {
                    Ok(format!(
                        "Module '{}' dropped along with {} member(s)",
                        stmt.module_name, dropped
                    ))
                } else {
                    Ok(format!("Module '{}' dropped", stmt.module_name))
                }
            }
            Err(e) => {
                db.rollback_transaction()?;
                Err(e)
            }
        }
    }

    /// Delete the module's dependents deepest-first, then the module row.
    fn drop_module_cascade(db: &mut Database, module_id: ModuleId) -> Result<usize, ExecutorError> {
        let mut dropped = 0;
        for object in db.catalog.dependencies().cascade_order(ObjectId::Module(module_id)) {
            if let ObjectId::Routine(routine) = object {
                db.catalog.drop_routine(routine)?;
                dropped += 1;
            }
        }
        db.catalog.drop_module(module_id)?;
        Ok(dropped)
    }

    /// Target schema for CREATE MODULE: the explicit qualifier, or the
    /// current schema when unqualified.
    fn creation_schema(db: &Database, name: &QualifiedName) -> Result<SchemaId, ExecutorError> {
        match name.qualifier() {
            [] => Ok(db.catalog.current_schema_id()),
            [schema] => db
                .catalog
                .schema_id(schema)
                .ok_or_else(|| ExecutorError::SchemaNotFound(schema.clone())),
            _ => Err(ExecutorError::UnsupportedFeature(format!(
                "module name '{}' has more than two parts",
                name
            ))),
        }
    }
}
