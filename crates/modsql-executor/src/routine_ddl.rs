//! Routine DDL dispatch.
//!
//! This is the utility-statement path embedded statements take: each
//! CREATE/ALTER FUNCTION or PROCEDURE executes against the bound creation
//! namespace, owned by the current effective role. The module command
//! processor binds that namespace before dispatching here.

use modsql_ast::{
    AlterRoutineAction, AlterRoutineStmt, CreateFunctionStmt, CreateProcedureStmt, ModuleElement,
};
use modsql_catalog::{NamespaceId, RoutineKind, RoutineParam};
use modsql_storage::Database;

use crate::errors::ExecutorError;

/// Executor for routine DDL statements.
pub struct RoutineExecutor;

impl RoutineExecutor {
    /// Execute one module body element against the bound creation namespace.
    pub fn dispatch_element(
        element: &ModuleElement,
        db: &mut Database,
        replace: bool,
    ) -> Result<String, ExecutorError> {
        match element {
            ModuleElement::CreateFunction(stmt) => Self::execute_create_function(stmt, db, replace),
            ModuleElement::CreateProcedure(stmt) => {
                Self::execute_create_procedure(stmt, db, replace)
            }
        }
    }

    /// Execute CREATE [OR REPLACE] FUNCTION.
    pub fn execute_create_function(
        stmt: &CreateFunctionStmt,
        db: &mut Database,
        replace: bool,
    ) -> Result<String, ExecutorError> {
        let namespace = Self::creation_namespace(db, stmt.name.is_qualified())?;
        let name = stmt.name.object_name().to_string();
        let owner = db.get_current_role();
        let parameters = stmt
            .parameters
            .iter()
            .map(|p| RoutineParam { name: p.name.clone(), data_type: p.data_type.clone() })
            .collect();

        db.catalog.create_routine(
            name.clone(),
            namespace,
            owner,
            RoutineKind::Function,
            parameters,
            Some(stmt.return_type.clone()),
            stmt.body.clone(),
            replace,
        )?;
        log::debug!("created function {} in {:?}", name, namespace);
        Ok(format!("Function '{}' created", name))
    }

    /// Execute CREATE [OR REPLACE] PROCEDURE.
    pub fn execute_create_procedure(
        stmt: &CreateProcedureStmt,
        db: &mut Database,
        replace: bool,
    ) -> Result<String, ExecutorError> {
        let namespace = Self::creation_namespace(db, stmt.name.is_qualified())?;
        let name = stmt.name.object_name().to_string();
        let owner = db.get_current_role();
        let parameters = stmt
            .parameters
            .iter()
            .map(|p| RoutineParam { name: p.name.clone(), data_type: p.data_type.clone() })
            .collect();

        db.catalog.create_routine(
            name.clone(),
            namespace,
            owner,
            RoutineKind::Procedure,
            parameters,
            None,
            stmt.body.clone(),
            replace,
        )?;
        Ok(format!("Procedure '{}' created", name))
    }

    /// Execute ALTER FUNCTION/PROCEDURE against an explicit namespace.
    ///
    /// The caller has already authorized the restructuring and validated
    /// that the routine name carries no qualifier of its own.
    pub fn execute_alter_routine(
        stmt: &AlterRoutineStmt,
        db: &mut Database,
        namespace: NamespaceId,
    ) -> Result<String, ExecutorError> {
        let name = stmt.routine_name.object_name();
        let routine = db
            .catalog
            .find_routine(namespace, name, &stmt.arg_types)
            .ok_or_else(|| ExecutorError::RoutineNotFound(name.to_string()))?;

        match &stmt.action {
            AlterRoutineAction::RenameTo(new_name) => {
                db.catalog.rename_routine(routine, new_name)?;
                Ok(format!("Routine '{}' renamed to '{}'", name, new_name))
            }
        }
    }

    /// The namespace unqualified creations target. A sub-statement may not
    /// carry its own qualifier while a module is bound as the creation
    /// target.
    fn creation_namespace(db: &Database, qualified: bool) -> Result<NamespaceId, ExecutorError> {
        let namespace = db.catalog.effective_creation_namespace();
        if qualified {
            if let NamespaceId::Module(_) = namespace {
                return Err(ExecutorError::InvalidModuleDefinition(
                    "embedded statement may not qualify its target namespace".to_string(),
                ));
            }
        }
        Ok(namespace)
    }
}
