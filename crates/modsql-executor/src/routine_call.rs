//! Member routine invocation.
//!
//! The real routine body executor lives outside this workspace; this path
//! resolves the qualified name, gates the call on the routine's own ACL,
//! and evaluates the constant-returning bodies the catalog can hold.

use modsql_ast::{QualifiedName, RoutineBody};
use modsql_storage::Database;
use modsql_types::{DataType, SqlValue};

use crate::{errors::ExecutorError, privilege_checker::PrivilegeChecker, resolver::RoutineResolver};

/// Executor for routine calls.
pub struct RoutineCallExecutor;

impl RoutineCallExecutor {
    /// Resolve and invoke a routine by 1/2/3-part name with argument values.
    pub fn execute_call(
        db: &Database,
        name: &QualifiedName,
        args: &[SqlValue],
    ) -> Result<SqlValue, ExecutorError> {
        let arg_types: Vec<DataType> = args.iter().map(|v| v.data_type()).collect();
        let routine_id = RoutineResolver::resolve(db, name, &arg_types)?;
        PrivilegeChecker::check_routine_execute(db, routine_id)?;

        let routine = db
            .catalog
            .get_routine(routine_id)
            .ok_or_else(|| ExecutorError::RoutineNotFound(name.to_string()))?;

        match (&routine.return_type, &routine.body) {
            // Procedures return no value
            (None, _) => Ok(SqlValue::Null),
            (Some(_), RoutineBody::Return(value)) => Ok(value.clone()),
            (Some(_), RoutineBody::RawSql(_)) => Err(ExecutorError::UnsupportedFeature(format!(
                "routine '{}' has a body this engine cannot evaluate",
                routine.name
            ))),
        }
    }
}
