//! Qualified routine name resolution.
//!
//! One-part names scan the search path and look inside each entry directly
//! (a module shadowing the front of the path is consulted like a schema).
//! Two-part names descend one level: each schema on the path is tested for
//! a directly-contained module of the first component, and the routine is
//! looked up inside the first such module. Three-part names walk
//! schema.module.routine without consulting the path.

use modsql_ast::QualifiedName;
use modsql_catalog::{ModuleId, NamespaceId, RoutineId, SchemaId};
use modsql_storage::Database;
use modsql_types::DataType;

use crate::errors::ExecutorError;

/// Resolver for 1/2/3-part routine names.
pub struct RoutineResolver;

impl RoutineResolver {
    /// Resolve a routine name plus call signature to a routine id.
    pub fn resolve(
        db: &Database,
        name: &QualifiedName,
        arg_types: &[DataType],
    ) -> Result<RoutineId, ExecutorError> {
        match name.parts.as_slice() {
            [routine] => Self::resolve_unqualified(db, routine, arg_types),
            [module, routine] => Self::resolve_module_qualified(db, module, routine, arg_types),
            [schema, module, routine] => {
                Self::resolve_fully_qualified(db, schema, module, routine, arg_types)
            }
            _ => Err(ExecutorError::UnsupportedFeature(format!(
                "routine name '{}' has more than three parts",
                name
            ))),
        }
    }

    fn resolve_unqualified(
        db: &Database,
        routine: &str,
        arg_types: &[DataType],
    ) -> Result<RoutineId, ExecutorError> {
        for namespace in db.catalog.search_path() {
            if let Some(id) = db.catalog.find_routine(*namespace, routine, arg_types) {
                return Ok(id);
            }
        }
        Err(ExecutorError::RoutineNotFound(routine.to_string()))
    }

    fn resolve_module_qualified(
        db: &Database,
        module: &str,
        routine: &str,
        arg_types: &[DataType],
    ) -> Result<RoutineId, ExecutorError> {
        // Nested lookup threaded through the ordinary path scan: modules do
        // not sit on the path themselves, so descend one level per schema.
        for namespace in db.catalog.search_path() {
            let schema = match namespace {
                NamespaceId::Schema(s) => *s,
                NamespaceId::Module(_) => continue,
            };
            if let Some(module_id) = db.catalog.module_id(schema, module) {
                return db
                    .catalog
                    .find_routine(NamespaceId::Module(module_id), routine, arg_types)
                    .ok_or_else(|| {
                        ExecutorError::RoutineNotFound(format!("{}.{}", module, routine))
                    });
            }
        }
        Err(ExecutorError::ModuleNotFound(module.to_string()))
    }

    fn resolve_fully_qualified(
        db: &Database,
        schema: &str,
        module: &str,
        routine: &str,
        arg_types: &[DataType],
    ) -> Result<RoutineId, ExecutorError> {
        let (_, module_id) = Self::lookup_module_in_schema(db, schema, module)?;
        db.catalog
            .find_routine(NamespaceId::Module(module_id), routine, arg_types)
            .ok_or_else(|| {
                ExecutorError::RoutineNotFound(format!("{}.{}.{}", schema, module, routine))
            })
    }

    /// Resolve a module DDL target name (`[module]` or `[schema, module]`)
    /// to its schema and module ids. Unqualified names scan the search path.
    pub fn resolve_module(
        db: &Database,
        name: &QualifiedName,
    ) -> Result<(SchemaId, ModuleId), ExecutorError> {
        match name.parts.as_slice() {
            [module] => {
                for namespace in db.catalog.search_path() {
                    let schema = match namespace {
                        NamespaceId::Schema(s) => *s,
                        NamespaceId::Module(_) => continue,
                    };
                    if let Some(module_id) = db.catalog.module_id(schema, module) {
                        return Ok((schema, module_id));
                    }
                }
                Err(ExecutorError::ModuleNotFound(module.clone()))
            }
            [schema, module] => Self::lookup_module_in_schema(db, schema, module),
            _ => Err(ExecutorError::UnsupportedFeature(format!(
                "module name '{}' has more than two parts",
                name
            ))),
        }
    }

    fn lookup_module_in_schema(
        db: &Database,
        schema: &str,
        module: &str,
    ) -> Result<(SchemaId, ModuleId), ExecutorError> {
        let schema_id = db
            .catalog
            .schema_id(schema)
            .ok_or_else(|| ExecutorError::SchemaNotFound(schema.to_string()))?;
        let module_id = db
            .catalog
            .module_id(schema_id, module)
            .ok_or_else(|| ExecutorError::ModuleNotFound(format!("{}.{}", schema, module)))?;
        Ok((schema_id, module_id))
    }
}
