//! Module DDL statements
//!
//! AST nodes for:
//! - CREATE MODULE (with embedded routine definitions)
//! - ALTER MODULE {CREATE [OR REPLACE] | ALTER} FUNCTION/PROCEDURE
//! - ALTER MODULE RENAME TO / OWNER TO
//! - DROP MODULE

use modsql_types::{DataType, SqlValue};

use crate::name::QualifiedName;

/// CREATE MODULE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateModuleStmt {
    /// `[module]` or `[schema, module]`
    pub module_name: QualifiedName,
    /// AUTHORIZATION role; defaults to the invoking role
    pub authorization: Option<String>,
    pub if_not_exists: bool,
    /// Embedded definitions, already ordered with no forward references
    pub elements: Vec<ModuleElement>,
}

/// A definition that can be embedded in a CREATE MODULE body or attached
/// through ALTER MODULE.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleElement {
    CreateFunction(CreateFunctionStmt),
    CreateProcedure(CreateProcedureStmt),
}

impl ModuleElement {
    /// The (possibly qualified) name of the routine being defined.
    pub fn routine_name(&self) -> &QualifiedName {
        match self {
            ModuleElement::CreateFunction(stmt) => &stmt.name,
            ModuleElement::CreateProcedure(stmt) => &stmt.name,
        }
    }
}

/// ALTER MODULE name CREATE [OR REPLACE] FUNCTION/PROCEDURE
#[derive(Debug, Clone, PartialEq)]
pub struct AlterModuleAddRoutineStmt {
    pub module_name: QualifiedName,
    pub or_replace: bool,
    pub routine: ModuleElement,
}

/// ALTER MODULE name ALTER FUNCTION/PROCEDURE
#[derive(Debug, Clone, PartialEq)]
pub struct AlterModuleAlterRoutineStmt {
    pub module_name: QualifiedName,
    pub alter: AlterRoutineStmt,
}

/// ALTER MODULE name RENAME TO new_name
#[derive(Debug, Clone, PartialEq)]
pub struct AlterModuleRenameStmt {
    pub module_name: QualifiedName,
    pub new_name: String,
}

/// ALTER MODULE name OWNER TO new_owner
#[derive(Debug, Clone, PartialEq)]
pub struct AlterModuleOwnerStmt {
    pub module_name: QualifiedName,
    pub new_owner: String,
}

/// DROP MODULE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropModuleStmt {
    pub module_name: QualifiedName,
    pub if_exists: bool,
    pub cascade: bool,
}

/// CREATE FUNCTION statement (module-embeddable subset)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFunctionStmt {
    pub name: QualifiedName,
    pub parameters: Vec<ParamDef>,
    pub return_type: DataType,
    pub body: RoutineBody,
}

/// CREATE PROCEDURE statement (module-embeddable subset)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProcedureStmt {
    pub name: QualifiedName,
    pub parameters: Vec<ParamDef>,
    pub body: RoutineBody,
}

/// ALTER FUNCTION/PROCEDURE statement applied to a module member
#[derive(Debug, Clone, PartialEq)]
pub struct AlterRoutineStmt {
    pub routine_name: QualifiedName,
    /// Signature used to pick among overloads
    pub arg_types: Vec<DataType>,
    pub action: AlterRoutineAction,
}

/// Supported ALTER FUNCTION/PROCEDURE actions
#[derive(Debug, Clone, PartialEq)]
pub enum AlterRoutineAction {
    RenameTo(String),
}

/// Routine parameter declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
    pub name: String,
    pub data_type: DataType,
}

/// Body of a routine definition.
///
/// The routine body compiler is external to this workspace; `Return` covers
/// constant-returning routines, `RawSql` carries anything else opaquely.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineBody {
    Return(SqlValue),
    RawSql(String),
}
