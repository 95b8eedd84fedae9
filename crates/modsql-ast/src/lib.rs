//! AST - Structured statement trees for module DDL
//!
//! The grammar that produces these trees lives outside this workspace; tests
//! and embedding engines construct them directly.

mod ddl;
mod grant;
mod name;

pub use ddl::{
    AlterModuleAddRoutineStmt, AlterModuleAlterRoutineStmt, AlterModuleOwnerStmt,
    AlterModuleRenameStmt, AlterRoutineAction, AlterRoutineStmt, CreateFunctionStmt,
    CreateModuleStmt, CreateProcedureStmt, DropModuleStmt, ModuleElement, ParamDef, RoutineBody,
};
pub use grant::{ModuleGrantStmt, ModulePrivilegeTarget, ModuleRevokeStmt, PrivilegeType};
pub use name::QualifiedName;
