//! Executor - Module DDL Execution Engine
//!
//! This crate provides execution for module statements: the command
//! processor for CREATE/ALTER/DROP MODULE, the qualified-name resolver for
//! member routines, the privilege gate, module-scoped GRANT/REVOKE, and
//! routine invocation.

pub mod errors;
mod module_ddl;
mod module_grant;
mod privilege_checker;
mod resolver;
mod routine_call;
mod routine_ddl;

pub use errors::ExecutorError;
pub use module_ddl::ModuleExecutor;
pub use module_grant::{ModuleGrantExecutor, ModuleRevokeExecutor};
pub use privilege_checker::PrivilegeChecker;
pub use resolver::RoutineResolver;
pub use routine_call::RoutineCallExecutor;
pub use routine_ddl::RoutineExecutor;
