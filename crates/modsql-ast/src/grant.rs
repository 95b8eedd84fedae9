//! Module-scoped GRANT and REVOKE statements

use modsql_types::DataType;

use crate::name::QualifiedName;

/// Privilege kinds grantable through module-scoped GRANT/REVOKE.
///
/// `References` is the module-scoped call keyword from the MODULE syntax; it
/// is tracked as its own kind and is never folded into `Execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeType {
    Create,
    Execute,
    References,
}

impl PrivilegeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivilegeType::Create => "CREATE",
            PrivilegeType::Execute => "EXECUTE",
            PrivilegeType::References => "REFERENCES",
        }
    }
}

/// What a module-scoped GRANT/REVOKE applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum ModulePrivilegeTarget {
    /// GRANT ... ON MODULE m
    Module,
    /// GRANT ... ON FUNCTION f(args) IN MODULE m
    Function { name: String, arg_types: Vec<DataType> },
    /// GRANT ... ON ALL FUNCTIONS IN MODULE m
    AllFunctions,
}

/// GRANT statement scoped to a module
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleGrantStmt {
    pub privilege: PrivilegeType,
    pub module_name: QualifiedName,
    pub target: ModulePrivilegeTarget,
    pub grantees: Vec<String>,
}

/// REVOKE statement scoped to a module
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRevokeStmt {
    pub privilege: PrivilegeType,
    pub module_name: QualifiedName,
    pub target: ModulePrivilegeTarget,
    pub grantees: Vec<String>,
}
