//! Errors returned by module statement execution.

use modsql_catalog::CatalogError;
use modsql_storage::StorageError;

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorError {
    DuplicateModule {
        module_name: String,
        schema_name: String,
    },
    ModuleNotFound(String),
    RoutineNotFound(String),
    RoutineAlreadyExists(String),
    SchemaNotFound(String),
    RoleNotFound(String),
    /// A required privilege is missing; names the specific one.
    InsufficientPrivilege {
        role: String,
        privilege: String,
        object: String,
    },
    NotOwner {
        role: String,
        object: String,
    },
    NotRoleMember {
        role: String,
        target_role: String,
    },
    InvalidModuleDefinition(String),
    /// DROP without CASCADE while dependent objects remain.
    DependencyViolation {
        object: String,
        dependents: Vec<String>,
    },
    /// Privilege kind not applicable to the target object.
    InvalidPrivilege {
        privilege: String,
        object: String,
    },
    UnsupportedFeature(String),
    StorageError(String),
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::DuplicateModule { module_name, schema_name } => {
                write!(f, "Module '{}' already exists in schema '{}'", module_name, schema_name)
            }
            ExecutorError::ModuleNotFound(name) => write!(f, "Module '{}' does not exist", name),
            ExecutorError::RoutineNotFound(name) => {
                write!(f, "Function or procedure '{}' does not exist", name)
            }
            ExecutorError::RoutineAlreadyExists(name) => {
                write!(f, "Function or procedure '{}' already exists", name)
            }
            ExecutorError::SchemaNotFound(name) => write!(f, "Schema '{}' does not exist", name),
            ExecutorError::RoleNotFound(name) => write!(f, "Role '{}' does not exist", name),
            ExecutorError::InsufficientPrivilege { role, privilege, object } => {
                write!(f, "Role '{}' lacks {} privilege on '{}'", role, privilege, object)
            }
            ExecutorError::NotOwner { role, object } => {
                write!(f, "Role '{}' is not the owner of '{}'", role, object)
            }
            ExecutorError::NotRoleMember { role, target_role } => {
                write!(f, "Role '{}' is not a member of role '{}'", role, target_role)
            }
            ExecutorError::InvalidModuleDefinition(msg) => {
                write!(f, "Invalid module definition: {}", msg)
            }
            ExecutorError::DependencyViolation { object, dependents } => {
                write!(
                    f,
                    "Cannot drop '{}' because {} object(s) depend on it: {}",
                    object,
                    dependents.len(),
                    dependents.join(", ")
                )
            }
            ExecutorError::InvalidPrivilege { privilege, object } => {
                write!(f, "Privilege {} cannot be granted on {}", privilege, object)
            }
            ExecutorError::UnsupportedFeature(msg) => {
                write!(f, "Unsupported feature: {}", msg)
            }
            ExecutorError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ExecutorError {}

impl From<CatalogError> for ExecutorError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DuplicateModule { module_name, schema_name } => {
                ExecutorError::DuplicateModule { module_name, schema_name }
            }
            CatalogError::ModuleNotFound(name) => ExecutorError::ModuleNotFound(name),
            CatalogError::ModuleNotEmpty { module_name, member_count } => {
                ExecutorError::DependencyViolation {
                    object: module_name,
                    dependents: vec![format!("{} member routine(s)", member_count)],
                }
            }
            CatalogError::SchemaNotFound(name) => ExecutorError::SchemaNotFound(name),
            CatalogError::SchemaNotEmpty(name) => ExecutorError::DependencyViolation {
                object: name,
                dependents: Vec::new(),
            },
            CatalogError::RoleNotFound(name) => ExecutorError::RoleNotFound(name),
            CatalogError::RoutineAlreadyExists(name) => ExecutorError::RoutineAlreadyExists(name),
            CatalogError::RoutineNotFound(name) => ExecutorError::RoutineNotFound(name),
            other => ExecutorError::StorageError(format!("Catalog error: {}", other)),
        }
    }
}

impl From<StorageError> for ExecutorError {
    fn from(err: StorageError) -> Self {
        ExecutorError::StorageError(err.to_string())
    }
}
