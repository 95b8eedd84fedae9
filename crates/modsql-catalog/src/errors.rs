//! Errors returned by catalog operations.

/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    SchemaAlreadyExists(String),
    SchemaNotFound(String),
    SchemaNotEmpty(String),
    RoleAlreadyExists(String),
    RoleNotFound(String),
    DuplicateModule {
        module_name: String,
        schema_name: String,
    },
    ModuleNotFound(String),
    ModuleNotEmpty {
        module_name: String,
        member_count: usize,
    },
    RoutineAlreadyExists(String),
    RoutineNotFound(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::SchemaAlreadyExists(name) => {
                write!(f, "Schema '{}' already exists", name)
            }
            CatalogError::SchemaNotFound(name) => write!(f, "Schema '{}' not found", name),
            CatalogError::SchemaNotEmpty(name) => {
                write!(f, "Schema '{}' is not empty", name)
            }
            CatalogError::RoleAlreadyExists(name) => {
                write!(f, "Role '{}' already exists", name)
            }
            CatalogError::RoleNotFound(name) => write!(f, "Role '{}' not found", name),
            CatalogError::DuplicateModule { module_name, schema_name } => {
                write!(f, "Module '{}' already exists in schema '{}'", module_name, schema_name)
            }
            CatalogError::ModuleNotFound(name) => write!(f, "Module '{}' not found", name),
            CatalogError::ModuleNotEmpty { module_name, member_count } => {
                write!(
                    f,
                    "Module '{}' still contains {} member routine(s)",
                    module_name, member_count
                )
            }
            CatalogError::RoutineAlreadyExists(name) => {
                write!(f, "Routine '{}' already exists", name)
            }
            CatalogError::RoutineNotFound(name) => write!(f, "Routine '{}' not found", name),
        }
    }
}

impl std::error::Error for CatalogError {}
