//! Routine - Function or procedure catalog entry

use modsql_ast::RoutineBody;
use modsql_types::DataType;

use crate::{acl::AclEntry, ids::NamespaceId, ids::RoutineId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineKind {
    Function,
    Procedure,
}

/// Routine parameter
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineParam {
    pub name: String,
    pub data_type: DataType,
}

/// A routine row.
///
/// When `namespace` is a module id the routine is a member of that module;
/// a routine belongs to exactly one namespace, never both a schema and a
/// module at once.
#[derive(Debug, Clone)]
pub struct Routine {
    pub id: RoutineId,
    pub name: String,
    pub namespace: NamespaceId,
    pub owner: String,
    pub kind: RoutineKind,
    pub parameters: Vec<RoutineParam>,
    /// None for procedures
    pub return_type: Option<DataType>,
    pub body: RoutineBody,
    pub acl: Vec<AclEntry>,
}

impl Routine {
    pub fn param_types(&self) -> Vec<DataType> {
        self.parameters.iter().map(|p| p.data_type.clone()).collect()
    }

    /// Loose signature match: lengths agree and declared parameter types
    /// accept the given argument types. String lengths are not significant
    /// and an untyped NULL argument matches any parameter.
    pub fn matches_signature(&self, arg_types: &[DataType]) -> bool {
        if self.parameters.len() != arg_types.len() {
            return false;
        }
        self.parameters.iter().zip(arg_types).all(|(p, a)| types_compatible(&p.data_type, a))
    }
}

fn types_compatible(declared: &DataType, arg: &DataType) -> bool {
    match (declared, arg) {
        (_, DataType::Null) => true,
        (DataType::Varchar { .. }, DataType::Varchar { .. }) => true,
        (DataType::Character { .. }, DataType::Character { .. }) => true,
        (DataType::Varchar { .. }, DataType::Character { .. }) => true,
        (DataType::Character { .. }, DataType::Varchar { .. }) => true,
        _ => declared == arg,
    }
}
