//! Routine row management.
//!
//! Routines live in exactly one namespace, schema or module. Overloads share
//! a (namespace, name) key and are told apart by signature. Replacing a
//! routine keeps its id and ACL and swaps the definition.

use modsql_ast::RoutineBody;
use modsql_types::DataType;

use crate::{
    errors::CatalogError,
    ids::{NamespaceId, ObjectId, RoutineId},
    routine::{Routine, RoutineKind, RoutineParam},
};

impl super::Catalog {
    /// Insert a routine row, or replace an existing one with the same name
    /// and signature when `replace` is set.
    ///
    /// Records the routine's namespace dependency edge and owner dependency,
    /// the same bookkeeping every object created inside a namespace gets.
    #[allow(clippy::too_many_arguments)]
    pub fn create_routine(
        &mut self,
        name: String,
        namespace: NamespaceId,
        owner: String,
        kind: RoutineKind,
        parameters: Vec<RoutineParam>,
        return_type: Option<DataType>,
        body: RoutineBody,
        replace: bool,
    ) -> Result<RoutineId, CatalogError> {
        if !self.roles.contains(&owner) {
            return Err(CatalogError::RoleNotFound(owner));
        }
        let arg_types: Vec<DataType> = parameters.iter().map(|p| p.data_type.clone()).collect();
        if let Some(existing) = self.find_routine(namespace, &name, &arg_types) {
            if !replace {
                return Err(CatalogError::RoutineAlreadyExists(name));
            }
            // Replace keeps the routine's identity and ACL
            let routine = self.routines.get_mut(&existing).expect("index points at live routine");
            routine.parameters = parameters;
            routine.return_type = return_type;
            routine.body = body;
            return Ok(existing);
        }

        let id = RoutineId(self.allocate_oid());
        let routine = Routine {
            id,
            name: name.clone(),
            namespace,
            owner: owner.clone(),
            kind,
            parameters,
            return_type,
            body,
            acl: Vec::new(),
        };
        self.routine_names.entry((namespace, name)).or_default().push(id);
        self.routines.insert(id, routine);

        let referenced = match namespace {
            NamespaceId::Schema(s) => ObjectId::Schema(s),
            NamespaceId::Module(m) => ObjectId::Module(m),
        };
        self.dependencies.add_edge(ObjectId::Routine(id), referenced);
        self.dependencies.record_owner(ObjectId::Routine(id), &owner);
        Ok(id)
    }

    /// Get a routine by id.
    pub fn get_routine(&self, id: RoutineId) -> Option<&Routine> {
        self.routines.get(&id)
    }

    pub(crate) fn get_routine_mut(&mut self, id: RoutineId) -> Option<&mut Routine> {
        self.routines.get_mut(&id)
    }

    /// Candidate routines for a name within a namespace.
    pub fn routines_named(&self, namespace: NamespaceId, name: &str) -> Vec<&Routine> {
        self.routine_names
            .get(&(namespace, name.to_string()))
            .map(|ids| ids.iter().filter_map(|id| self.routines.get(id)).collect())
            .unwrap_or_default()
    }

    /// Resolve a routine by name and argument signature within a namespace.
    pub fn find_routine(
        &self,
        namespace: NamespaceId,
        name: &str,
        arg_types: &[DataType],
    ) -> Option<RoutineId> {
        self.routines_named(namespace, name)
            .into_iter()
            .find(|r| r.matches_signature(arg_types))
            .map(|r| r.id)
    }

    /// Rename a routine within its namespace.
    pub fn rename_routine(&mut self, id: RoutineId, new_name: &str) -> Result<(), CatalogError> {
        let (namespace, old_name, arg_types) = {
            let routine = self
                .routines
                .get(&id)
                .ok_or_else(|| CatalogError::RoutineNotFound(format!("{}", id)))?;
            (routine.namespace, routine.name.clone(), routine.param_types())
        };
        if self.find_routine(namespace, new_name, &arg_types).is_some() {
            return Err(CatalogError::RoutineAlreadyExists(new_name.to_string()));
        }
        if let Some(ids) = self.routine_names.get_mut(&(namespace, old_name)) {
            ids.retain(|r| *r != id);
        }
        self.routine_names.retain(|_, ids| !ids.is_empty());
        self.routine_names.entry((namespace, new_name.to_string())).or_default().push(id);
        if let Some(routine) = self.routines.get_mut(&id) {
            routine.name = new_name.to_string();
        }
        Ok(())
    }

    /// Remove a routine row and its dependency edges.
    pub fn drop_routine(&mut self, id: RoutineId) -> Result<(), CatalogError> {
        let routine = self
            .routines
            .remove(&id)
            .ok_or_else(|| CatalogError::RoutineNotFound(format!("{}", id)))?;
        if let Some(ids) = self.routine_names.get_mut(&(routine.namespace, routine.name.clone())) {
            ids.retain(|r| *r != id);
        }
        self.routine_names.retain(|_, ids| !ids.is_empty());
        self.dependencies.remove_object(ObjectId::Routine(id));
        Ok(())
    }
}
