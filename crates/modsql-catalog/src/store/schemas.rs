//! Schema management operations for the catalog.

use crate::{errors::CatalogError, ids::SchemaId, schema::Schema};

impl super::Catalog {
    /// Create a new schema owned by `owner`.
    pub fn create_schema(&mut self, name: String, owner: String) -> Result<SchemaId, CatalogError> {
        if self.schema_names.contains_key(&name) {
            return Err(CatalogError::SchemaAlreadyExists(name));
        }
        if !self.roles.contains(&owner) {
            return Err(CatalogError::RoleNotFound(owner));
        }
        let id = SchemaId(self.allocate_oid());
        self.schema_names.insert(name.clone(), id);
        self.schemas.insert(id, Schema::new(id, name, owner));
        Ok(id)
    }

    /// Get a schema by id.
    pub fn get_schema(&self, id: SchemaId) -> Option<&Schema> {
        self.schemas.get(&id)
    }

    pub(crate) fn get_schema_mut(&mut self, id: SchemaId) -> Option<&mut Schema> {
        self.schemas.get_mut(&id)
    }

    /// Look up a schema id by name.
    pub fn schema_id(&self, name: &str) -> Option<SchemaId> {
        self.schema_names.get(name).copied()
    }

    /// Check if a schema exists.
    pub fn schema_exists(&self, name: &str) -> bool {
        self.schema_names.contains_key(name)
    }

    /// List all schema names.
    pub fn list_schemas(&self) -> Vec<String> {
        self.schema_names.keys().cloned().collect()
    }

    /// Set the current schema for unqualified object references.
    pub fn set_current_schema(&mut self, name: &str) -> Result<(), CatalogError> {
        if !self.schema_exists(name) {
            return Err(CatalogError::SchemaNotFound(name.to_string()));
        }
        self.current_schema = name.to_string();
        Ok(())
    }

    /// Get the current schema name.
    pub fn get_current_schema(&self) -> &str {
        &self.current_schema
    }

    /// Id of the current schema.
    pub fn current_schema_id(&self) -> SchemaId {
        // The current schema is validated on every set, so the index holds it
        self.schema_names[&self.current_schema]
    }
}
