//! Session resolution state: search path and creation namespace.
//!
//! Both are transaction-scoped mutable state. A composite statement that
//! shadows them (CREATE MODULE prepending the module to the path) must
//! restore the saved values on its success path; the failure path is
//! unwound by transaction rollback, which restores the whole catalog.

use crate::ids::NamespaceId;

/// Saved copy of the resolution context, restored after a composite
/// statement finishes executing its body.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    search_path: Vec<NamespaceId>,
    creation_namespace: Option<NamespaceId>,
}

impl super::Catalog {
    /// The active search path, front entries consulted first.
    pub fn search_path(&self) -> &[NamespaceId] {
        &self.search_path
    }

    /// Replace the search path.
    pub fn set_search_path(&mut self, path: Vec<NamespaceId>) {
        self.search_path = path;
    }

    /// Namespace that unqualified CREATE statements target.
    ///
    /// Defaults to the current schema unless a composite statement has bound
    /// a creation namespace.
    pub fn effective_creation_namespace(&self) -> NamespaceId {
        self.creation_namespace.unwrap_or(NamespaceId::Schema(self.current_schema_id()))
    }

    /// Snapshot the resolution context before shadowing it.
    pub fn save_resolution_context(&self) -> ResolutionContext {
        ResolutionContext {
            search_path: self.search_path.clone(),
            creation_namespace: self.creation_namespace,
        }
    }

    /// Prepend a namespace to the search path and make it the creation
    /// target, the shadowing CREATE MODULE applies for its body.
    pub fn push_creation_namespace(&mut self, namespace: NamespaceId) {
        self.search_path.insert(0, namespace);
        self.creation_namespace = Some(namespace);
    }

    /// Bind the creation target without touching the search path (ALTER
    /// MODULE single-statement forms).
    pub fn bind_creation_namespace(&mut self, namespace: NamespaceId) {
        self.creation_namespace = Some(namespace);
    }

    /// Restore a previously saved resolution context.
    pub fn restore_resolution_context(&mut self, saved: ResolutionContext) {
        self.search_path = saved.search_path;
        self.creation_namespace = saved.creation_namespace;
    }
}
