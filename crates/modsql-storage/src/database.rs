//! Database - catalog plus session state

use modsql_catalog::Catalog;

use crate::error::StorageError;

/// In-memory database: the catalog plus per-session identity and the
/// transaction scope statements execute under.
///
/// `begin_transaction` snapshots the catalog; `rollback_transaction`
/// restores the snapshot, unwinding every catalog mutation made since,
/// including search-path and creation-namespace shadowing. Nested begins
/// stack, so a statement can open its own scope inside a caller's ambient
/// transaction.
#[derive(Debug, Clone)]
pub struct Database {
    pub catalog: Catalog,
    snapshots: Vec<Catalog>,
    current_role: Option<String>,
    security_enabled: bool,
}

impl Database {
    /// Create a new empty database.
    ///
    /// Note: security is disabled by default; call `enable_security()` to
    /// turn on access control enforcement.
    pub fn new() -> Self {
        Database {
            catalog: Catalog::new(),
            snapshots: Vec::new(),
            current_role: None,
            security_enabled: false,
        }
    }

    // ========================================================================
    // Transaction scope
    // ========================================================================

    /// Begin a transaction scope, snapshotting the catalog.
    pub fn begin_transaction(&mut self) {
        self.snapshots.push(self.catalog.clone());
    }

    /// Commit the innermost transaction scope.
    pub fn commit_transaction(&mut self) -> Result<(), StorageError> {
        self.snapshots.pop().ok_or(StorageError::NoActiveTransaction)?;
        Ok(())
    }

    /// Roll the innermost transaction scope back, restoring the catalog as
    /// it was at the matching begin.
    pub fn rollback_transaction(&mut self) -> Result<(), StorageError> {
        let snapshot = self.snapshots.pop().ok_or(StorageError::NoActiveTransaction)?;
        self.catalog = snapshot;
        Ok(())
    }

    pub fn in_transaction(&self) -> bool {
        !self.snapshots.is_empty()
    }

    // ========================================================================
    // Session identity
    // ========================================================================

    /// Set the current role (None resets to the bootstrap role).
    pub fn set_current_role(&mut self, role: Option<String>) {
        self.current_role = role;
    }

    /// Get the current role name; a fresh session runs as the bootstrap
    /// superuser until a role is set.
    pub fn get_current_role(&self) -> String {
        self.current_role.clone().unwrap_or_else(|| "admin".to_string())
    }

    pub fn is_security_enabled(&self) -> bool {
        self.security_enabled
    }

    /// Enable access control enforcement.
    pub fn enable_security(&mut self) {
        self.security_enabled = true;
    }

    /// Disable access control enforcement (testing convenience).
    pub fn disable_security(&mut self) {
        self.security_enabled = false;
    }

    /// Whether the current role is a superuser.
    pub fn current_role_is_superuser(&self) -> bool {
        self.catalog.is_superuser(&self.get_current_role())
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
