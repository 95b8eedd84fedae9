//! Access control list primitive
//!
//! An ACL is a list of entries, one per grantee, each holding a bitmask of
//! privilege kinds and the role that granted them. The distinguished PUBLIC
//! grantee is a baseline every role inherits from; explicit grants are
//! additive to it, and revoking a role's own entry never retracts what
//! PUBLIC still allows.

use modsql_ast::PrivilegeType;

/// Grantee name matching every role.
pub const PUBLIC: &str = "PUBLIC";

/// Bitmask over privilege kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrivilegeSet(u8);

fn privilege_bit(privilege: PrivilegeType) -> u8 {
    match privilege {
        PrivilegeType::Create => 1 << 0,
        PrivilegeType::Execute => 1 << 1,
        PrivilegeType::References => 1 << 2,
    }
}

impl PrivilegeSet {
    pub fn empty() -> Self {
        PrivilegeSet(0)
    }

    pub fn single(privilege: PrivilegeType) -> Self {
        PrivilegeSet(privilege_bit(privilege))
    }

    pub fn contains(&self, privilege: PrivilegeType) -> bool {
        self.0 & privilege_bit(privilege) != 0
    }

    pub fn insert(&mut self, privilege: PrivilegeType) {
        self.0 |= privilege_bit(privilege);
    }

    pub fn remove(&mut self, privilege: PrivilegeType) {
        self.0 &= !privilege_bit(privilege);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// One ACL entry: a grantee, its privilege bitmask, and who granted it.
#[derive(Debug, Clone, PartialEq)]
pub struct AclEntry {
    pub grantee: String,
    pub privileges: PrivilegeSet,
    pub grantor: String,
}

/// Add a privilege to the grantee's entry, creating the entry if needed.
pub fn acl_grant(acl: &mut Vec<AclEntry>, grantee: &str, privilege: PrivilegeType, grantor: &str) {
    if let Some(entry) = acl.iter_mut().find(|e| e.grantee == grantee) {
        entry.privileges.insert(privilege);
        entry.grantor = grantor.to_string();
        return;
    }
    acl.push(AclEntry {
        grantee: grantee.to_string(),
        privileges: PrivilegeSet::single(privilege),
        grantor: grantor.to_string(),
    });
}

/// Remove a privilege from the grantee's own entry.
///
/// Only the explicit entry is touched; rights the grantee still holds
/// through PUBLIC remain until PUBLIC's entry is separately revoked.
pub fn acl_revoke(acl: &mut Vec<AclEntry>, grantee: &str, privilege: PrivilegeType) {
    if let Some(entry) = acl.iter_mut().find(|e| e.grantee == grantee) {
        entry.privileges.remove(privilege);
    }
    acl.retain(|e| !e.privileges.is_empty());
}

/// Check whether a role holds a privilege, directly or via PUBLIC.
pub fn acl_check(acl: &[AclEntry], role: &str, privilege: PrivilegeType) -> bool {
    acl.iter()
        .any(|e| (e.grantee == role || e.grantee == PUBLIC) && e.privileges.contains(privilege))
}

/// Rewrite owner references when ownership transfers.
///
/// Entries granted by or to the old owner move to the new owner; if the new
/// owner already has an entry the old one is merged into it.
pub fn acl_new_owner(acl: &mut Vec<AclEntry>, old_owner: &str, new_owner: &str) {
    for entry in acl.iter_mut() {
        if entry.grantor == old_owner {
            entry.grantor = new_owner.to_string();
        }
        if entry.grantee == old_owner {
            entry.grantee = new_owner.to_string();
        }
    }
    // Merge duplicate grantee entries the rename may have produced
    let mut merged: Vec<AclEntry> = Vec::with_capacity(acl.len());
    for entry in acl.drain(..) {
        match merged.iter_mut().find(|e| e.grantee == entry.grantee) {
            Some(existing) => {
                existing.privileges.0 |= entry.privileges.0;
            }
            None => merged.push(entry),
        }
    }
    *acl = merged;
}
