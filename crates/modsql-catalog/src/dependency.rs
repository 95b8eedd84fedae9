//! Object dependency graph
//!
//! Records which catalog objects depend on which, so drops can be refused or
//! cascaded. Owner edges tie an object to the role that owns it and follow
//! ownership transfers.

use crate::ids::ObjectId;

/// What a dependency edge points at.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferencedObject {
    Object(ObjectId),
    Role(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// Dependent cannot outlive the referenced object
    Normal,
    /// Dependent is owned by the referenced role
    Owner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdge {
    pub dependent: ObjectId,
    pub referenced: ReferencedObject,
    pub kind: DependencyKind,
}

/// In-memory dependency store.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph { edges: Vec::new() }
    }

    /// Record that `dependent` cannot outlive `referenced`.
    pub fn add_edge(&mut self, dependent: ObjectId, referenced: ObjectId) {
        let edge = DependencyEdge {
            dependent,
            referenced: ReferencedObject::Object(referenced),
            kind: DependencyKind::Normal,
        };
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    /// Record that `dependent` is owned by `owner`.
    pub fn record_owner(&mut self, dependent: ObjectId, owner: &str) {
        self.edges.push(DependencyEdge {
            dependent,
            referenced: ReferencedObject::Role(owner.to_string()),
            kind: DependencyKind::Owner,
        });
    }

    /// Re-point an object's owner edge after an ownership transfer.
    pub fn change_owner(&mut self, dependent: ObjectId, new_owner: &str) {
        for edge in self.edges.iter_mut() {
            if edge.dependent == dependent && edge.kind == DependencyKind::Owner {
                edge.referenced = ReferencedObject::Role(new_owner.to_string());
            }
        }
    }

    /// The role recorded as owner of `object`, if any.
    pub fn owner_of(&self, object: ObjectId) -> Option<&str> {
        self.edges.iter().find_map(|e| match (&e.referenced, e.kind) {
            (ReferencedObject::Role(role), DependencyKind::Owner) if e.dependent == object => {
                Some(role.as_str())
            }
            _ => None,
        })
    }

    /// Objects directly depending on `object`.
    pub fn dependents_of(&self, object: ObjectId) -> Vec<ObjectId> {
        self.edges
            .iter()
            .filter(|e| e.referenced == ReferencedObject::Object(object))
            .map(|e| e.dependent)
            .collect()
    }

    /// Objects depending on `object` transitively, deepest dependents first,
    /// so a cascade can delete them in order.
    pub fn cascade_order(&self, object: ObjectId) -> Vec<ObjectId> {
        let mut visited = vec![object];
        let mut order = Vec::new();
        self.collect_dependents(object, &mut visited, &mut order);
        order
    }

    fn collect_dependents(
        &self,
        object: ObjectId,
        visited: &mut Vec<ObjectId>,
        order: &mut Vec<ObjectId>,
    ) {
        for dependent in self.dependents_of(object) {
            if visited.contains(&dependent) {
                continue;
            }
            visited.push(dependent);
            self.collect_dependents(dependent, visited, order);
            order.push(dependent);
        }
    }

    /// Drop every edge touching `object`, in either direction.
    pub fn remove_object(&mut self, object: ObjectId) {
        self.edges.retain(|e| {
            e.dependent != object && e.referenced != ReferencedObject::Object(object)
        });
    }

    /// All recorded edges.
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }
}
