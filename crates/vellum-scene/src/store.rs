//! Scene store: ordered, deduplicated membership with observer hooks.
//!
//! The store is the single source of truth for which nodes belong to the
//! scene. Painters keep their native trees in step with it by subscribing a
//! [`StoreObserver`]; the store performs its own bookkeeping first and then
//! notifies every observer exactly once per membership change.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::{SceneNode, SceneNodeId};

/// Errors reported by [`SceneStore`] mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// A node with this id is already in the store.
    #[error("scene node {0} is already in the store")]
    Duplicate(SceneNodeId),
}

/// Receives membership changes from a [`SceneStore`].
///
/// Observers run after the store's own bookkeeping: in `node_added` the node
/// is already a member; in `node_removed` it no longer is.
pub trait StoreObserver {
    /// `node` has just joined the store.
    fn node_added(&mut self, node: &mut SceneNode);

    /// `node` has just left the store.
    fn node_removed(&mut self, node: &mut SceneNode);
}

/// Handle returned by [`SceneStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// An ordered, non-owning view of scene node ids in paint order
/// (back to front).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayList {
    ids: Vec<SceneNodeId>,
}

impl DisplayList {
    /// Ids in paint order.
    #[must_use]
    pub fn as_slice(&self) -> &[SceneNodeId] {
        &self.ids
    }

    /// Iterate ids in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, SceneNodeId> {
        self.ids.iter()
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a SceneNodeId;
    type IntoIter = std::slice::Iter<'a, SceneNodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

/// Ordered, deduplicated collection of scene nodes.
#[derive(Default)]
pub struct SceneStore {
    nodes: HashMap<SceneNodeId, SceneNode>,
    /// Insertion order; the tie breaker for sorted display lists.
    order: Vec<SceneNodeId>,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_subscription: u64,
    next_node_id: u64,
}

impl fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStore")
            .field("order", &self.order)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl SceneStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id not used by any node added through this store so far.
    pub fn next_id(&mut self) -> SceneNodeId {
        while self.nodes.contains_key(&SceneNodeId(self.next_node_id)) {
            self.next_node_id += 1;
        }
        let id = SceneNodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Add a node, then notify observers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if a node with the same id is already
    /// a member. Observers are not notified in that case.
    pub fn add(&mut self, node: SceneNode) -> Result<SceneNodeId, StoreError> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        if id.0 >= self.next_node_id {
            self.next_node_id = id.0 + 1;
        }

        self.order.push(id);
        let node = self.nodes.entry(id).or_insert(node);

        for (_, observer) in &mut self.observers {
            observer.node_added(node);
        }
        Ok(id)
    }

    /// Remove a node, then notify observers, then hand the node back.
    ///
    /// Unknown ids are ignored and no observer runs.
    pub fn remove(&mut self, id: SceneNodeId) -> Option<SceneNode> {
        let mut node = self.nodes.remove(&id)?;
        self.order.retain(|&other| other != id);

        for (_, observer) in &mut self.observers {
            observer.node_removed(&mut node);
        }
        Some(node)
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: SceneNodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Whether a node with this id is a member.
    #[must_use]
    pub fn contains(&self, id: SceneNodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of member nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Member ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[SceneNodeId] {
        &self.order
    }

    /// The current display list.
    ///
    /// With `sorted`, nodes are ordered by `(zlevel, z, z2)`; equal keys keep
    /// insertion order. Without it, insertion order is returned as is.
    #[must_use]
    pub fn display_list(&self, sorted: bool) -> DisplayList {
        let mut ids = self.order.clone();
        if sorted {
            ids.sort_by_key(|id| {
                self.nodes
                    .get(id)
                    .map_or((0, 0, 0), |n| (n.zlevel, n.z, n.z2))
            });
        }
        DisplayList { ids }
    }

    /// Register an observer for membership changes.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Number of registered observers.
    #[must_use]
    pub const fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Drop a previously registered observer. Returns whether it was found.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }
}
