//! Scene nodes.

use std::fmt;

use serde::{Deserialize, Serialize};
use vellum_dom::NodeId;

use crate::Shape;

/// Stable identity of a scene node within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneNodeId(pub u64);

impl fmt::Display for SceneNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A drawable entity with dirty/visibility state.
///
/// A node starts dirty and visible. Its native binding is created lazily by a
/// painter on the first repaint and severed when the node leaves the store.
pub struct SceneNode {
    id: SceneNodeId,
    /// Coarse paint layer; lower levels paint first.
    pub zlevel: i32,
    /// Stack order within a level.
    pub z: i32,
    /// Secondary stack order within equal `z`.
    pub z2: i32,
    /// Invisible nodes are skipped by the repaint pass.
    pub invisible: bool,
    /// What the node draws.
    pub shape: Shape,
    dirty: bool,
    native: Option<NodeId>,
    disposer: Option<Box<dyn FnOnce(SceneNodeId)>>,
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("id", &self.id)
            .field("zlevel", &self.zlevel)
            .field("z", &self.z)
            .field("z2", &self.z2)
            .field("invisible", &self.invisible)
            .field("shape", &self.shape)
            .field("dirty", &self.dirty)
            .field("native", &self.native)
            .field("disposer", &self.disposer.is_some())
            .finish()
    }
}

impl SceneNode {
    /// Create a dirty, visible node at stack level zero.
    #[must_use]
    pub fn new(id: SceneNodeId, shape: Shape) -> Self {
        Self {
            id,
            zlevel: 0,
            z: 0,
            z2: 0,
            invisible: false,
            shape,
            dirty: true,
            native: None,
            disposer: None,
        }
    }

    /// Builder-style stack order.
    #[must_use]
    pub const fn with_z(mut self, zlevel: i32, z: i32, z2: i32) -> Self {
        self.zlevel = zlevel;
        self.z = z;
        self.z2 = z2;
        self
    }

    /// Builder-style visibility.
    #[must_use]
    pub const fn with_invisible(mut self, invisible: bool) -> Self {
        self.invisible = invisible;
        self
    }

    /// The node's identity.
    #[must_use]
    pub const fn id(&self) -> SceneNodeId {
        self.id
    }

    /// Whether the node needs re-rendering on the next pass.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Request a full re-render on the next pass.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Mark the node as rendered.
    pub const fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Replace the shape and mark the node dirty.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.dirty = true;
    }

    /// The bound native node, if any.
    #[must_use]
    pub const fn native(&self) -> Option<NodeId> {
        self.native
    }

    /// Record the native node this scene node renders into.
    pub const fn bind_native(&mut self, native: NodeId) {
        self.native = Some(native);
    }

    /// Sever the native binding, returning the native node it pointed to.
    pub const fn take_native(&mut self) -> Option<NodeId> {
        self.native.take()
    }

    /// Register a hook run once when the node is disposed.
    #[must_use]
    pub fn on_dispose(mut self, hook: impl FnOnce(SceneNodeId) + 'static) -> Self {
        self.disposer = Some(Box::new(hook));
        self
    }

    /// Whether a disposal hook is still pending.
    #[must_use]
    pub const fn has_dispose_hook(&self) -> bool {
        self.disposer.is_some()
    }

    /// Run the disposal hook, if one is registered. Later calls do nothing.
    pub fn dispose(&mut self) {
        if let Some(hook) = self.disposer.take() {
            hook(self.id);
        }
    }
}
