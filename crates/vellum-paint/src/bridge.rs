//! Keeps the container in step with store membership.
//!
//! Membership changes are independent of the dirty-flag cycle: a node can
//! leave the scene without ever being dirtied again, and its native node must
//! still leave the container.

use std::cell::RefCell;
use std::rc::Rc;

use vellum_scene::{SceneNode, StoreObserver};

use crate::RenderSurface;

/// [`StoreObserver`] that attaches and detaches native nodes as scene nodes
/// join and leave the store.
#[derive(Debug)]
pub struct MembershipBridge {
    surface: Rc<RefCell<RenderSurface>>,
}

impl MembershipBridge {
    /// Bridge store events to `surface`.
    #[must_use]
    pub const fn new(surface: Rc<RefCell<RenderSurface>>) -> Self {
        Self { surface }
    }
}

impl StoreObserver for MembershipBridge {
    /// A node arriving with a native node (bound earlier, now re-added) gets
    /// it back under the container right away, ahead of the next repaint.
    fn node_added(&mut self, node: &mut SceneNode) {
        if let Some(native) = node.native() {
            let _ = self.surface.borrow_mut().attach_native(native);
        }
    }

    /// Detach and sever the native node, then run the node's disposal hook.
    ///
    /// The node is left dirty so that, if it is ever added again, the next
    /// repaint rebuilds its native node.
    fn node_removed(&mut self, node: &mut SceneNode) {
        if let Some(native) = node.take_native() {
            let _ = self.surface.borrow_mut().detach_native(native);
            node.mark_dirty();
        }
        node.dispose();
    }
}
