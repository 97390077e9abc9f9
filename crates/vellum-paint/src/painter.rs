//! Retained-mode painter.
//!
//! The painter walks the store's display list back to front and re-renders
//! only dirty, visible nodes. Native nodes created during a pass are appended
//! to the container in display-list order.
//!
//! NOTE: attachment is append-only. A node created later is appended after
//! every existing sibling, and existing native nodes are never moved, so if
//! the store reorders nodes without all of them being re-created the native
//! stacking order can drift from the display list.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use vellum_dom::{NativeTree, NodeId};
use vellum_scene::{DisplayList, SceneStore, SubscriptionId};

use crate::{
    Capabilities, MembershipBridge, NativeBinding, PaintError, RenderSurface, ShapeBinding,
    SurfaceConfig, SurfaceOp, Unsupported,
};

/// Keeps a [`RenderSurface`] in step with a [`SceneStore`].
///
/// Construction subscribes a [`MembershipBridge`] to the store. Disposing
/// or dropping the painter unsubscribes it. Disposal consumes the painter, so
/// no operation can run on a disposed painter.
#[derive(Debug)]
pub struct RetainedPainter<B = ShapeBinding> {
    surface: Rc<RefCell<RenderSurface>>,
    store: Rc<RefCell<SceneStore>>,
    binding: B,
    subscription: Option<SubscriptionId>,
}

impl RetainedPainter<ShapeBinding> {
    /// Painter for `host` in `tree` with the default shape binding and
    /// configuration.
    #[must_use]
    pub fn new(tree: NativeTree, host: NodeId, store: Rc<RefCell<SceneStore>>) -> Self {
        Self::with_config(tree, host, store, ShapeBinding, &SurfaceConfig::default())
    }
}

impl<B: NativeBinding> RetainedPainter<B> {
    /// Painter with an explicit binding and configuration.
    ///
    /// The container is created detached and sized from the host right away.
    #[must_use]
    pub fn with_config(
        tree: NativeTree,
        host: NodeId,
        store: Rc<RefCell<SceneStore>>,
        binding: B,
        config: &SurfaceConfig,
    ) -> Self {
        let mut surface = RenderSurface::new(tree, host, config);
        let _ = surface.resize();
        let surface = Rc::new(RefCell::new(surface));

        let bridge = MembershipBridge::new(Rc::clone(&surface));
        let subscription = store.borrow_mut().subscribe(Box::new(bridge));

        Self {
            surface,
            store,
            binding,
            subscription: Some(subscription),
        }
    }

    /// Repaint every dirty, visible node in the store's sorted display list.
    ///
    /// On the first pass that completes, the container is attached to the
    /// host. Calling this twice without touching any node changes nothing the
    /// second time.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::Bind`] when the binding fails. Nodes before the
    /// failing one keep their updates; the failing node and the rest of the
    /// list are left dirty, and the container is not attached by this call.
    pub fn refresh(&mut self) -> Result<(), PaintError> {
        let store = Rc::clone(&self.store);
        let mut store = store.borrow_mut();
        let list = store.display_list(true);
        self.paint_list(&mut store, &list)
    }

    fn paint_list(
        &mut self,
        store: &mut SceneStore,
        list: &DisplayList,
    ) -> Result<(), PaintError> {
        let mut surface = self.surface.borrow_mut();
        let container = surface.container();

        for &id in list {
            let Some(node) = store.get_mut(id) else {
                continue;
            };
            if !node.is_dirty() || node.invisible {
                continue;
            }

            let native = self
                .binding
                .bind(node, surface.tree_mut(), container)
                .map_err(|source| PaintError::Bind { node: id, source })?;

            if let Some(previous) = node.native().filter(|&prev| prev != native) {
                let _ = surface.detach_native(previous);
            }
            node.bind_native(native);
            // First creation
            let _ = surface.attach_native(native);
            node.clear_dirty();
        }

        // Deferred so the host lays out the initial scene once
        let _ = surface.mount();
        Ok(())
    }

    /// Re-read the host size and apply it to the container.
    ///
    /// The size is only applied when both width and height changed; a change
    /// to just one of them is ignored.
    pub fn resize(&mut self) {
        let _ = self.surface.borrow_mut().resize();
    }

    /// Clear the host, detach from the store and hand back the native tree.
    ///
    /// Scene nodes still in the store lose their native bindings and are
    /// marked dirty, since their native nodes belong to the returned tree.
    #[must_use]
    pub fn dispose(mut self) -> NativeTree {
        self.unsubscribe();

        {
            let mut store = self.store.borrow_mut();
            let ids = store.ids().to_vec();
            for id in ids {
                let Some(node) = store.get_mut(id) else {
                    continue;
                };
                if node.take_native().is_some() {
                    node.mark_dirty();
                }
            }
        }

        let mut surface = self.surface.borrow_mut();
        surface.clear_host();
        surface.take_tree()
    }

    /// Last applied width.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.surface.borrow().width()
    }

    /// Last applied height.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.surface.borrow().height()
    }

    /// Whether the container still waits for its first attach.
    #[must_use]
    pub fn is_first_paint(&self) -> bool {
        self.surface.borrow().is_first_paint()
    }

    /// Borrow the surface for inspection.
    #[must_use]
    pub fn surface(&self) -> Ref<'_, RenderSurface> {
        self.surface.borrow()
    }

    /// Mutably borrow the surface, e.g. to update host metrics before a
    /// [`resize`](Self::resize). Release the borrow before touching the store.
    #[must_use]
    pub fn surface_mut(&self) -> RefMut<'_, RenderSurface> {
        self.surface.borrow_mut()
    }

    /// The store this painter follows.
    #[must_use]
    pub const fn store(&self) -> &Rc<RefCell<SceneStore>> {
        &self.store
    }

    /// The binding used for repaints.
    #[must_use]
    pub const fn binding(&self) -> &B {
        &self.binding
    }

    /// Optional features this painter provides: none.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Whether `op` can be used on this painter.
    #[must_use]
    pub const fn supports(&self, op: SurfaceOp) -> bool {
        self.capabilities().contains(op.capability())
    }

    /// Invoke an optional operation by value. Every one is unsupported here:
    /// the call is reported and nothing is rendered.
    #[allow(clippy::unused_self)]
    pub fn surface_op(&self, op: SurfaceOp) -> Unsupported {
        Unsupported::report(op)
    }

    /// Layer lookup. Unsupported.
    pub fn get_layer(&self, _zlevel: i32) -> Unsupported {
        self.surface_op(SurfaceOp::GetLayer)
    }

    /// Layer insertion. Unsupported.
    pub fn insert_layer(&self, _zlevel: i32) -> Unsupported {
        self.surface_op(SurfaceOp::InsertLayer)
    }

    /// Layer iteration. Unsupported.
    pub fn each_layer(&self) -> Unsupported {
        self.surface_op(SurfaceOp::EachLayer)
    }

    /// Iteration over built-in layers. Unsupported.
    pub fn each_builtin_layer(&self) -> Unsupported {
        self.surface_op(SurfaceOp::EachBuiltinLayer)
    }

    /// Iteration over host layers. Unsupported.
    pub fn each_other_layer(&self) -> Unsupported {
        self.surface_op(SurfaceOp::EachOtherLayer)
    }

    /// Layer listing. Unsupported.
    pub fn get_layers(&self) -> Unsupported {
        self.surface_op(SurfaceOp::GetLayers)
    }

    /// Layer modification. Unsupported.
    pub fn mod_layer(&self, _zlevel: i32) -> Unsupported {
        self.surface_op(SurfaceOp::ModLayer)
    }

    /// Layer deletion. Unsupported.
    pub fn del_layer(&self, _zlevel: i32) -> Unsupported {
        self.surface_op(SurfaceOp::DelLayer)
    }

    /// Layer clearing. Unsupported.
    pub fn clear_layer(&self, _zlevel: i32) -> Unsupported {
        self.surface_op(SurfaceOp::ClearLayer)
    }

    /// Surface export. Unsupported.
    pub fn to_data_url(&self) -> Unsupported {
        self.surface_op(SurfaceOp::ToDataUrl)
    }

    /// Path rasterization. Unsupported.
    pub fn path_to_image(&self) -> Unsupported {
        self.surface_op(SurfaceOp::PathToImage)
    }
}

impl<B> RetainedPainter<B> {
    fn unsubscribe(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        // Skipped if the store is borrowed mid-drop
        if let Ok(mut store) = self.store.try_borrow_mut() {
            let _ = store.unsubscribe(subscription);
        }
    }
}

impl<B> Drop for RetainedPainter<B> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
