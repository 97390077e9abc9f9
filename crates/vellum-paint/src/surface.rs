//! The render surface: one container node under a host element.

use vellum_dom::{NativeTree, NodeId};

use crate::{HostMetrics, SurfaceConfig};

/// Owns the native tree, the host element and the painter's container.
///
/// The container is created detached. It joins the host exactly once, via
/// [`mount`](Self::mount), after which `first_paint` stays `false`.
#[derive(Debug)]
pub struct RenderSurface {
    tree: NativeTree,
    host: NodeId,
    container: NodeId,
    width: Option<i32>,
    height: Option<i32>,
    first_paint: bool,
}

impl RenderSurface {
    /// Build a detached container for `host` inside `tree`.
    #[must_use]
    pub fn new(mut tree: NativeTree, host: NodeId, config: &SurfaceConfig) -> Self {
        let container = tree.create_element(&config.container_tag);
        tree.set_css_text(container, &config.container_css);
        Self {
            tree,
            host,
            container,
            width: None,
            height: None,
            first_paint: true,
        }
    }

    /// The native tree.
    #[must_use]
    pub const fn tree(&self) -> &NativeTree {
        &self.tree
    }

    /// Mutable access to the native tree.
    pub const fn tree_mut(&mut self) -> &mut NativeTree {
        &mut self.tree
    }

    /// The host element the container is (or will be) attached to.
    #[must_use]
    pub const fn host(&self) -> NodeId {
        self.host
    }

    /// The container every native node is attached under.
    #[must_use]
    pub const fn container(&self) -> NodeId {
        self.container
    }

    /// Last applied width, `0` before the first resize.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width.unwrap_or_default()
    }

    /// Last applied height, `0` before the first resize.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height.unwrap_or_default()
    }

    /// Whether the container is still waiting for its first attach.
    #[must_use]
    pub const fn is_first_paint(&self) -> bool {
        self.first_paint
    }

    /// Whether the container is currently a child of the host.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.tree.parent(self.container) == Some(self.host)
    }

    /// Whether `native` is a direct child of the container.
    #[must_use]
    pub fn is_attached(&self, native: NodeId) -> bool {
        self.tree.parent(native) == Some(self.container)
    }

    /// Append `native` to the container unless it is already a child or does
    /// not exist in this tree. Returns whether the tree changed.
    pub fn attach_native(&mut self, native: NodeId) -> bool {
        if self.is_attached(native) || !self.tree.contains(native) {
            return false;
        }
        self.tree.append_child(self.container, native);
        true
    }

    /// Remove `native` from the container if it is a child.
    /// Returns whether the tree changed.
    pub fn detach_native(&mut self, native: NodeId) -> bool {
        if !self.is_attached(native) {
            return false;
        }
        self.tree.remove_child(self.container, native);
        true
    }

    /// Attach the container to the host if this is the first paint.
    /// Returns whether the attach happened.
    pub fn mount(&mut self) -> bool {
        if !self.first_paint {
            return false;
        }
        self.tree.append_child(self.host, self.container);
        self.first_paint = false;
        true
    }

    /// Recompute the size from host metrics and apply it to the container.
    ///
    /// The new size is only recorded and applied when *both* dimensions
    /// differ from the recorded ones; a change in just one is ignored.
    /// Returns whether the size was applied.
    pub fn resize(&mut self) -> bool {
        let metrics = HostMetrics::read(&self.tree, self.host);
        let width = metrics.content_width();
        let height = metrics.content_height();

        if self.width == Some(width) || self.height == Some(height) {
            return false;
        }
        self.width = Some(width);
        self.height = Some(height);
        self.tree
            .set_style(self.container, "width", &format!("{width}px"));
        self.tree
            .set_style(self.container, "height", &format!("{height}px"));
        true
    }

    /// Drop everything rendered into the host.
    pub fn clear_host(&mut self) {
        self.tree.clear_children(self.host);
    }

    /// Move the tree out, leaving an empty document in its place.
    pub fn take_tree(&mut self) -> NativeTree {
        std::mem::take(&mut self.tree)
    }
}
