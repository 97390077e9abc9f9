//! Scene node → native node translation.

use vellum_dom::{NativeTree, NodeId};
use vellum_scene::{SceneNode, Shape};

use crate::BindError;

/// Creates or updates the native node for one scene node.
///
/// On the first call for a node (no recorded native node) the binding
/// allocates a new node; later calls update the recorded node in place and
/// return it unchanged. The painter records the returned id on the scene node
/// and attaches it to `container` if it is not already a child; bindings
/// should not attach it themselves.
pub trait NativeBinding {
    /// Render `node` into `tree`, returning its native node.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`] if the node cannot be rendered. The painter
    /// stops the pass and leaves `node` dirty.
    fn bind(
        &mut self,
        node: &SceneNode,
        tree: &mut NativeTree,
        container: NodeId,
    ) -> Result<NodeId, BindError>;
}

/// Default binding: one absolutely positioned element per shape.
///
/// | Shape    | Tag       |
/// |----------|-----------|
/// | `Rect`   | `rect`    |
/// | `Circle` | `oval`    |
/// | `Text`   | `textbox` |
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeBinding;

impl ShapeBinding {
    const fn tag(shape: &Shape) -> &'static str {
        match shape {
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "oval",
            Shape::Text { .. } => "textbox",
        }
    }
}

impl NativeBinding for ShapeBinding {
    fn bind(
        &mut self,
        node: &SceneNode,
        tree: &mut NativeTree,
        _container: NodeId,
    ) -> Result<NodeId, BindError> {
        let native = match node.native() {
            Some(id) if tree.as_element(id).is_some() => id,
            Some(id) => return Err(BindError::MissingNode(id)),
            None => {
                let id = tree.create_element(Self::tag(&node.shape));
                tree.set_style(id, "position", "absolute");
                id
            }
        };

        let (left, top, width, height) = match &node.shape {
            Shape::Rect {
                x,
                y,
                width,
                height,
                ..
            } => (*x, *y, Some(*width), Some(*height)),
            Shape::Circle { cx, cy, r, .. } => (cx - r, cy - r, Some(r * 2.0), Some(r * 2.0)),
            Shape::Text { x, y, text, .. } => {
                let reused = tree
                    .first_child(native)
                    .is_some_and(|run| tree.set_text(run, text));
                if !reused {
                    tree.clear_children(native);
                    let run = tree.create_text(text);
                    tree.append_child(native, run);
                }
                (*x, *y, None, None)
            }
        };

        tree.set_style(native, "left", &format!("{left}px"));
        tree.set_style(native, "top", &format!("{top}px"));
        if let Some(width) = width {
            tree.set_style(native, "width", &format!("{width}px"));
        }
        if let Some(height) = height {
            tree.set_style(native, "height", &format!("{height}px"));
        }
        tree.set_attribute(native, "fill", node.shape.fill().unwrap_or("none"));

        Ok(native)
    }
}
