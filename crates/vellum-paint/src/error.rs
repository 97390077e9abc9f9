//! Painter error types.

use thiserror::Error;
use vellum_dom::NodeId;
use vellum_scene::SceneNodeId;

/// Failure of a [`NativeBinding`](crate::NativeBinding) to render one node.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The node's recorded native node does not exist in the tree.
    #[error("native node {0:?} does not exist")]
    MissingNode(NodeId),
    /// Any other binding-specific failure.
    #[error("{0}")]
    Failed(String),
}

/// Errors surfaced by [`RetainedPainter::refresh`](crate::RetainedPainter::refresh).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaintError {
    /// Binding failed for `node`. Nodes earlier in the display list keep
    /// their updates; `node` and everything after it stay dirty.
    #[error("failed to render scene node {node}")]
    Bind {
        /// The node being rendered when the binding failed.
        node: SceneNodeId,
        /// What the binding reported.
        #[source]
        source: BindError,
    },
}
