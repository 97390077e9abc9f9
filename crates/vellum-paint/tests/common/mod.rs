//! Shared fixtures for painter tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vellum_dom::{ClientMetrics, NativeTree, NodeId};
use vellum_paint::{BindError, NativeBinding, RetainedPainter, ShapeBinding, SurfaceConfig};
use vellum_scene::{SceneNode, SceneNodeId, SceneStore, Shape};

/// Binding that records every call and can be told to fail for one node.
#[derive(Debug, Default)]
pub struct CountingBinding {
    pub calls: RefCell<Vec<SceneNodeId>>,
    pub fail_on: Cell<Option<SceneNodeId>>,
    inner: ShapeBinding,
}

impl CountingBinding {
    pub fn calls(&self) -> Vec<SceneNodeId> {
        self.calls.borrow().clone()
    }
}

impl NativeBinding for CountingBinding {
    fn bind(
        &mut self,
        node: &SceneNode,
        tree: &mut NativeTree,
        container: NodeId,
    ) -> Result<NodeId, BindError> {
        self.calls.borrow_mut().push(node.id());
        if self.fail_on.get() == Some(node.id()) {
            return Err(BindError::Failed("boom".to_string()));
        }
        self.inner.bind(node, tree, container)
    }
}

/// A document with one host element measured at `width` x `height`.
pub fn host_tree(width: f64, height: f64) -> (NativeTree, NodeId) {
    let mut tree = NativeTree::new();
    let host = tree.create_element("div");
    tree.append_child(NodeId::ROOT, host);
    tree.set_client_metrics(
        host,
        ClientMetrics {
            client_width: width,
            client_height: height,
        },
    );
    (tree, host)
}

pub fn rect(x: f64) -> Shape {
    Shape::Rect {
        x,
        y: 0.0,
        width: 10.0,
        height: 10.0,
        fill: Some("red".to_string()),
    }
}

pub fn node(id: u64) -> SceneNode {
    SceneNode::new(SceneNodeId(id), rect(0.0))
}

pub fn shared_store() -> Rc<RefCell<SceneStore>> {
    Rc::new(RefCell::new(SceneStore::new()))
}

/// Painter over a 300x150 host with a counting binding.
pub fn counting_painter(store: &Rc<RefCell<SceneStore>>) -> RetainedPainter<CountingBinding> {
    let (tree, host) = host_tree(300.0, 150.0);
    RetainedPainter::with_config(
        tree,
        host,
        Rc::clone(store),
        CountingBinding::default(),
        &SurfaceConfig::default(),
    )
}

pub fn add(store: &Rc<RefCell<SceneStore>>, node: SceneNode) -> SceneNodeId {
    store.borrow_mut().add(node).unwrap()
}

pub fn native_of(store: &Rc<RefCell<SceneStore>>, id: SceneNodeId) -> Option<NodeId> {
    store.borrow().get(id).and_then(SceneNode::native)
}

pub fn is_dirty(store: &Rc<RefCell<SceneStore>>, id: SceneNodeId) -> bool {
    store.borrow().get(id).is_some_and(SceneNode::is_dirty)
}
