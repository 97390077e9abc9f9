//! Tests for the repaint pass, deferred first attach and disposal.

mod common;

use common::{add, counting_painter, is_dirty, native_of, node, shared_store};
use vellum_dom::NodeId;
use vellum_paint::{BindError, PaintError, RetainedPainter};
use vellum_scene::{SceneNode, SceneNodeId, Shape};

fn label(text: &str) -> Shape {
    Shape::Text {
        x: 0.0,
        y: 0.0,
        text: text.to_string(),
        fill: None,
    }
}

// ========== repaint pass ==========

#[test]
fn test_refresh_skips_clean_and_invisible_nodes() {
    let store = shared_store();
    let mut painter = counting_painter(&store);

    let a = add(&store, node(1));
    let mut clean = node(2);
    clean.clear_dirty();
    let b = add(&store, clean);
    let c = add(&store, node(3).with_invisible(true));

    painter.refresh().unwrap();

    assert_eq!(painter.binding().calls(), vec![a]);
    assert!(!is_dirty(&store, a));
    assert!(!is_dirty(&store, b));
    assert!(is_dirty(&store, c));
    assert_eq!(native_of(&store, b), None);
    assert_eq!(native_of(&store, c), None);

    let surface = painter.surface();
    let a_native = native_of(&store, a).unwrap();
    assert_eq!(surface.tree().children(surface.container()), &[a_native]);
}

#[test]
fn test_refresh_twice_is_idempotent() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let _ = add(&store, node(1));
    let _ = add(&store, node(2));

    painter.refresh().unwrap();
    let (children, allocated) = {
        let surface = painter.surface();
        (
            surface.tree().children(surface.container()).to_vec(),
            surface.tree().len(),
        )
    };
    let calls = painter.binding().calls().len();

    painter.refresh().unwrap();

    let surface = painter.surface();
    assert_eq!(surface.tree().children(surface.container()), children.as_slice());
    assert_eq!(surface.tree().len(), allocated);
    assert_eq!(painter.binding().calls().len(), calls);
}

#[test]
fn test_redirtied_node_updates_in_place() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let a = add(&store, node(1));
    painter.refresh().unwrap();
    let before = native_of(&store, a).unwrap();

    store.borrow_mut().get_mut(a).unwrap().set_shape(Shape::Rect {
        x: 42.0,
        y: 0.0,
        width: 10.0,
        height: 10.0,
        fill: None,
    });
    painter.refresh().unwrap();

    assert_eq!(native_of(&store, a), Some(before));
    assert_eq!(painter.binding().calls(), vec![a, a]);
    let surface = painter.surface();
    assert_eq!(surface.tree().children(surface.container()), &[before]);
    assert_eq!(surface.tree().style_value(before, "left"), Some("42px"));
    assert_eq!(
        surface.tree().as_element(before).unwrap().attrs.get("fill").map(String::as_str),
        Some("none")
    );
}

#[test]
fn test_repainting_text_reuses_its_text_run() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let id = add(&store, SceneNode::new(SceneNodeId(1), label("0")));
    painter.refresh().unwrap();
    let allocated = painter.surface().tree().len();

    for frame in 1..=100 {
        store
            .borrow_mut()
            .get_mut(id)
            .unwrap()
            .set_shape(label(&frame.to_string()));
        painter.refresh().unwrap();
    }

    let native = native_of(&store, id).unwrap();
    let surface = painter.surface();
    assert_eq!(surface.tree().len(), allocated);
    assert_eq!(surface.tree().children(native).len(), 1);
    let run = surface.tree().first_child(native).unwrap();
    assert_eq!(surface.tree().as_text(run), Some("100"));
}

#[test]
fn test_new_nodes_attach_in_display_list_order() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let top = add(&store, node(1).with_z(0, 2, 0));
    let bottom = add(&store, node(2).with_z(0, 1, 0));

    painter.refresh().unwrap();

    assert_eq!(painter.binding().calls(), vec![bottom, top]);
    let surface = painter.surface();
    assert_eq!(
        surface.tree().children(surface.container()),
        &[native_of(&store, bottom).unwrap(), native_of(&store, top).unwrap()]
    );
}

#[test]
fn test_late_node_is_appended_regardless_of_z() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let a = add(&store, node(1).with_z(0, 1, 0));
    let b = add(&store, node(2).with_z(0, 2, 0));
    painter.refresh().unwrap();

    // Paints below both, but attachment is append-only
    let c = add(&store, node(3).with_z(0, 0, 0));
    painter.refresh().unwrap();

    let surface = painter.surface();
    let natives: Vec<NodeId> = [a, b, c]
        .into_iter()
        .map(|id| native_of(&store, id).unwrap())
        .collect();
    assert_eq!(surface.tree().children(surface.container()), natives.as_slice());
}

// ========== first attach ==========

#[test]
fn test_container_attached_only_after_first_refresh() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let _ = add(&store, node(1));

    {
        let surface = painter.surface();
        assert!(painter.is_first_paint());
        assert!(!surface.is_mounted());
        assert!(!surface.tree().is_connected(surface.container()));
        assert!(surface.tree().children(surface.host()).is_empty());
    }

    painter.refresh().unwrap();
    painter.refresh().unwrap();

    let surface = painter.surface();
    assert!(!painter.is_first_paint());
    assert!(surface.is_mounted());
    assert_eq!(surface.tree().children(surface.host()), &[surface.container()]);
}

#[test]
fn test_empty_first_refresh_still_attaches() {
    let store = shared_store();
    let mut painter = counting_painter(&store);

    painter.refresh().unwrap();

    assert!(painter.surface().is_mounted());
    assert!(painter.binding().calls().is_empty());
}

#[test]
fn test_nodes_are_built_against_detached_container() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let a = add(&store, node(1));
    painter.binding().fail_on.set(Some(SceneNodeId(2)));
    let _ = add(&store, node(2).with_z(0, 1, 0));

    assert!(painter.refresh().is_err());

    let surface = painter.surface();
    let a_native = native_of(&store, a).unwrap();
    assert!(surface.is_attached(a_native));
    assert!(!surface.tree().is_connected(a_native));
}

// ========== binding failure ==========

#[test]
fn test_binding_failure_leaves_partial_pass() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let a = add(&store, node(1).with_z(0, 0, 0));
    let b = add(&store, node(2).with_z(0, 1, 0));
    let c = add(&store, node(3).with_z(0, 2, 0));
    painter.binding().fail_on.set(Some(b));

    let err = painter.refresh().unwrap_err();

    assert_eq!(
        err,
        PaintError::Bind {
            node: b,
            source: BindError::Failed("boom".to_string()),
        }
    );
    assert!(!is_dirty(&store, a));
    assert!(is_dirty(&store, b));
    assert!(is_dirty(&store, c));
    assert_eq!(painter.binding().calls(), vec![a, b]);
    assert!(painter.is_first_paint());

    painter.binding().fail_on.set(None);
    painter.refresh().unwrap();

    assert_eq!(painter.binding().calls(), vec![a, b, b, c]);
    assert!(!is_dirty(&store, b));
    assert!(!is_dirty(&store, c));
    assert!(painter.surface().is_mounted());
}

#[test]
fn test_missing_native_node_is_reported() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let mut stale = node(1);
    stale.bind_native(NodeId(9999));
    let id = add(&store, stale);

    let err = painter.refresh().unwrap_err();

    assert_eq!(
        err,
        PaintError::Bind {
            node: id,
            source: BindError::MissingNode(NodeId(9999)),
        }
    );
}

// ========== dispose ==========

#[test]
fn test_dispose_clears_host_and_unsubscribes() {
    let store = shared_store();
    let (tree, host) = common::host_tree(300.0, 150.0);
    let mut painter = RetainedPainter::new(tree, host, std::rc::Rc::clone(&store));
    let a = add(&store, node(1));
    painter.refresh().unwrap();

    let tree = painter.dispose();

    assert!(tree.children(host).is_empty());
    assert_eq!(store.borrow().observer_count(), 0);
    assert_eq!(native_of(&store, a), None);
    assert!(is_dirty(&store, a));

    // The bridge is gone; removal no longer reaches a surface
    let removed = store.borrow_mut().remove(a).unwrap();
    assert_eq!(removed.native(), None);
}

#[test]
fn test_dispose_before_any_refresh() {
    let store = shared_store();
    let (tree, host) = common::host_tree(300.0, 150.0);
    let painter = RetainedPainter::new(tree, host, std::rc::Rc::clone(&store));

    let tree = painter.dispose();

    assert!(tree.children(host).is_empty());
    assert!(tree.is_connected(host));
}

#[test]
fn test_dropping_painter_unsubscribes_bridge() {
    let store = shared_store();

    for _ in 0..5 {
        let painter = counting_painter(&store);
        assert_eq!(store.borrow().observer_count(), 1);
        drop(painter);
    }

    assert_eq!(store.borrow().observer_count(), 0);
}

#[test]
fn test_dropped_painter_ignores_membership_changes() {
    let store = shared_store();
    let mut painter = counting_painter(&store);
    let a = add(&store, node(1));
    painter.refresh().unwrap();
    let native = native_of(&store, a).unwrap();
    drop(painter);

    let removed = store.borrow_mut().remove(a).unwrap();

    assert_eq!(removed.native(), Some(native));
}
