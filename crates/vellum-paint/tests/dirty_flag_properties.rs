//! Generated checks of the repaint pass over arbitrary dirty and invisible
//! flags.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{add, counting_painter, is_dirty, node, shared_store};
use quickcheck_macros::quickcheck;
use vellum_scene::{SceneNodeId, SceneStore};

/// Visible nodes end clean; invisible nodes keep the flag they had going in.
fn settled(store: &Rc<RefCell<SceneStore>>, ids: &[SceneNodeId], flags: &[(bool, bool)]) -> bool {
    ids.iter().zip(flags).all(|(&id, &(dirty, invisible))| {
        if invisible {
            is_dirty(store, id) == dirty
        } else {
            !is_dirty(store, id)
        }
    })
}

/// One node per `(dirty, invisible)` pair is refreshed, re-dirtied per
/// `redirty`, and refreshed again.
#[quickcheck]
#[allow(clippy::needless_pass_by_value)]
fn test_refresh_settles_dirty_flags(flags: Vec<(bool, bool)>, redirty: Vec<bool>) -> bool {
    let store = shared_store();
    let mut painter = counting_painter(&store);

    let mut ids = Vec::new();
    for (raw, &(dirty, invisible)) in (0_u64..).zip(&flags) {
        let mut n = node(raw).with_invisible(invisible);
        if !dirty {
            n.clear_dirty();
        }
        ids.push(add(&store, n));
    }
    let mut painted: Vec<bool> = flags.iter().map(|&(dirty, inv)| dirty && !inv).collect();

    if painter.refresh().is_err() {
        return false;
    }
    let expected: Vec<SceneNodeId> = ids
        .iter()
        .zip(&painted)
        .filter_map(|(&id, &p)| p.then_some(id))
        .collect();
    if painter.binding().calls() != expected || !settled(&store, &ids, &flags) {
        return false;
    }

    let mut current: Vec<(bool, bool)> = ids
        .iter()
        .zip(&flags)
        .map(|(&id, &(_, invisible))| (is_dirty(&store, id), invisible))
        .collect();
    for (i, &again) in redirty.iter().enumerate().take(ids.len()) {
        if again {
            store.borrow_mut().get_mut(ids[i]).unwrap().mark_dirty();
            current[i].0 = true;
            painted[i] |= !current[i].1;
        }
    }
    if painter.refresh().is_err() {
        return false;
    }

    let attached = {
        let surface = painter.surface();
        surface.tree().children(surface.container()).len()
    };
    attached == painted.iter().filter(|&&p| p).count() && settled(&store, &ids, &current)
}
