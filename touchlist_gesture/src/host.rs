// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborators: element lookups, timers, styling, and listener binding.
//!
//! ## Overview
//!
//! The tracker never touches a DOM or a toolkit directly. A host supplies:
//!
//! - an [`ElementTree`] to walk ancestors and test classes,
//! - a [`TimerService`] to schedule one-shot timers (delivered back through
//!   [`GestureTracker::fire`](crate::tracker::GestureTracker::fire)),
//! - a [`StyleApplier`] to show [`VisualState`]s,
//! - an [`InputBinding`] to attach and detach raw listeners.
//!
//! [`ClassStyles`](crate::styles::ClassStyles) and
//! [`ManualClock`](crate::timer::ManualClock) are ready-made implementations.

use alloc::vec::Vec;

use crate::options::StyleHints;
use crate::types::{InputKinds, TimerId, VisualState};

/// Read access to the host's element hierarchy.
pub trait ElementTree<E> {
    /// Returns the parent of `el`, or `None` if `el` is a root.
    fn parent_of(&self, el: &E) -> Option<E>;
    /// Whether `el` carries `class`.
    fn has_class(&self, el: &E, class: &str) -> bool;
    /// Direct children of `el`, in document order.
    fn children(&self, el: &E) -> Vec<E>;
}

/// One-shot timer scheduling.
///
/// When a scheduled timer elapses the host calls
/// [`GestureTracker::fire`](crate::tracker::GestureTracker::fire) with its id.
/// Ids the tracker no longer expects are ignored, so delivering a cancelled
/// timer is harmless.
pub trait TimerService {
    /// Schedule a timer `delay_ms` from now.
    fn schedule(&mut self, delay_ms: u32) -> TimerId;
    /// Cancel a timer. Unknown or elapsed ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Maps visual states onto concrete element styling.
pub trait StyleApplier<E> {
    /// Show `state` on `target`, replacing any press or release styling.
    fn set_state(&mut self, target: &E, state: VisualState);

    /// Apply cosmetic hints to the list items. Called once at bind time when
    /// any hint is set.
    fn apply_hints(&mut self, targets: &[E], hints: StyleHints) {
        let _ = (targets, hints);
    }
}

/// Attaches raw listeners on the bound container.
pub trait InputBinding {
    /// Start delivering the given listener kinds to the tracker.
    fn bind(&mut self, kinds: InputKinds);
    /// Stop delivering the given listener kinds.
    fn unbind(&mut self, kinds: InputKinds);
}

/// Walk from `el` towards `root`, returning the first element carrying `class`.
///
/// `root` itself is considered; its ancestors are not.
pub(crate) fn closest_with_class<E: Clone + PartialEq>(
    tree: &impl ElementTree<E>,
    el: &E,
    root: &E,
    class: &str,
) -> Option<E> {
    let mut cur = el.clone();
    // Walk to the root; caller ensures acyclic ancestry.
    loop {
        if tree.has_class(&cur, class) {
            return Some(cur);
        }
        if cur == *root {
            return None;
        }
        match tree.parent_of(&cur) {
            Some(p) => cur = p,
            None => return None,
        }
    }
}

/// Collect every descendant of `root` carrying `class`, in document order.
pub(crate) fn descendants_with_class<E>(tree: &impl ElementTree<E>, root: &E, class: &str) -> Vec<E> {
    let mut out = Vec::new();
    let mut stack: Vec<E> = tree.children(root);
    stack.reverse();
    while let Some(el) = stack.pop() {
        let mut kids = tree.children(&el);
        kids.reverse();
        if tree.has_class(&el, class) {
            out.push(el);
        }
        stack.extend(kids);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Dom;
    use alloc::vec;

    #[test]
    fn closest_prefers_the_element_itself() {
        let mut dom = Dom::new();
        let root = dom.root();
        let item = dom.add(root, &["item"]);
        assert_eq!(closest_with_class(&dom, &item, &root, "item"), Some(item));
    }

    #[test]
    fn closest_walks_to_nearest_ancestor() {
        let mut dom = Dom::new();
        let root = dom.root();
        let outer = dom.add(root, &["item"]);
        let inner = dom.add(outer, &["item"]);
        let label = dom.add(inner, &[]);
        assert_eq!(closest_with_class(&dom, &label, &root, "item"), Some(inner));
    }

    #[test]
    fn closest_stops_at_root() {
        let mut dom = Dom::new();
        let page = dom.root();
        let list = dom.add(page, &["list"]);
        let row = dom.add(list, &[]);
        dom.set_classes(page, &["item"]);
        assert_eq!(closest_with_class(&dom, &row, &list, "item"), None);
        assert_eq!(closest_with_class(&dom, &row, &list, "list"), Some(list));
    }

    #[test]
    fn descendants_in_document_order() {
        let mut dom = Dom::new();
        let root = dom.root();
        let a = dom.add(root, &["item"]);
        let a1 = dom.add(a, &["item"]);
        let b = dom.add(root, &[]);
        let b1 = dom.add(b, &["item"]);
        assert_eq!(descendants_with_class(&dom, &root, "item"), vec![a, a1, b1]);
    }
}
