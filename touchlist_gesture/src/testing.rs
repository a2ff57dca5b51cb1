// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by the unit tests.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::host::{ElementTree, InputBinding, StyleApplier};
use crate::options::StyleHints;
use crate::types::{InputKinds, VisualState};

#[derive(Clone, Debug, Default)]
struct Slot {
    parent: Option<u32>,
    children: Vec<u32>,
    classes: Vec<String>,
}

/// Element tree over `u32` handles; element `0` is the root.
#[derive(Clone, Debug)]
pub(crate) struct Dom {
    slots: Vec<Slot>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        Self {
            slots: alloc::vec![Slot::default()],
        }
    }

    pub(crate) fn root(&self) -> u32 {
        0
    }

    pub(crate) fn add(&mut self, parent: u32, classes: &[&str]) -> u32 {
        let id = u32::try_from(self.slots.len()).unwrap();
        self.slots.push(Slot {
            parent: Some(parent),
            children: Vec::new(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        });
        self.slots[parent as usize].children.push(id);
        id
    }

    pub(crate) fn set_classes(&mut self, el: u32, classes: &[&str]) {
        self.slots[el as usize].classes = classes.iter().map(|c| c.to_string()).collect();
    }
}

impl ElementTree<u32> for Dom {
    fn parent_of(&self, el: &u32) -> Option<u32> {
        self.slots[*el as usize].parent
    }

    fn has_class(&self, el: &u32, class: &str) -> bool {
        self.slots[*el as usize].classes.iter().any(|c| c == class)
    }

    fn children(&self, el: &u32) -> Vec<u32> {
        self.slots[*el as usize].children.clone()
    }
}

/// Style applier that records every call; clones share the log.
#[derive(Clone, Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) states: Rc<RefCell<Vec<(u32, VisualState)>>>,
    pub(crate) hints: Rc<RefCell<Vec<(Vec<u32>, StyleHints)>>>,
}

impl Recorder {
    pub(crate) fn states(&self) -> Vec<(u32, VisualState)> {
        self.states.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.states.borrow_mut().clear();
    }
}

impl StyleApplier<u32> for Recorder {
    fn set_state(&mut self, target: &u32, state: VisualState) {
        self.states.borrow_mut().push((*target, state));
    }

    fn apply_hints(&mut self, targets: &[u32], hints: StyleHints) {
        self.hints.borrow_mut().push((targets.to_vec(), hints));
    }
}

/// Input binding that tracks the currently bound kinds.
#[derive(Clone, Debug)]
pub(crate) struct Binding {
    pub(crate) bound: Rc<RefCell<InputKinds>>,
}

impl Binding {
    pub(crate) fn new() -> Self {
        Self {
            bound: Rc::new(RefCell::new(InputKinds::empty())),
        }
    }

    pub(crate) fn bound(&self) -> InputKinds {
        *self.bound.borrow()
    }
}

impl InputBinding for Binding {
    fn bind(&mut self, kinds: InputKinds) {
        self.bound.borrow_mut().insert(kinds);
    }

    fn unbind(&mut self, kinds: InputKinds) {
        self.bound.borrow_mut().remove(kinds);
    }
}
