// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style appliers: class toggling and next-frame batching.
//!
//! ## Class toggling
//!
//! [`ClassStyles`] maps each [`VisualState`] onto the class names in
//! [`ClassNames`], driving a host [`ClassToggler`]:
//!
//! | state | effect |
//! |---|---|
//! | `Pressed` | remove `touch_end`, add `touch_start` |
//! | `Released` | remove `touch_start`, add `touch_end` |
//! | `Refreshing` | add `refresh` |
//! | `Idle` | remove all three |
//!
//! Empty class names are skipped.
//!
//! ## Frame batching
//!
//! [`FrameQueue`] wraps any [`StyleApplier`] and holds calls until the host's
//! next paint opportunity ([`FrameQueue::flush`]). Order is preserved, so the
//! final styling is the same as applying immediately.

use alloc::vec::Vec;

use crate::host::StyleApplier;
use crate::options::{ClassNames, Options, StyleHints};
use crate::types::VisualState;

/// Host-side class and inline-style mutation.
pub trait ClassToggler<E> {
    /// Add `class` to `el`.
    fn add_class(&mut self, el: &E, class: &str);
    /// Remove `class` from `el`.
    fn remove_class(&mut self, el: &E, class: &str);
    /// Set an inline style property on `el`.
    fn set_property(&mut self, el: &E, name: &str, value: &str) {
        let _ = (el, name, value);
    }
}

/// [`StyleApplier`] that expresses visual states as CSS classes.
#[derive(Clone, Debug)]
pub struct ClassStyles<C> {
    toggler: C,
    classes: ClassNames,
}

impl<C> ClassStyles<C> {
    /// Wrap `toggler`, using `classes` for the state mapping.
    pub fn new(toggler: C, classes: ClassNames) -> Self {
        Self { toggler, classes }
    }

    /// Wrap `toggler`, taking the state mapping from [`Options::classes`].
    ///
    /// Build the applier this way to configure the class names in one place.
    pub fn from_options<E>(toggler: C, options: &Options<E>) -> Self {
        Self::new(toggler, options.classes.clone())
    }

    /// The wrapped toggler.
    pub fn toggler(&self) -> &C {
        &self.toggler
    }

    /// The class mapping in use.
    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }
}

fn add<E>(toggler: &mut impl ClassToggler<E>, el: &E, class: &str) {
    if !class.is_empty() {
        toggler.add_class(el, class);
    }
}

fn remove<E>(toggler: &mut impl ClassToggler<E>, el: &E, class: &str) {
    if !class.is_empty() {
        toggler.remove_class(el, class);
    }
}

impl<E, C: ClassToggler<E>> StyleApplier<E> for ClassStyles<C> {
    fn set_state(&mut self, target: &E, state: VisualState) {
        let Self { toggler, classes } = self;
        match state {
            VisualState::Pressed => {
                remove(toggler, target, &classes.touch_end);
                add(toggler, target, &classes.touch_start);
            }
            VisualState::Released => {
                remove(toggler, target, &classes.touch_start);
                add(toggler, target, &classes.touch_end);
            }
            VisualState::Refreshing => add(toggler, target, &classes.refresh),
            VisualState::Idle => {
                remove(toggler, target, &classes.touch_start);
                remove(toggler, target, &classes.touch_end);
                remove(toggler, target, &classes.refresh);
            }
        }
    }

    fn apply_hints(&mut self, targets: &[E], hints: StyleHints) {
        for el in targets {
            for (name, value) in hints.declarations() {
                self.toggler.set_property(el, name, value);
            }
        }
    }
}

#[derive(Clone, Debug)]
enum Queued<E> {
    State(E, VisualState),
    Hints(Vec<E>, StyleHints),
}

/// [`StyleApplier`] that defers every call to the next [`flush`](Self::flush).
#[derive(Clone, Debug)]
pub struct FrameQueue<E, S> {
    inner: S,
    queue: Vec<Queued<E>>,
}

impl<E, S: StyleApplier<E>> FrameQueue<E, S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            queue: Vec::new(),
        }
    }

    /// Whether any styling is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Apply everything queued since the last flush, in call order.
    ///
    /// Call from the host's next-frame callback.
    pub fn flush(&mut self) {
        for op in self.queue.drain(..) {
            match op {
                Queued::State(el, state) => self.inner.set_state(&el, state),
                Queued::Hints(els, hints) => self.inner.apply_hints(&els, hints),
            }
        }
    }

    /// Drop everything queued without applying it.
    pub fn discard(&mut self) {
        self.queue.clear();
    }

    /// The wrapped applier.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<E: Clone, S: StyleApplier<E>> StyleApplier<E> for FrameQueue<E, S> {
    fn set_state(&mut self, target: &E, state: VisualState) {
        self.queue.push(Queued::State(target.clone(), state));
    }

    fn apply_hints(&mut self, targets: &[E], hints: StyleHints) {
        self.queue.push(Queued::Hints(targets.to_vec(), hints));
    }
}
