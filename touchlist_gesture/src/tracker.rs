// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture tracker implementation.
//!
//! ## Overview
//!
//! Disambiguates taps from scrolls on one bound container and derives
//! `touched`, `hitbottom`, `hittop`, `refresh`, and `scrollend` from raw input.
//!
//! ## Press axis
//!
//! - A touch start arms a debounce timer instead of styling immediately, so a
//!   fling that starts on an item never flashes press styling.
//! - When the debounce fires the press commits: [`VisualState::Pressed`].
//! - Any touch move retracts the press; the touch can no longer become a tap.
//! - A cancelled touch retracts the press and emits nothing.
//! - A touch end with no motion applies [`VisualState::Released`] and emits
//!   `touched`, at most once per `trigger_timeout_delay_ms`.
//! - A touch that lands while the list is still scrolling stops the fling and
//!   never becomes a tap.
//!
//! ## Scroll axis
//!
//! - Every scroll notification marks the list as scrolling and evaluates the
//!   hit-top, hit-bottom, and refresh thresholds.
//! - Scrolling returns to idle (emitting `scrollend`) when a touch ends without
//!   real scroll motion, or on the first untouched scroll notification after a
//!   touch that did scroll.
//!
//! ## Timers
//!
//! The tracker asks its [`TimerService`] for timers and expects the host to
//! call [`GestureTracker::fire`] when one elapses. Ids the tracker has
//! cancelled or already consumed are ignored.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::Point;
use log::{debug, trace};

use crate::error::Error;
use crate::host::{
    ElementTree, InputBinding, StyleApplier, TimerService, closest_with_class,
    descendants_with_class,
};
use crate::options::{Detect, HitBottomMode, Options};
use crate::types::{
    EventKind, GestureEvent, InputMode, PressPhase, ScrollMetrics, ScrollPhase, TimerId,
    VisualState,
};

type Callback<E> = Box<dyn FnMut(&GestureEvent<E>)>;

/// Optional user callbacks, one per [`EventKind`].
///
/// A callback runs when its event is emitted, before the event is returned to
/// the host.
pub struct Callbacks<E> {
    slots: [Option<Callback<E>>; EventKind::COUNT],
}

impl<E> Default for Callbacks<E> {
    fn default() -> Self {
        Self {
            slots: [const { None }; EventKind::COUNT],
        }
    }
}

impl<E> core::fmt::Debug for Callbacks<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Callbacks")
            .field(
                "registered",
                &self.slots.iter().filter(|s| s.is_some()).count(),
            )
            .finish_non_exhaustive()
    }
}

impl<E> Callbacks<E> {
    /// Register `f` for `kind`, replacing any previous callback.
    pub fn set(&mut self, kind: EventKind, f: impl FnMut(&GestureEvent<E>) + 'static) {
        self.slots[kind.index()] = Some(Box::new(f));
    }

    /// Remove the callback for `kind`.
    pub fn clear(&mut self, kind: EventKind) {
        self.slots[kind.index()] = None;
    }

    /// Whether a callback is registered for `kind`.
    pub fn is_set(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    fn invoke(&mut self, event: &GestureEvent<E>) {
        if let Some(f) = &mut self.slots[event.kind().index()] {
            f(event);
        }
    }
}

bitflags::bitflags! {
    /// One-shot scroll-state resets waiting for a scroll signal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Settle: u8 {
        /// Reset on the next scroll notification.
        const NEXT_SCROLL = 0b01;
        /// Reset on the next untouched scroll notification.
        const SCROLL_END  = 0b10;
    }
}

#[derive(Clone, Debug)]
struct PendingPress<E> {
    timer: TimerId,
    target: E,
}

/// Tap/scroll state machine bound to one container.
///
/// ## Usage
///
/// - Bind with [`GestureTracker::bind`], handing over the host collaborators.
/// - Register callbacks with [`GestureTracker::on`] if desired.
/// - Forward raw input to [`on_touch_start`](Self::on_touch_start),
///   [`on_touch_move`](Self::on_touch_move), [`on_touch_end`](Self::on_touch_end),
///   [`on_touch_cancel`](Self::on_touch_cancel), [`on_click`](Self::on_click), and [`on_scroll`](Self::on_scroll); forward
///   elapsed timers to [`fire`](Self::fire).
/// - Each input method returns the events it emitted, in order.
/// - Call [`dispose`](Self::dispose) (or drop the tracker) to detach.
///
/// ```
/// use touchlist_gesture::host::{ElementTree, InputBinding, StyleApplier};
/// use touchlist_gesture::options::Options;
/// use touchlist_gesture::timer::ManualClock;
/// use touchlist_gesture::tracker::GestureTracker;
/// use touchlist_gesture::types::{GestureEvent, InputKinds, InputMode, VisualState};
/// use kurbo::Point;
///
/// // A flat list: element 0 is the container, 1..=3 are its rows.
/// struct Flat;
/// impl ElementTree<u32> for Flat {
///     fn parent_of(&self, el: &u32) -> Option<u32> { (*el != 0).then_some(0) }
///     fn has_class(&self, _el: &u32, _class: &str) -> bool { false }
///     fn children(&self, el: &u32) -> Vec<u32> { if *el == 0 { vec![1, 2, 3] } else { vec![] } }
/// }
/// struct NoStyles;
/// impl StyleApplier<u32> for NoStyles {
///     fn set_state(&mut self, _t: &u32, _s: VisualState) {}
/// }
/// struct NoBinding;
/// impl InputBinding for NoBinding {
///     fn bind(&mut self, _k: InputKinds) {}
///     fn unbind(&mut self, _k: InputKinds) {}
/// }
///
/// let opts = Options::default().with_input_mode(InputMode::Touch);
/// let mut t = GestureTracker::bind(Some(0), opts, Flat, ManualClock::new(), NoStyles, NoBinding)
///     .unwrap();
/// let p = Point::new(10.0, 20.0);
/// assert!(t.on_touch_start(p, 2).is_empty());
/// assert_eq!(t.on_touch_end(2), vec![GestureEvent::Touched { target: 2, point: p }]);
/// ```
pub struct GestureTracker<E, D, T, S>
where
    E: Clone + PartialEq + core::fmt::Debug,
    D: ElementTree<E>,
    T: TimerService,
    S: StyleApplier<E>,
{
    container: E,
    options: Options<E>,
    tree: D,
    timers: T,
    styles: S,
    binding: Option<Box<dyn InputBinding>>,
    callbacks: Callbacks<E>,
    touching: bool,
    scrolling: bool,
    moved: bool,
    committed: bool,
    start_point: Point,
    pending_target: Option<E>,
    debounce: Option<PendingPress<E>>,
    suppress_repeat: bool,
    suppress_timer: Option<TimerId>,
    last_scroll_top: f64,
    touch_move_scroll_top: f64,
    refresh_armed: bool,
    hit_bottom_latched: bool,
    settle: Settle,
}

impl<E, D, T, S> core::fmt::Debug for GestureTracker<E, D, T, S>
where
    E: Clone + PartialEq + core::fmt::Debug,
    D: ElementTree<E>,
    T: TimerService,
    S: StyleApplier<E>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GestureTracker")
            .field("container", &self.container)
            .field("press", &self.press_phase())
            .field("scroll", &self.scroll_phase())
            .field("refresh_armed", &self.refresh_armed)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl<E, D, T, S> GestureTracker<E, D, T, S>
where
    E: Clone + PartialEq + core::fmt::Debug,
    D: ElementTree<E>,
    T: TimerService,
    S: StyleApplier<E>,
{
    /// Bind a tracker to `container`.
    ///
    /// Validates `options`, applies any style hints to the list items, and
    /// attaches the listener kinds for the configured [`InputMode`].
    ///
    /// Fails with [`Error::InvalidArgument`] when `container` is `None` or an
    /// option is out of range.
    pub fn bind(
        container: Option<E>,
        options: Options<E>,
        tree: D,
        timers: T,
        styles: S,
        binding: impl InputBinding + 'static,
    ) -> Result<Self, Error> {
        let container =
            container.ok_or(Error::invalid("container", "no element to bind to"))?;
        options.validate()?;

        let mut tracker = Self {
            container,
            options,
            tree,
            timers,
            styles,
            binding: None,
            callbacks: Callbacks::default(),
            touching: false,
            scrolling: false,
            moved: false,
            committed: false,
            start_point: Point::ZERO,
            pending_target: None,
            debounce: None,
            suppress_repeat: false,
            suppress_timer: None,
            last_scroll_top: 0.0,
            touch_move_scroll_top: 0.0,
            refresh_armed: false,
            hit_bottom_latched: false,
            settle: Settle::empty(),
        };

        let hints = tracker.options.style_hints;
        if !hints.is_empty() {
            let items = match &tracker.options.item_class {
                Some(class) => descendants_with_class(&tracker.tree, &tracker.container, class),
                None => tracker.tree.children(&tracker.container),
            };
            tracker.styles.apply_hints(&items, hints);
        }

        let mut binding: Box<dyn InputBinding> = Box::new(binding);
        binding.bind(tracker.options.input_mode.kinds());
        tracker.binding = Some(binding);
        debug!(
            "bound gesture tracker to {:?} ({:?} input)",
            tracker.container, tracker.options.input_mode
        );
        Ok(tracker)
    }

    /// Register a callback for `kind`, replacing any previous one.
    pub fn on(&mut self, kind: EventKind, f: impl FnMut(&GestureEvent<E>) + 'static) {
        self.callbacks.set(kind, f);
    }

    /// Mutable access to the registered callbacks.
    pub fn callbacks_mut(&mut self) -> &mut Callbacks<E> {
        &mut self.callbacks
    }

    /// The bound container.
    pub fn container(&self) -> &E {
        &self.container
    }

    /// The configuration captured at bind time.
    pub fn options(&self) -> &Options<E> {
        &self.options
    }

    /// The element tree.
    pub fn tree(&self) -> &D {
        &self.tree
    }

    /// The timer service.
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Mutable access to the timer service, e.g. to advance a
    /// [`ManualClock`](crate::timer::ManualClock).
    pub fn timers_mut(&mut self) -> &mut T {
        &mut self.timers
    }

    /// The style applier.
    pub fn styles(&self) -> &S {
        &self.styles
    }

    /// Mutable access to the style applier, e.g. to flush a
    /// [`FrameQueue`](crate::styles::FrameQueue).
    pub fn styles_mut(&mut self) -> &mut S {
        &mut self.styles
    }

    /// Whether a touch is in progress.
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Whether scroll tracking is active.
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Whether the current touch can no longer become a tap.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Whether the list is pulled past the refresh threshold.
    pub fn is_refresh_armed(&self) -> bool {
        self.refresh_armed
    }

    /// Whether `touched` emissions are currently suppressed.
    pub fn is_suppressing_repeat(&self) -> bool {
        self.suppress_repeat
    }

    /// The element currently carrying press or release styling.
    pub fn pending_target(&self) -> Option<&E> {
        self.pending_target.as_ref()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.binding.is_none()
    }

    /// Current position on the press axis.
    pub fn press_phase(&self) -> PressPhase {
        if !self.touching {
            PressPhase::Idle
        } else if self.moved {
            PressPhase::Cancelled
        } else if self.committed {
            PressPhase::Committed
        } else {
            PressPhase::Pressing
        }
    }

    /// Current position on the scroll axis.
    pub fn scroll_phase(&self) -> ScrollPhase {
        if !self.scrolling {
            ScrollPhase::Idle
        } else if self.settle.is_empty() {
            ScrollPhase::Active
        } else {
            ScrollPhase::Settling
        }
    }

    /// Handle a touch start on `target` at `point`.
    pub fn on_touch_start(&mut self, point: Point, target: E) -> Vec<GestureEvent<E>> {
        let mut out = Vec::new();
        if !self.accepts(InputMode::Touch, "touch start") {
            return out;
        }
        self.touching = true;
        self.start_point = point;

        if self.scrolling {
            // Touching a moving list stops the fling; it is not a tap.
            trace!("touch start on a scrolling list at {point:?}");
            self.moved = true;
            self.committed = false;
            self.cancel_debounce();
            self.clear_scrolling(&mut out);
            self.settle.insert(Settle::NEXT_SCROLL);
            return out;
        }

        if self.is_avoid_target(&target) {
            trace!("touch start on avoided element {target:?}");
            self.moved = true;
            return out;
        }

        self.moved = false;
        self.committed = false;
        self.cancel_debounce();
        let target = self.resolve(&target);
        let timer = self.timers.schedule(self.options.timeout_ms);
        self.debounce = Some(PendingPress { timer, target });
        out
    }

    /// Handle a touch move at `point`, with the container's current scroll offset.
    pub fn on_touch_move(&mut self, point: Point, scroll_top: f64) -> Vec<GestureEvent<E>> {
        if !self.accepts(InputMode::Touch, "touch move") {
            return Vec::new();
        }
        trace!("touch move at {point:?}, scroll offset {scroll_top}");
        self.touch_move_scroll_top = scroll_top;
        self.moved = true;
        self.committed = false;
        self.cancel_debounce();
        if let Some(target) = self.pending_target.take() {
            self.styles.set_state(&target, VisualState::Idle);
        }
        Vec::new()
    }

    /// Handle a touch end on `target`.
    pub fn on_touch_end(&mut self, target: E) -> Vec<GestureEvent<E>> {
        let mut out = Vec::new();
        if !self.accepts(InputMode::Touch, "touch end") {
            return out;
        }
        self.touching = false;
        self.committed = false;
        self.cancel_debounce();

        if !self.moved {
            let target = self.resolve(&target);
            self.styles.set_state(&target, VisualState::Released);
            self.pending_target = Some(target.clone());
            self.trigger_touched(target, self.start_point, &mut out);
        }

        self.settle_after_touch(&mut out);

        if self.refresh_armed {
            debug!("refresh released");
            self.emit(GestureEvent::Refresh, &mut out);
        }
        out
    }

    /// Handle a touch cancelled by the host (e.g. taken over by the system).
    ///
    /// Ends the touch without a tap or a refresh: a committed press is
    /// retracted and scroll state settles as for a touch end.
    pub fn on_touch_cancel(&mut self) -> Vec<GestureEvent<E>> {
        let mut out = Vec::new();
        if !self.accepts(InputMode::Touch, "touch cancel") {
            return out;
        }
        trace!("touch cancelled");
        self.touching = false;
        self.moved = true;
        self.committed = false;
        self.cancel_debounce();
        if let Some(target) = self.pending_target.take() {
            self.styles.set_state(&target, VisualState::Idle);
        }
        self.settle_after_touch(&mut out);
        out
    }

    /// Handle a click on `target` at `point`.
    ///
    /// Clicks already imply intent, so there is no press debounce or styling;
    /// repeat suppression still applies.
    pub fn on_click(&mut self, point: Point, target: E) -> Vec<GestureEvent<E>> {
        let mut out = Vec::new();
        if !self.accepts(InputMode::Pointer, "click") {
            return out;
        }
        if self.is_avoid_target(&target) {
            trace!("click on avoided element {target:?}");
            return out;
        }
        let target = self.resolve(&target);
        self.trigger_touched(target, point, &mut out);
        out
    }

    /// Handle a scroll notification.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> Vec<GestureEvent<E>> {
        let mut out = Vec::new();
        if self.is_disposed() {
            trace!("scroll ignored: tracker disposed");
            return out;
        }
        let scroll_top = metrics.scroll_top;
        self.scrolling = true;
        self.last_scroll_top = scroll_top;
        let detect = self.options.detect;

        if detect.contains(Detect::HIT_TOP) && scroll_top == 0.0 {
            self.emit(GestureEvent::HitTop, &mut out);
        }

        if detect.contains(Detect::HIT_BOTTOM) {
            if metrics.remaining() > self.options.hit_bottom_margin {
                self.hit_bottom_latched = false;
            } else if self.options.hit_bottom_mode == HitBottomMode::EveryTick
                || !self.hit_bottom_latched
            {
                self.hit_bottom_latched = true;
                self.emit(GestureEvent::HitBottom, &mut out);
            }
        }

        if detect.contains(Detect::REFRESH) {
            let past_threshold = scroll_top <= self.options.refresh_threshold;
            if past_threshold != self.refresh_armed {
                self.refresh_armed = past_threshold;
                debug!(
                    "refresh {} at offset {scroll_top}",
                    if past_threshold { "armed" } else { "disarmed" }
                );
                if let Some(target) = &self.options.refresh_target {
                    let state = if past_threshold {
                        VisualState::Refreshing
                    } else {
                        VisualState::Idle
                    };
                    self.styles.set_state(target, state);
                }
            }
        }

        if self.settle.contains(Settle::NEXT_SCROLL) {
            self.clear_scrolling(&mut out);
        }
        // Untouched scroll notifications double as the scroll-end signal.
        if !self.touching && self.settle.contains(Settle::SCROLL_END) {
            self.clear_scrolling(&mut out);
        }
        out
    }

    /// Deliver an elapsed timer.
    ///
    /// Unknown, cancelled, or already consumed ids are ignored.
    pub fn fire(&mut self, id: TimerId) {
        if self.is_disposed() {
            trace!("timer {id:?} ignored: tracker disposed");
            return;
        }
        match self.debounce.take() {
            Some(press) if press.timer == id => {
                debug!("press committed on {:?}", press.target);
                self.styles.set_state(&press.target, VisualState::Pressed);
                self.pending_target = Some(press.target);
                self.committed = true;
                return;
            }
            other => self.debounce = other,
        }
        if self.suppress_timer == Some(id) {
            self.suppress_timer = None;
            self.suppress_repeat = false;
            return;
        }
        trace!("stale timer {id:?} ignored");
    }

    /// Detach all listeners and cancel all timers.
    ///
    /// Idempotent. Every later call on this tracker is a no-op.
    pub fn dispose(&mut self) {
        let Some(mut binding) = self.binding.take() else {
            return;
        };
        binding.unbind(self.options.input_mode.kinds());
        self.cancel_debounce();
        if let Some(id) = self.suppress_timer.take() {
            self.timers.cancel(id);
        }
        self.touching = false;
        self.committed = false;
        debug!("disposed gesture tracker on {:?}", self.container);
    }

    fn accepts(&self, mode: InputMode, what: &str) -> bool {
        if self.is_disposed() {
            trace!("{what} ignored: tracker disposed");
            false
        } else if self.options.input_mode != mode {
            trace!("{what} ignored in {:?} input mode", self.options.input_mode);
            false
        } else {
            true
        }
    }

    fn resolve(&self, target: &E) -> E {
        match &self.options.item_class {
            Some(class) => closest_with_class(&self.tree, target, &self.container, class)
                .unwrap_or_else(|| target.clone()),
            None => target.clone(),
        }
    }

    fn is_avoid_target(&self, target: &E) -> bool {
        match &self.options.avoid_class {
            Some(class) => closest_with_class(&self.tree, target, &self.container, class).is_some(),
            None => false,
        }
    }

    fn cancel_debounce(&mut self) {
        if let Some(press) = self.debounce.take() {
            self.timers.cancel(press.timer);
        }
    }

    fn trigger_touched(&mut self, target: E, point: Point, out: &mut Vec<GestureEvent<E>>) {
        if self.suppress_repeat {
            trace!("touched on {target:?} suppressed as a repeat");
            return;
        }
        debug!("touched {target:?}");
        self.emit(GestureEvent::Touched { target, point }, out);
        self.suppress_repeat = true;
        if let Some(id) = self.suppress_timer.take() {
            self.timers.cancel(id);
        }
        self.suppress_timer = Some(
            self.timers
                .schedule(self.options.trigger_timeout_delay_ms),
        );
    }

    /// Settle scroll state once a touch is over.
    ///
    /// Real scroll motion during the touch (more than `scroll_slop` between the
    /// last move and the last scroll) waits for the next untouched scroll
    /// notification; anything less ends scrolling now.
    fn settle_after_touch(&mut self, out: &mut Vec<GestureEvent<E>>) {
        let delta = self.touch_move_scroll_top - self.last_scroll_top;
        if delta > self.options.scroll_slop || -delta > self.options.scroll_slop {
            self.settle.insert(Settle::SCROLL_END);
        } else {
            self.clear_scrolling(out);
        }
    }

    fn clear_scrolling(&mut self, out: &mut Vec<GestureEvent<E>>) {
        self.settle = Settle::empty();
        if !self.scrolling {
            return;
        }
        self.scrolling = false;
        self.hit_bottom_latched = false;
        self.emit(GestureEvent::ScrollEnd, out);
    }

    fn emit(&mut self, event: GestureEvent<E>, out: &mut Vec<GestureEvent<E>>) {
        self.callbacks.invoke(&event);
        out.push(event);
    }
}

impl<E, D, T, S> Drop for GestureTracker<E, D, T, S>
where
    E: Clone + PartialEq + core::fmt::Debug,
    D: ElementTree<E>,
    T: TimerService,
    S: StyleApplier<E>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
