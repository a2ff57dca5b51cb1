// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite scroll and pull-to-refresh with frame-batched styling.
//!
//! Replays a pull past the refresh threshold, a release, and a fling to the
//! bottom of the content. Styling is queued in a `FrameQueue` and flushed once
//! per simulated frame.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p touchlist_demos --example gesture_scroll`

use kurbo::Point;
use touchlist_gesture::GestureTracker;
use touchlist_gesture::host::{ElementTree, InputBinding, StyleApplier};
use touchlist_gesture::options::Options;
use touchlist_gesture::styles::FrameQueue;
use touchlist_gesture::timer::ManualClock;
use touchlist_gesture::types::{GestureEvent, InputKinds, InputMode, ScrollMetrics, VisualState};

const LIST: u32 = 1;
const SPINNER: u32 = 2;

struct Page;

impl ElementTree<u32> for Page {
    fn parent_of(&self, el: &u32) -> Option<u32> {
        (*el != 0).then_some(0)
    }

    fn has_class(&self, _el: &u32, _class: &str) -> bool {
        false
    }

    fn children(&self, _el: &u32) -> Vec<u32> {
        Vec::new()
    }
}

struct Paint;

impl StyleApplier<u32> for Paint {
    fn set_state(&mut self, target: &u32, state: VisualState) {
        println!("  paint #{target} as {state:?}");
    }
}

struct Listeners;

impl InputBinding for Listeners {
    fn bind(&mut self, _kinds: InputKinds) {}
    fn unbind(&mut self, _kinds: InputKinds) {}
}

type Tracker = GestureTracker<u32, Page, ManualClock, FrameQueue<u32, Paint>>;

fn frame(t: &mut Tracker) {
    if t.styles().has_pending() {
        println!("  -- frame --");
        t.styles_mut().flush();
    }
}

fn scroll(t: &mut Tracker, top: f64, height: f64) -> Vec<GestureEvent<u32>> {
    let ev = t.on_scroll(ScrollMetrics::new(top, height, 600.0));
    if !ev.is_empty() {
        println!("  scroll {top}: {ev:?}");
    }
    ev
}

fn main() {
    env_logger::init();

    let opts = Options::default()
        .with_input_mode(InputMode::Touch)
        .with_refresh_target(SPINNER);
    let mut t = GestureTracker::bind(
        Some(LIST),
        opts,
        Page,
        ManualClock::new(),
        FrameQueue::new(Paint),
        Listeners,
    )
    .expect("valid options");

    println!("== Pull to refresh ==");
    t.on_touch_start(Point::new(100.0, 10.0), 7);
    for (i, top) in [-20.0, -50.0, -85.0, -95.0].into_iter().enumerate() {
        t.on_touch_move(Point::new(100.0, 10.0 + 30.0 * (i as f64 + 1.0)), top);
        scroll(&mut t, top, 3000.0);
        frame(&mut t);
    }
    let released = t.on_touch_end(7);
    println!("  release: {released:?}");
    assert_eq!(released, vec![GestureEvent::ScrollEnd, GestureEvent::Refresh]);
    for top in [-40.0, 0.0] {
        scroll(&mut t, top, 3000.0);
    }
    frame(&mut t);
    assert!(!t.is_refresh_armed());

    println!("== Fling to the bottom ==");
    t.on_touch_start(Point::new(100.0, 500.0), 7);
    t.on_touch_move(Point::new(100.0, 100.0), 0.0);
    t.on_touch_end(7);
    let mut hits = 0;
    for top in (0..=24).map(|i| f64::from(i) * 100.0) {
        hits += scroll(&mut t, top, 3000.0)
            .iter()
            .filter(|e| **e == GestureEvent::HitBottom)
            .count();
    }
    assert_eq!(hits, 1, "hitbottom is latched for the scroll session");

    println!("== More content loaded ==");
    let more = scroll(&mut t, 2400.0, 6000.0);
    assert!(more.is_empty());
}
