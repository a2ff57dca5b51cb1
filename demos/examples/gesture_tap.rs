// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Taps versus drags on a small list.
//!
//! Builds a three-row list, styles it through class toggling, and replays a
//! tap, a drag, and a tap on an avoided button.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p touchlist_demos --example gesture_tap`

use std::collections::BTreeSet;

use kurbo::Point;
use touchlist_gesture::GestureTracker;
use touchlist_gesture::host::{ElementTree, InputBinding};
use touchlist_gesture::options::{ClassNames, Options, StyleHints};
use touchlist_gesture::styles::{ClassStyles, ClassToggler};
use touchlist_gesture::timer::ManualClock;
use touchlist_gesture::types::{EventKind, GestureEvent, InputKinds, InputMode};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
struct El(u32);

// list(0) ─ row(1) ─ text(2)
//         ├ row(3) ─ text(4)
//         └ row(5) ─ button.skip(6)
struct Doc;

impl ElementTree<El> for Doc {
    fn parent_of(&self, el: &El) -> Option<El> {
        match el.0 {
            0 => None,
            1 | 3 | 5 => Some(El(0)),
            n => Some(El(n - 1)),
        }
    }

    fn has_class(&self, el: &El, class: &str) -> bool {
        match class {
            "row" => matches!(el.0, 1 | 3 | 5),
            "skip" => el.0 == 6,
            _ => false,
        }
    }

    fn children(&self, el: &El) -> Vec<El> {
        match el.0 {
            0 => vec![El(1), El(3), El(5)],
            n @ (1 | 3 | 5) => vec![El(n + 1)],
            _ => vec![],
        }
    }
}

#[derive(Default)]
struct Classes(BTreeSet<(El, String)>);

impl ClassToggler<El> for Classes {
    fn add_class(&mut self, el: &El, class: &str) {
        println!("  + {el:?}.{class}");
        self.0.insert((*el, class.to_string()));
    }

    fn remove_class(&mut self, el: &El, class: &str) {
        if self.0.remove(&(*el, class.to_string())) {
            println!("  - {el:?}.{class}");
        }
    }

    fn set_property(&mut self, el: &El, name: &str, value: &str) {
        println!("  {el:?} {name}: {value}");
    }
}

struct Listeners;

impl InputBinding for Listeners {
    fn bind(&mut self, kinds: InputKinds) {
        println!("listening for {kinds:?}");
    }

    fn unbind(&mut self, kinds: InputKinds) {
        println!("stopped listening for {kinds:?}");
    }
}

type Tracker = GestureTracker<El, Doc, ManualClock, ClassStyles<Classes>>;

fn advance(t: &mut Tracker, ms: u64) {
    for id in t.timers_mut().advance(ms) {
        t.fire(id);
    }
}

fn main() {
    env_logger::init();

    let opts = Options::default()
        .with_input_mode(InputMode::detect(true))
        .with_item_class("row")
        .with_avoid_class("skip")
        .with_style_hints(StyleHints::REMOVE_TAP_HIGHLIGHT)
        .with_classes(ClassNames {
            touch_end: "tapped".to_string(),
            ..ClassNames::default()
        });
    let styles = ClassStyles::from_options(Classes::default(), &opts);

    println!("== Bind ==");
    let mut t = GestureTracker::bind(Some(El(0)), opts, Doc, ManualClock::new(), styles, Listeners)
        .expect("valid options");
    t.on(EventKind::Touched, |e| println!("callback: {e:?}"));

    println!("== Tap on row 3 ==");
    let at = Point::new(40.0, 75.0);
    t.on_touch_start(at, El(4));
    advance(&mut t, 60);
    let tap = t.on_touch_end(El(4));
    println!("  events: {tap:?}");
    assert_eq!(tap, vec![GestureEvent::Touched { target: El(3), point: at }]);

    advance(&mut t, 300);

    println!("== Drag starting on row 1 ==");
    t.on_touch_start(Point::new(40.0, 20.0), El(2));
    advance(&mut t, 20);
    t.on_touch_move(Point::new(40.0, 60.0), 0.0);
    let drag = t.on_touch_end(El(2));
    println!("  events: {drag:?}");
    assert!(drag.is_empty());

    println!("== Tap on the skip button ==");
    t.on_touch_start(Point::new(90.0, 130.0), El(6));
    let skip = t.on_touch_end(El(6));
    println!("  events: {skip:?}");
    assert!(skip.is_empty());

    println!("== Dispose ==");
    t.dispose();
    assert!(t.on_touch_start(at, El(4)).is_empty());
}
