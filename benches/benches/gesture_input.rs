// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use touchlist_gesture::GestureTracker;
use touchlist_gesture::host::{ElementTree, InputBinding, StyleApplier};
use touchlist_gesture::options::Options;
use touchlist_gesture::timer::ManualClock;
use touchlist_gesture::types::{InputKinds, InputMode, ScrollMetrics, VisualState};

/// A chain of `depth` nested elements under each of `rows` rows.
///
/// Element `0` is the list; rows are `1..=rows`; the chain below row `r`
/// occupies `rows + (r - 1) * depth + 1 ..= rows + r * depth`.
struct Nested {
    rows: u32,
    depth: u32,
}

impl Nested {
    /// Deepest element below the zero-based `row`.
    fn leaf(&self, row: u32) -> u32 {
        self.rows + (row + 1) * self.depth
    }
}

impl ElementTree<u32> for Nested {
    fn parent_of(&self, el: &u32) -> Option<u32> {
        let el = *el;
        if el == 0 {
            None
        } else if el <= self.rows {
            Some(0)
        } else {
            let off = el - self.rows - 1;
            let row = off / self.depth + 1;
            if off % self.depth == 0 {
                Some(row)
            } else {
                Some(el - 1)
            }
        }
    }

    fn has_class(&self, el: &u32, class: &str) -> bool {
        class == "row" && (1..=self.rows).contains(el)
    }

    fn children(&self, el: &u32) -> Vec<u32> {
        if *el == 0 {
            (1..=self.rows).collect()
        } else {
            Vec::new()
        }
    }
}

struct Sink;

impl StyleApplier<u32> for Sink {
    fn set_state(&mut self, target: &u32, state: VisualState) {
        black_box((target, state));
    }
}

struct Detached;

impl InputBinding for Detached {
    fn bind(&mut self, _kinds: InputKinds) {}
    fn unbind(&mut self, _kinds: InputKinds) {}
}

type Tracker = GestureTracker<u32, Nested, ManualClock, Sink>;

fn tracker(depth: u32) -> Tracker {
    let opts = Options::default()
        .with_input_mode(InputMode::Touch)
        .with_item_class("row");
    GestureTracker::bind(
        Some(0),
        opts,
        Nested { rows: 64, depth },
        ManualClock::new(),
        Sink,
        Detached,
    )
    .unwrap()
}

fn bench_taps(c: &mut Criterion) {
    let mut group = c.benchmark_group("tap");
    for &depth in &[1_u32, 8, 32] {
        group.throughput(Throughput::Elements(64));
        group.bench_function(format!("tap_cycle_depth{}", depth), |b| {
            b.iter_batched(
                || tracker(depth),
                |mut t| {
                    for row in 0..64 {
                        let leaf = t.tree().leaf(row);
                        t.on_touch_start(Point::new(10.0, f64::from(row) * 40.0), leaf);
                        for id in t.timers_mut().advance(60) {
                            t.fire(id);
                        }
                        black_box(t.on_touch_end(leaf));
                        for id in t.timers_mut().advance(300) {
                            t.fire(id);
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll");
    let ticks: Vec<ScrollMetrics> = (0..1_000)
        .map(|i| ScrollMetrics::new(f64::from(i) * 4.0 - 100.0, 4_200.0, 600.0))
        .collect();
    group.throughput(Throughput::Elements(ticks.len() as u64));
    group.bench_function("drag_then_momentum", |b| {
        b.iter_batched(
            || tracker(1),
            |mut t| {
                t.on_touch_start(Point::new(10.0, 500.0), 1);
                let (during, after) = ticks.split_at(ticks.len() / 2);
                for m in during {
                    t.on_touch_move(Point::new(10.0, 500.0 - m.scroll_top), m.scroll_top);
                    black_box(t.on_scroll(*m));
                }
                t.on_touch_end(1);
                for m in after {
                    black_box(t.on_scroll(*m));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_taps, bench_scroll);
criterion_main!(benches);
