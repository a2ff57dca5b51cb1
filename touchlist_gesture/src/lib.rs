// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touchlist Gesture: a deterministic, `no_std` tap/scroll tracker for list containers.
//!
//! ## Overview
//!
//! This crate attaches touch, click, and scroll affordances to one scrollable
//! container: press-state styling, tap detection, "hit bottom" for infinite
//! scroll, "hit top", and pull-to-refresh.
//! It does not render and it does not own a DOM.
//! Instead, the host feeds raw input into a [`GestureTracker`](crate::tracker::GestureTracker)
//! and receives [`GestureEvent`](crate::types::GestureEvent)s and
//! [`VisualState`](crate::types::VisualState) changes back.
//!
//! ## Collaborators
//!
//! The tracker reaches the host only through the traits in [`host`]:
//! an [`ElementTree`](crate::host::ElementTree) for ancestor and class lookups,
//! a [`TimerService`](crate::host::TimerService) for the press debounce and
//! repeat suppression, a [`StyleApplier`](crate::host::StyleApplier) for visual
//! states, and an [`InputBinding`](crate::host::InputBinding) to attach listeners.
//! [`ClassStyles`](crate::styles::ClassStyles) maps visual states onto CSS
//! classes, [`FrameQueue`](crate::styles::FrameQueue) defers styling to the
//! next frame, and [`ManualClock`](crate::timer::ManualClock) is a fake clock.
//!
//! ## Workflow
//!
//! 1) Build [`Options`](crate::options::Options) (defaults match the common
//!    list setup) and pick an [`InputMode`](crate::types::InputMode) from the
//!    host's touch capability.
//! 2) Bind with [`GestureTracker::bind`](crate::tracker::GestureTracker::bind).
//! 3) Forward touch/click/scroll input; forward elapsed timers to
//!    [`GestureTracker::fire`](crate::tracker::GestureTracker::fire).
//! 4) Dispatch the returned events; optional per-kind callbacks have already run.
//! 5) [`dispose`](crate::tracker::GestureTracker::dispose) (or drop) to detach.
//!
//! ## Tap versus scroll
//!
//! - A press only styles after `timeout_ms` without motion.
//! - Any motion retracts the press and the touch cannot become a tap.
//! - `touched` fires at most once per `trigger_timeout_delay_ms`.
//! - A touch that lands on a still-scrolling list stops the fling instead of tapping.
//!
//! Logging goes through the [`log`] facade; nothing is logged unless the host
//! installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod host;
pub mod options;
pub mod styles;
pub mod timer;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::Error;
pub use tracker::GestureTracker;
