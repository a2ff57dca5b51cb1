// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the tracker: visual states, events, scroll metrics, timers, and phases.
//!
//! ## Overview
//!
//! These types describe what flows in and out of a
//! [`GestureTracker`](crate::tracker::GestureTracker).
//! Inputs are plain values ([`ScrollMetrics`], a [`Point`], a host element);
//! outputs are [`GestureEvent`]s and [`VisualState`] changes handed to the
//! [`StyleApplier`](crate::host::StyleApplier).

use kurbo::Point;

/// Visual state of an element, mapped to concrete styling by a
/// [`StyleApplier`](crate::host::StyleApplier).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VisualState {
    /// No press or refresh styling.
    Idle,
    /// A press survived the debounce and is committed.
    Pressed,
    /// A tap completed; replaces [`Pressed`](Self::Pressed).
    Released,
    /// Refresh indicator shown on the refresh target.
    Refreshing,
}

/// High-level events derived from raw input.
///
/// Returned in emission order by every tracker operation. The matching
/// callback in [`Callbacks`](crate::tracker::Callbacks) has already run for
/// each returned event.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent<E> {
    /// A tap or click on `target`, resolved to its list item when configured.
    Touched {
        /// The resolved tap target.
        target: E,
        /// Where the tap landed, in host coordinates.
        point: Point,
    },
    /// The scroll offset came within the bottom margin of the content end.
    HitBottom,
    /// The scroll offset is exactly at the top.
    HitTop,
    /// A touch ended while pulled past the refresh threshold.
    Refresh,
    /// Scroll tracking returned to idle.
    ScrollEnd,
}

impl<E> GestureEvent<E> {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Touched { .. } => EventKind::Touched,
            Self::HitBottom => EventKind::HitBottom,
            Self::HitTop => EventKind::HitTop,
            Self::Refresh => EventKind::Refresh,
            Self::ScrollEnd => EventKind::ScrollEnd,
        }
    }
}

/// Discriminant of a [`GestureEvent`], used to register callbacks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// See [`GestureEvent::Touched`].
    Touched,
    /// See [`GestureEvent::HitBottom`].
    HitBottom,
    /// See [`GestureEvent::HitTop`].
    HitTop,
    /// See [`GestureEvent::Refresh`].
    Refresh,
    /// See [`GestureEvent::ScrollEnd`].
    ScrollEnd,
}

impl EventKind {
    /// Number of event kinds.
    pub const COUNT: usize = 5;

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Touched => 0,
            Self::HitBottom => 1,
            Self::HitTop => 2,
            Self::Refresh => 3,
            Self::ScrollEnd => 4,
        }
    }
}

/// Scroll position reported with each scroll notification.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset. Negative while over-scrolled past the top.
    pub scroll_top: f64,
    /// Total content height.
    pub scroll_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Build metrics from offset, content height, and viewport height.
    pub const fn new(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            viewport_height,
        }
    }

    /// Distance left to scroll before the content end.
    pub fn remaining(&self) -> f64 {
        self.scroll_height - self.viewport_height - self.scroll_top
    }
}

/// Handle of a one-shot timer issued by a [`TimerService`](crate::host::TimerService).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Which raw input family a tracker listens to.
///
/// Chosen once at construction; never re-evaluated.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum InputMode {
    /// Touch start/move/end/cancel plus scroll.
    Touch,
    /// Click plus scroll.
    #[default]
    Pointer,
}

impl InputMode {
    /// Pick the mode from a host capability probe.
    pub const fn detect(touch_capable: bool) -> Self {
        if touch_capable {
            Self::Touch
        } else {
            Self::Pointer
        }
    }

    /// The listener kinds an [`InputBinding`](crate::host::InputBinding) must attach for this mode.
    pub const fn kinds(self) -> InputKinds {
        match self {
            Self::Touch => InputKinds::TOUCH.union(InputKinds::SCROLL),
            Self::Pointer => InputKinds::CLICK.union(InputKinds::SCROLL),
        }
    }
}

bitflags::bitflags! {
    /// Raw listener kinds attached to the bound container.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct InputKinds: u8 {
        /// Touch start.
        const TOUCH_START = 0b0000_0001;
        /// Touch move.
        const TOUCH_MOVE  = 0b0000_0010;
        /// Touch end.
        const TOUCH_END   = 0b0000_0100;
        /// Click.
        const CLICK       = 0b0000_1000;
        /// Scroll.
        const SCROLL      = 0b0001_0000;
        /// Touch cancel.
        const TOUCH_CANCEL = 0b0010_0000;
        /// All touch kinds.
        const TOUCH = Self::TOUCH_START.bits()
            | Self::TOUCH_MOVE.bits()
            | Self::TOUCH_END.bits()
            | Self::TOUCH_CANCEL.bits();
    }
}

/// Press axis of the state machine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PressPhase {
    /// No touch in progress.
    Idle,
    /// Touching; the debounce has not committed yet.
    Pressing,
    /// Touching; the press is committed and styled.
    Committed,
    /// Touching; motion or an avoid target retracted the tap.
    Cancelled,
}

/// Scroll axis of the state machine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScrollPhase {
    /// No scroll in progress.
    Idle,
    /// Scroll notifications are arriving.
    Active,
    /// Scrolling, with a one-shot reset armed.
    Settling,
}
