// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker configuration.
//!
//! [`Options`] is captured once when a tracker is bound and never changes
//! afterwards. Start from [`Options::default`] and override fields with the
//! `with_*` builders:
//!
//! ```
//! use touchlist_gesture::options::{Detect, HitBottomMode, Options};
//!
//! let opts: Options<u32> = Options::default()
//!     .with_item_class("item")
//!     .with_avoid_class("no-tap")
//!     .with_detect(Detect::HIT_BOTTOM)
//!     .with_hit_bottom_mode(HitBottomMode::EveryTick);
//! assert!(opts.validate().is_ok());
//! ```

use alloc::string::{String, ToString};

use crate::error::Error;
use crate::types::InputMode;

bitflags::bitflags! {
    /// Scroll-derived emissions a tracker should detect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Detect: u8 {
        /// Emit `hittop` at scroll offset zero.
        const HIT_TOP    = 0b0000_0001;
        /// Emit `hitbottom` near the content end.
        const HIT_BOTTOM = 0b0000_0010;
        /// Track pull-to-refresh over-scroll.
        const REFRESH    = 0b0000_0100;
    }
}

impl Default for Detect {
    fn default() -> Self {
        Self::all()
    }
}

bitflags::bitflags! {
    /// Cosmetic style hints applied once to list items at bind time.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StyleHints: u8 {
        /// Clear the platform tap highlight color.
        const REMOVE_TAP_HIGHLIGHT = 0b0000_0001;
        /// Disable the long-press callout.
        const REMOVE_TOUCH_CALLOUT = 0b0000_0010;
        /// Disable text selection.
        const REMOVE_USER_SELECT   = 0b0000_0100;
        /// Promote items to their own compositing layer.
        const ADD_TRANSLATE_3D     = 0b0000_1000;
    }
}

impl Default for StyleHints {
    fn default() -> Self {
        Self::empty()
    }
}

impl StyleHints {
    /// CSS declarations for the set hints, in flag order.
    pub fn declarations(self) -> impl Iterator<Item = (&'static str, &'static str)> {
        const TABLE: [(StyleHints, &str, &str); 4] = [
            (
                StyleHints::REMOVE_TAP_HIGHLIGHT,
                "-webkit-tap-highlight-color",
                "rgba(0,0,0,0)",
            ),
            (StyleHints::REMOVE_TOUCH_CALLOUT, "-webkit-touch-callout", "none"),
            (StyleHints::REMOVE_USER_SELECT, "-webkit-user-select", "none"),
            (
                StyleHints::ADD_TRANSLATE_3D,
                "-webkit-transform",
                "translate3d(0,0,0)",
            ),
        ];
        TABLE
            .into_iter()
            .filter(move |(flag, _, _)| self.contains(*flag))
            .map(|(_, name, value)| (name, value))
    }
}

/// How `hitbottom` repeats while the bottom condition keeps holding.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum HitBottomMode {
    /// Emit once, then stay quiet until the offset leaves the bottom margin or
    /// the scroll session ends.
    #[default]
    Latched,
    /// Emit on every qualifying scroll notification.
    EveryTick,
}

/// Class names used by [`ClassStyles`](crate::styles::ClassStyles).
///
/// An empty name means "no class" for that state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// Applied on press commit.
    pub touch_start: String,
    /// Applied on tap completion.
    pub touch_end: String,
    /// Applied to the refresh target while refresh is armed.
    pub refresh: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            touch_start: "touchstart".to_string(),
            touch_end: String::new(),
            refresh: "refreshing".to_string(),
        }
    }
}

/// Immutable tracker configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Options<E> {
    /// Class names for the class-based style applier; read by
    /// [`ClassStyles::from_options`](crate::styles::ClassStyles::from_options).
    pub classes: ClassNames,
    /// Press debounce delay in milliseconds.
    pub timeout_ms: u32,
    /// Minimum gap between two `touched` emissions, in milliseconds.
    pub trigger_timeout_delay_ms: u32,
    /// Class identifying list items; taps resolve to the nearest such ancestor.
    pub item_class: Option<String>,
    /// Class marking elements that never produce taps.
    pub avoid_class: Option<String>,
    /// Over-scroll offset (zero or negative) at or past which refresh arms.
    pub refresh_threshold: f64,
    /// Element that receives [`VisualState::Refreshing`](crate::types::VisualState::Refreshing).
    pub refresh_target: Option<E>,
    /// Enabled scroll-derived emissions.
    pub detect: Detect,
    /// Repeat policy for `hitbottom`.
    pub hit_bottom_mode: HitBottomMode,
    /// Distance from the content end that counts as the bottom.
    pub hit_bottom_margin: f64,
    /// Offset change between the last move and the last scroll that counts as
    /// real scrolling when a touch ends.
    pub scroll_slop: f64,
    /// Cosmetic hints applied to the items at bind time.
    pub style_hints: StyleHints,
    /// Raw input family to listen to.
    pub input_mode: InputMode,
}

impl<E> Default for Options<E> {
    fn default() -> Self {
        Self {
            classes: ClassNames::default(),
            timeout_ms: 50,
            trigger_timeout_delay_ms: 300,
            item_class: None,
            avoid_class: None,
            refresh_threshold: -80.0,
            refresh_target: None,
            detect: Detect::default(),
            hit_bottom_mode: HitBottomMode::default(),
            hit_bottom_margin: 100.0,
            scroll_slop: 5.0,
            style_hints: StyleHints::default(),
            input_mode: InputMode::default(),
        }
    }
}

impl<E> Options<E> {
    /// Set the class names used by the class-based style applier.
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    /// Set the press debounce delay.
    pub fn with_timeout_ms(mut self, ms: u32) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Set the minimum gap between `touched` emissions.
    pub fn with_trigger_timeout_delay_ms(mut self, ms: u32) -> Self {
        self.trigger_timeout_delay_ms = ms;
        self
    }

    /// Resolve taps to the nearest ancestor carrying `class`.
    pub fn with_item_class(mut self, class: impl Into<String>) -> Self {
        self.item_class = Some(class.into());
        self
    }

    /// Suppress taps on elements carrying `class`.
    pub fn with_avoid_class(mut self, class: impl Into<String>) -> Self {
        self.avoid_class = Some(class.into());
        self
    }

    /// Set the refresh threshold.
    pub fn with_refresh_threshold(mut self, threshold: f64) -> Self {
        self.refresh_threshold = threshold;
        self
    }

    /// Set the element showing the refresh indicator.
    pub fn with_refresh_target(mut self, target: E) -> Self {
        self.refresh_target = Some(target);
        self
    }

    /// Set the enabled scroll-derived emissions.
    pub fn with_detect(mut self, detect: Detect) -> Self {
        self.detect = detect;
        self
    }

    /// Set the `hitbottom` repeat policy.
    pub fn with_hit_bottom_mode(mut self, mode: HitBottomMode) -> Self {
        self.hit_bottom_mode = mode;
        self
    }

    /// Set the bottom margin.
    pub fn with_hit_bottom_margin(mut self, margin: f64) -> Self {
        self.hit_bottom_margin = margin;
        self
    }

    /// Set the scroll slop.
    pub fn with_scroll_slop(mut self, slop: f64) -> Self {
        self.scroll_slop = slop;
        self
    }

    /// Set the cosmetic style hints.
    pub fn with_style_hints(mut self, hints: StyleHints) -> Self {
        self.style_hints = hints;
        self
    }

    /// Set the raw input family.
    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout_ms == 0 {
            return Err(Error::invalid("timeout_ms", "must be greater than zero"));
        }
        if self.item_class.as_deref() == Some("") {
            return Err(Error::invalid("item_class", "must not be empty"));
        }
        if self.avoid_class.as_deref() == Some("") {
            return Err(Error::invalid("avoid_class", "must not be empty"));
        }
        if !self.refresh_threshold.is_finite() || self.refresh_threshold > 0.0 {
            return Err(Error::invalid(
                "refresh_threshold",
                "must be finite and not positive",
            ));
        }
        if !self.hit_bottom_margin.is_finite() || self.hit_bottom_margin < 0.0 {
            return Err(Error::invalid(
                "hit_bottom_margin",
                "must be finite and not negative",
            ));
        }
        if !self.scroll_slop.is_finite() || self.scroll_slop < 0.0 {
            return Err(Error::invalid(
                "scroll_slop",
                "must be finite and not negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn defaults_match_documented_values() {
        let o: Options<u32> = Options::default();
        assert_eq!(o.classes.touch_start, "touchstart");
        assert_eq!(o.classes.touch_end, "");
        assert_eq!(o.classes.refresh, "refreshing");
        assert_eq!(o.timeout_ms, 50);
        assert_eq!(o.trigger_timeout_delay_ms, 300);
        assert_eq!(o.refresh_threshold, -80.0);
        assert_eq!(o.detect, Detect::all());
        assert_eq!(o.hit_bottom_mode, HitBottomMode::Latched);
        assert!(o.style_hints.is_empty());
        assert!(o.item_class.is_none() && o.avoid_class.is_none());
        assert!(o.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let o: Options<u32> = Options::default().with_timeout_ms(0);
        assert_eq!(
            o.validate(),
            Err(Error::invalid("timeout_ms", "must be greater than zero"))
        );
    }

    #[test]
    fn validate_rejects_empty_classes() {
        let o: Options<u32> = Options::default().with_item_class("");
        assert!(matches!(
            o.validate(),
            Err(Error::InvalidArgument {
                name: "item_class",
                ..
            })
        ));
        let o: Options<u32> = Options::default().with_avoid_class("");
        assert!(matches!(
            o.validate(),
            Err(Error::InvalidArgument {
                name: "avoid_class",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_positive_or_nan_threshold() {
        for t in [1.0, f64::NAN, f64::NEG_INFINITY] {
            let o: Options<u32> = Options::default().with_refresh_threshold(t);
            assert!(o.validate().is_err(), "threshold {t} should be rejected");
        }
        let o: Options<u32> = Options::default().with_refresh_threshold(0.0);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_margins() {
        let o: Options<u32> = Options::default().with_hit_bottom_margin(-1.0);
        assert!(o.validate().is_err());
        let o: Options<u32> = Options::default().with_scroll_slop(-0.5);
        assert!(o.validate().is_err());
    }

    #[test]
    fn style_hint_declarations_follow_flags() {
        assert_eq!(StyleHints::empty().declarations().count(), 0);
        let d: Vec<_> = (StyleHints::ADD_TRANSLATE_3D | StyleHints::REMOVE_TAP_HIGHLIGHT)
            .declarations()
            .collect();
        assert_eq!(
            d,
            vec![
                ("-webkit-tap-highlight-color", "rgba(0,0,0,0)"),
                ("-webkit-transform", "translate3d(0,0,0)"),
            ]
        );
    }
}
