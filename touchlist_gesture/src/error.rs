// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// Errors reported when binding a [`GestureTracker`](crate::tracker::GestureTracker)
/// or validating [`Options`](crate::options::Options).
///
/// Everything past construction is a policy branch (an avoided target, a
/// suppressed repeat tap) and never surfaces as an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required argument was missing or out of range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument or option field.
        name: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) const fn invalid(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { name, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_argument() {
        let e = Error::invalid("timeout_ms", "must be greater than zero");
        assert_eq!(
            e.to_string(),
            "invalid argument `timeout_ms`: must be greater than zero"
        );
    }
}
