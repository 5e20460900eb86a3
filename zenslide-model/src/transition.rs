//! Transition state and navigation decisions.

use std::fmt::{self, Display};

/// Which slide is showing and whether a hand-off is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionState {
    Idle { current: usize },
    Transitioning { from: usize, to: usize },
}

impl TransitionState {
    /// The slide navigation is based on. While transitioning this is already
    /// the target, so indicators and wraparound math follow the request.
    pub fn current_index(&self) -> usize {
        match *self {
            TransitionState::Idle { current } => current,
            TransitionState::Transitioning { to, .. } => to,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, TransitionState::Transitioning { .. })
    }
}

/// Why a navigation request was ignored.
///
/// Rejections are expected outcomes of concurrent input, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// A transition is already in flight.
    Busy,
    /// The target is the slide already showing.
    AlreadyShowing,
    /// The target slide failed to load.
    Unavailable,
    /// The target index does not name a slide.
    OutOfRange,
    /// The carousel has been torn down.
    Destroyed,
    /// Autoplay found no slide it could advance to.
    NoLoadableTarget,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rejection::Busy => "transition in flight",
            Rejection::AlreadyShowing => "slide already showing",
            Rejection::Unavailable => "slide unavailable",
            Rejection::OutOfRange => "slide index out of range",
            Rejection::Destroyed => "carousel destroyed",
            Rejection::NoLoadableTarget => "no loadable slide to advance to",
        })
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Navigation {
    Accepted { from: usize, to: usize },
    Rejected(Rejection),
}

impl Navigation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Navigation::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Navigation::Rejected(reason) => Some(*reason),
            Navigation::Accepted { .. } => None,
        }
    }
}
