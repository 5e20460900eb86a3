//! Navigation controls, keys and swipe directions.

use std::fmt::{self, Display};

/// Which navigation controls the presentation layer should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum NavigationType {
    Dots,
    Arrows,
    #[default]
    Both,
    None,
}

impl NavigationType {
    pub fn shows_dots(self) -> bool {
        matches!(self, NavigationType::Dots | NavigationType::Both)
    }

    pub fn shows_arrows(self) -> bool {
        matches!(self, NavigationType::Arrows | NavigationType::Both)
    }
}

/// Placement hint for the dot indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum NavigationPosition {
    Top,
    #[default]
    Bottom,
    Sides,
}

impl Display for NavigationPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavigationPosition::Top => "top",
            NavigationPosition::Bottom => "bottom",
            NavigationPosition::Sides => "sides",
        })
    }
}

/// Keyboard signals understood by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

/// Swipe direction expressed as an index step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Reveal the previous slide (finger moved right).
    Backward,
    /// Reveal the next slide (finger moved left).
    Forward,
}

impl Direction {
    /// Direction for a horizontal drag delta; dragging left moves forward.
    pub fn from_delta(delta_x: f32) -> Self {
        if delta_x < 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    pub fn step(self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }

    /// Neighbouring index without wraparound; `None` past either edge.
    pub fn neighbour(self, current: usize, count: usize) -> Option<usize> {
        let target = current.checked_add_signed(self.step())?;
        (target < count).then_some(target)
    }
}
