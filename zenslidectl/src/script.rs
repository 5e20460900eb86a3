//! Scripted input for `zenslidectl simulate`.

use std::str::FromStr;
use std::time::{Duration, Instant};

use thiserror::Error;
use zenslide_core::{Carousel, Key, Navigation, Stage, SwipeResult};

/// How long a scripted swipe takes from touch start to release.
const SWIPE_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown action '{0}'")]
    Unknown(String),
    #[error("action '{action}' needs a value: {expected}")]
    MissingValue {
        action: &'static str,
        expected: &'static str,
    },
    #[error("invalid value '{value}' for '{action}'")]
    InvalidValue { action: &'static str, value: String },
}

/// One step of a simulation script, e.g. `next`, `goto:2`, `wait:1500`,
/// `swipe:-120` or `key:end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Next,
    Previous,
    GoTo(usize),
    Pause,
    Resume,
    Hover,
    Leave,
    Key(Key),
    /// Horizontal drag distance in pixels; negative drags left.
    Swipe(f32),
    Wait(Duration),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.trim().split_once(':') {
            Some((name, value)) => (name, Some(value.trim())),
            None => (s.trim(), None),
        };

        let action = match name.to_ascii_lowercase().as_str() {
            "next" => Action::Next,
            "prev" | "previous" => Action::Previous,
            "pause" => Action::Pause,
            "resume" => Action::Resume,
            "hover" => Action::Hover,
            "leave" => Action::Leave,
            "goto" => Action::GoTo(parse_value("goto", value, "slide index")?),
            "swipe" => Action::Swipe(parse_value("swipe", value, "pixels")?),
            "wait" => Action::Wait(Duration::from_millis(parse_value(
                "wait",
                value,
                "milliseconds",
            )?)),
            "key" => Action::Key(parse_key(value)?),
            _ => return Err(ActionParseError::Unknown(s.to_string())),
        };
        Ok(action)
    }
}

fn parse_value<T: FromStr>(
    action: &'static str,
    value: Option<&str>,
    expected: &'static str,
) -> Result<T, ActionParseError> {
    let value = value.ok_or(ActionParseError::MissingValue { action, expected })?;
    value.parse().map_err(|_| ActionParseError::InvalidValue {
        action,
        value: value.to_string(),
    })
}

fn parse_key(value: Option<&str>) -> Result<Key, ActionParseError> {
    let value = value.ok_or(ActionParseError::MissingValue {
        action: "key",
        expected: "left, right, home or end",
    })?;
    match value.to_ascii_lowercase().as_str() {
        "left" => Ok(Key::ArrowLeft),
        "right" => Ok(Key::ArrowRight),
        "home" => Ok(Key::Home),
        "end" => Ok(Key::End),
        _ => Err(ActionParseError::InvalidValue {
            action: "key",
            value: value.to_string(),
        }),
    }
}

/// Apply `action` to `carousel`, waiting where the action asks for it.
pub async fn perform<S: Stage>(carousel: &Carousel<S>, action: Action) {
    let outcome = match action {
        Action::Next => Some(carousel.next()),
        Action::Previous => Some(carousel.previous()),
        Action::GoTo(index) => Some(carousel.go_to_slide(index)),
        Action::Key(key) => carousel.on_key(key),
        Action::Pause => {
            carousel.pause();
            None
        }
        Action::Resume => {
            carousel.resume();
            None
        }
        Action::Hover => {
            carousel.pointer_enter();
            None
        }
        Action::Leave => {
            carousel.pointer_leave();
            None
        }
        Action::Swipe(distance) => swipe(carousel, distance),
        Action::Wait(duration) => {
            tokio::time::sleep(duration).await;
            None
        }
    };

    if let Some(navigation) = outcome {
        report(action, navigation);
    }
}

fn swipe<S: Stage>(carousel: &Carousel<S>, distance: f32) -> Option<Navigation> {
    let started = Instant::now();
    if !carousel.touch_start(0.0, 0.0, started) {
        tracing::info!(target: "zenslidectl", "swipe ignored");
        return None;
    }
    carousel.touch_move(distance, 0.0);
    match carousel.touch_end(started + SWIPE_DURATION) {
        SwipeResult::Navigated(navigation) => Some(navigation),
        SwipeResult::SnappedBack => {
            tracing::info!(target: "zenslidectl", distance, "swipe snapped back");
            None
        }
        SwipeResult::Ignored => None,
    }
}

fn report(action: Action, navigation: Navigation) {
    match navigation {
        Navigation::Accepted { from, to } => {
            tracing::info!(target: "zenslidectl", ?action, from, to, "navigation accepted");
        }
        Navigation::Rejected(reason) => {
            tracing::info!(target: "zenslidectl", ?action, %reason, "navigation rejected");
        }
    }
}
