//! Touch gesture tracking: drag offset, axis locking and the commit decision.

use std::time::Instant;

use zenslide_config::TouchConfig;
use zenslide_model::{Direction, Navigation};

use crate::constants::MIN_GESTURE_ELAPSED;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Travel in pixels beyond which a release commits.
    pub swipe_distance: f32,
    /// Fraction of finger travel applied to the visual offset.
    pub resistance: f32,
    /// Release speed in px/ms beyond which a release commits.
    pub velocity: f32,
}

impl From<&TouchConfig> for GestureThresholds {
    fn from(config: &TouchConfig) -> Self {
        Self {
            swipe_distance: config.swipe_threshold,
            resistance: config.resistance,
            velocity: config.velocity_threshold,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GestureSession {
    start_x: f32,
    start_y: f32,
    delta_x: f32,
    started_at: Instant,
    axis_locked: bool,
}

/// Result of a move event within an active session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub delta_x: f32,
    /// Damped visual offset, `delta_x * resistance`.
    pub offset: f32,
    /// Vertical movement took over; no further horizontal updates follow.
    pub axis_locked: bool,
}

/// Decision taken when a session ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeDecision {
    pub commit: bool,
    /// Set only when `commit` is true.
    pub direction: Option<Direction>,
    pub delta_x: f32,
    /// Release speed in px/ms.
    pub velocity: f32,
}

impl SwipeDecision {
    /// Neighbouring slide to navigate to. Gestures never wrap around, so a
    /// committed swipe past either edge yields `None` and snaps back.
    pub fn target(&self, current: usize, count: usize) -> Option<usize> {
        if !self.commit {
            return None;
        }
        self.direction?.neighbour(current, count)
    }
}

/// What a finished gesture did to the carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeResult {
    /// The swipe committed and a transition was requested.
    Navigated(Navigation),
    /// The drag was reset to its resting position.
    SnappedBack,
    /// No session was active.
    Ignored,
}

/// Converts raw pointer events into drag deltas and a commit decision.
///
/// Only one session exists at a time; a second start while a session is live
/// is ignored, as are moves and ends without a start.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    thresholds: GestureThresholds,
    session: Option<GestureSession>,
}

impl GestureTracker {
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            session: None,
        }
    }

    pub fn thresholds(&self) -> GestureThresholds {
        self.thresholds
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current damped offset of the live session, zero when idle.
    pub fn offset(&self) -> f32 {
        self.session
            .filter(|s| !s.axis_locked)
            .map_or(0.0, |s| s.delta_x * self.thresholds.resistance)
    }

    /// Begin a session. Returns `false` if one is already running.
    pub fn on_start(&mut self, x: f32, y: f32, at: Instant) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.session = Some(GestureSession {
            start_x: x,
            start_y: y,
            delta_x: 0.0,
            started_at: at,
            axis_locked: false,
        });
        true
    }

    pub fn on_move(&mut self, x: f32, y: f32) -> Option<DragUpdate> {
        let resistance = self.thresholds.resistance;
        let session = self.session.as_mut()?;
        if session.axis_locked {
            return None;
        }

        let delta_x = x - session.start_x;
        let delta_y = y - session.start_y;
        if delta_y.abs() > delta_x.abs() {
            session.axis_locked = true;
            tracing::trace!(target: "zenslide::gesture", delta_y, "vertical movement, axis locked");
            return Some(DragUpdate {
                delta_x: session.delta_x,
                offset: session.delta_x * resistance,
                axis_locked: true,
            });
        }

        session.delta_x = delta_x;
        Some(DragUpdate {
            delta_x,
            offset: delta_x * resistance,
            axis_locked: false,
        })
    }

    /// Finish the session and decide whether it commits.
    pub fn on_end(&mut self, at: Instant) -> Option<SwipeDecision> {
        let session = self.session.take()?;
        let elapsed = at
            .saturating_duration_since(session.started_at)
            .max(MIN_GESTURE_ELAPSED);
        let elapsed_ms = elapsed.as_secs_f32() * 1_000.0;
        let delta_x = session.delta_x;
        let velocity = delta_x.abs() / elapsed_ms;

        let commit = !session.axis_locked
            && (delta_x.abs() > self.thresholds.swipe_distance
                || velocity > self.thresholds.velocity);

        let decision = SwipeDecision {
            commit,
            direction: commit.then(|| Direction::from_delta(delta_x)),
            delta_x,
            velocity,
        };
        tracing::debug!(
            target: "zenslide::gesture",
            delta_x,
            velocity,
            commit,
            "gesture ended"
        );
        Some(decision)
    }

    /// Drop the live session without a decision.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
