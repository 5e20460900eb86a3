//! The slide transition state machine.
//!
//! `Idle(current) -> Transitioning(from, to) -> Idle(to)`. Entering
//! `Transitioning` happens synchronously inside [`TransitionEngine::request`],
//! so any request that arrives before [`TransitionEngine::complete`] is
//! rejected as [`Rejection::Busy`]. Completion is the only way back to `Idle`.

use zenslide_model::{LoadStatus, Rejection, TransitionState};

/// Proof of an accepted request, redeemed on animation completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTicket {
    pub from: usize,
    pub to: usize,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct TransitionEngine {
    state: TransitionState,
    slide_count: usize,
    generation: u64,
}

impl TransitionEngine {
    /// `start` must be below `slide_count`; the carousel checks this at mount.
    pub fn new(start: usize, slide_count: usize) -> Self {
        debug_assert!(start < slide_count);
        Self {
            state: TransitionState::Idle { current: start },
            slide_count,
            generation: 0,
        }
    }

    /// Current transition state.
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Visible slide, or the target while transitioning.
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// Whether a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Number of slides navigated over.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Index `step` slides away from the current one, wrapping around.
    pub fn wrapped(&self, step: isize) -> usize {
        let count = self.slide_count as isize;
        (self.current_index() as isize + step).rem_euclid(count) as usize
    }

    /// Try to start a transition to `target`, whose load status is
    /// `target_status`.
    pub fn request(
        &mut self,
        target: usize,
        target_status: LoadStatus,
    ) -> Result<TransitionTicket, Rejection> {
        let current = match self.state {
            TransitionState::Transitioning { .. } => return Err(Rejection::Busy),
            TransitionState::Idle { current } => current,
        };
        if target >= self.slide_count {
            return Err(Rejection::OutOfRange);
        }
        if target == current {
            return Err(Rejection::AlreadyShowing);
        }
        if target_status.is_error() {
            return Err(Rejection::Unavailable);
        }

        self.generation += 1;
        self.state = TransitionState::Transitioning {
            from: current,
            to: target,
        };
        Ok(TransitionTicket {
            from: current,
            to: target,
            generation: self.generation,
        })
    }

    /// Finish the transition `ticket` started. Stale tickets are ignored.
    pub fn complete(&mut self, ticket: &TransitionTicket) -> bool {
        let matches = ticket.generation == self.generation
            && self.state
                == TransitionState::Transitioning {
                    from: ticket.from,
                    to: ticket.to,
                };
        if matches {
            self.state = TransitionState::Idle { current: ticket.to };
        }
        matches
    }

    /// Jump straight to the resting state of any in-flight transition.
    pub fn settle(&mut self) {
        if let TransitionState::Transitioning { to, .. } = self.state {
            self.state = TransitionState::Idle { current: to };
        }
    }
}
