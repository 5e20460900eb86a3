/// Notifications published by a carousel instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEvent {
    /// A transition was accepted; indicators already point at `to`.
    SlideChanged { from: usize, to: usize },
    /// The animation finished and input is accepted again.
    TransitionFinished { index: usize },
    SlideLoaded { index: usize },
    /// Loading exhausted its retries; navigation to `index` is disabled.
    SlideUnavailable { index: usize, reason: String },
    Paused,
    Resumed,
    Destroyed,
}
