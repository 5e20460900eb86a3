//! The navigation façade.
//!
//! [`Carousel`] owns one state object per instance: the stage, the transition
//! engine, the gesture tracker and the autoplay scheduler all live behind a
//! single mutex. Every navigation request, whatever its origin (arrow, dot,
//! key, swipe or autoplay tick), is checked and applied synchronously under
//! that lock, which is what serializes transitions. Long-running work (image
//! loads, animations, the autoplay timer) runs as tasks that re-enter through
//! the same lock when they finish.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Instant;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use zenslide_config::CarouselConfig;
use zenslide_model::{
    CarouselEvent, Key, LoadStatus, Navigation, NavigationType, Rejection,
    SlideFrame, TransitionState,
};

use crate::autoplay::AutoplayScheduler;
use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::error::{CarouselError, ResourceLoadError, Result};
use crate::fetch::ImageFetcher;
use crate::gesture::{DragUpdate, GestureTracker, SwipeResult};
use crate::loader::{ImageLoader, LoadOutcome, LoadPolicy};
use crate::stage::{Controls, Stage};
use crate::transition::{TransitionEngine, TransitionTicket};
use crate::tween::Tween;

struct CarouselState<S> {
    stage: S,
    engine: TransitionEngine,
    gesture: GestureTracker,
    autoplay: AutoplayScheduler,
    /// Crossfade in flight.
    animation: Option<CancellationToken>,
    /// Snap-back in flight.
    settle: Option<CancellationToken>,
    /// Slide carrying the dragging marker.
    dragging: Option<usize>,
    drag_offset: f32,
    destroyed: bool,
}

struct Shared<S> {
    config: CarouselConfig,
    slide_count: usize,
    state: Mutex<CarouselState<S>>,
    loader: ImageLoader,
    events: broadcast::Sender<CarouselEvent>,
    runtime: Handle,
    root: CancellationToken,
}

/// Handle to a mounted carousel. Clones share the same instance.
pub struct Carousel<S: Stage> {
    shared: Arc<Shared<S>>,
}

impl<S: Stage> Clone for Carousel<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Stage> fmt::Debug for Carousel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self
            .shared
            .state
            .try_lock()
            .map(|state| (state.engine.state(), state.destroyed));

        let mut debug = f.debug_struct("Carousel");
        debug
            .field("container", &self.shared.config.container)
            .field("slide_count", &self.shared.slide_count)
            .field("loader", &self.shared.loader);
        if let Some((transition, destroyed)) = snapshot {
            debug
                .field("state", &transition)
                .field("destroyed", &destroyed);
        }
        debug.finish()
    }
}

impl<S: Stage> Carousel<S> {
    /// Mount a carousel on `stage`.
    ///
    /// Fails without leaving anything running when the container is missing,
    /// the stage has no slides, or the start index is out of range. Must be
    /// called from within a tokio runtime.
    pub fn mount(
        config: CarouselConfig,
        mut stage: S,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Result<Self> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| CarouselError::NoRuntime)?;

        if !stage.attach(&config.container) {
            return Err(CarouselError::ContainerNotFound(config.container.clone()));
        }
        let slide_count = stage.slide_count();
        if slide_count == 0 {
            stage.detach();
            return Err(CarouselError::NoSlides);
        }
        let start = config.start_at_slide;
        if start >= slide_count {
            stage.detach();
            return Err(CarouselError::StartOutOfRange {
                start,
                count: slide_count,
            });
        }

        for index in 0..slide_count {
            let showing = index == start;
            stage.set_frame(
                index,
                if showing {
                    SlideFrame::VISIBLE
                } else {
                    SlideFrame::HIDDEN
                },
            );
            stage.set_hidden(index, !showing);
        }
        stage.set_active(start, true);

        let navigation = &config.navigation;
        if navigation.enabled && navigation.kind != NavigationType::None {
            stage.build_controls(&Controls {
                kind: navigation.kind,
                position: navigation.position,
                slide_count,
                labels: config
                    .accessibility
                    .enabled
                    .then(|| config.accessibility.labels.clone()),
            });
            if navigation.kind.shows_dots() {
                stage.set_indicator(start);
            }
        }

        let root = CancellationToken::new();
        let loader = ImageLoader::new(
            fetcher,
            LoadPolicy::from(&config.loading),
            root.child_token(),
        );
        let autoplay = AutoplayScheduler::new(
            config.autoplay,
            config.autoplay_interval(),
            runtime.clone(),
            root.child_token(),
        );
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let state = CarouselState {
            stage,
            engine: TransitionEngine::new(start, slide_count),
            gesture: GestureTracker::new((&config.touch).into()),
            autoplay,
            animation: None,
            settle: None,
            dragging: None,
            drag_offset: 0.0,
            destroyed: false,
        };

        let shared = Arc::new(Shared {
            config,
            slide_count,
            state: Mutex::new(state),
            loader,
            events,
            runtime,
            root,
        });

        {
            let mut state = shared.state.lock();
            shared.request_load(&mut state, start);
            if shared.config.loading.preload_next {
                shared.preload_after(&mut state, start);
            }
            if shared.config.autoplay {
                state.autoplay.start(shared.tick_callback());
            }
        }

        tracing::info!(
            target: "zenslide::carousel",
            container = %shared.config.container,
            slides = slide_count,
            start,
            autoplay = shared.config.autoplay,
            "carousel mounted"
        );
        Ok(Self { shared })
    }

    /// Resolve `overrides` over the default options, then mount.
    pub fn with_options(
        overrides: &Value,
        stage: S,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Result<Self> {
        let config = CarouselConfig::resolve(overrides)?;
        Self::mount(config, stage, fetcher)
    }

    /// Resolved options this carousel was mounted with.
    pub fn config(&self) -> &CarouselConfig {
        &self.shared.config
    }

    /// Number of slides on the stage.
    pub fn slide_count(&self) -> usize {
        self.shared.slide_count
    }

    /// Current transition state.
    pub fn state(&self) -> TransitionState {
        self.shared.state.lock().engine.state()
    }

    /// Index of the visible slide, or the target while transitioning.
    pub fn current_index(&self) -> usize {
        self.state().current_index()
    }

    /// Whether a crossfade is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.state().is_transitioning()
    }

    /// Whether autoplay was paused by the user or by hover.
    pub fn is_paused(&self) -> bool {
        self.shared.state.lock().autoplay.is_paused()
    }

    /// Whether the autoplay timer is live.
    pub fn is_autoplay_running(&self) -> bool {
        self.shared.state.lock().autoplay.is_running()
    }

    /// Whether [`Carousel::destroy`] has run.
    pub fn is_destroyed(&self) -> bool {
        self.shared.state.lock().destroyed
    }

    /// Image load status of slide `index`.
    pub fn load_status(&self, index: usize) -> LoadStatus {
        self.shared.loader.status(index)
    }

    /// Load status of every slide, in order.
    pub fn load_statuses(&self) -> Vec<LoadStatus> {
        self.shared.loader.statuses().snapshot(self.shared.slide_count)
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.shared.events.subscribe()
    }

    /// Advance one slide, wrapping past the last.
    pub fn next(&self) -> Navigation {
        let mut state = self.shared.state.lock();
        let target = state.engine.wrapped(1);
        self.shared.go_to(&mut state, target)
    }

    /// Go back one slide, wrapping past the first.
    pub fn previous(&self) -> Navigation {
        let mut state = self.shared.state.lock();
        let target = state.engine.wrapped(-1);
        self.shared.go_to(&mut state, target)
    }

    pub fn go_to_slide(&self, index: usize) -> Navigation {
        let mut state = self.shared.state.lock();
        self.shared.go_to(&mut state, index)
    }

    /// Stop autoplay and show the paused indicator.
    pub fn pause(&self) {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return;
        }
        let was_paused = state.autoplay.is_paused();
        state.autoplay.pause();
        state.stage.set_paused(true);
        if !was_paused {
            tracing::debug!(target: "zenslide::autoplay", "autoplay paused");
            self.shared.emit(CarouselEvent::Paused);
        }
    }

    /// Clear the paused indicator and re-arm autoplay with a full interval.
    /// Does nothing unless paused.
    pub fn resume(&self) {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return;
        }
        if state.autoplay.resume(self.shared.tick_callback()) {
            state.stage.set_paused(false);
            tracing::debug!(target: "zenslide::autoplay", "autoplay resumed");
            self.shared.emit(CarouselEvent::Resumed);
        }
    }

    /// Pointer entered the container.
    pub fn pointer_enter(&self) {
        if self.shared.config.pause_on_hover {
            self.pause();
        }
    }

    /// Pointer left the container.
    pub fn pointer_leave(&self) {
        if self.shared.config.pause_on_hover {
            self.resume();
        }
    }

    /// Keyboard navigation. `None` when accessibility support is disabled.
    pub fn on_key(&self, key: Key) -> Option<Navigation> {
        if !self.shared.config.accessibility.enabled {
            return None;
        }
        Some(match key {
            Key::ArrowLeft => self.previous(),
            Key::ArrowRight => self.next(),
            Key::Home => self.go_to_slide(0),
            Key::End => self.go_to_slide(self.shared.slide_count - 1),
        })
    }

    /// Begin a touch drag. Ignored while a transition is in flight.
    pub fn touch_start(&self, x: f32, y: f32, at: Instant) -> bool {
        let mut state = self.shared.state.lock();
        if state.destroyed
            || !self.shared.config.touch.enabled
            || state.engine.is_transitioning()
        {
            return false;
        }
        if !state.gesture.on_start(x, y, at) {
            return false;
        }
        if let Some(settle) = state.settle.take() {
            settle.cancel();
        }
        let current = state.engine.current_index();
        state.dragging = Some(current);
        state.stage.set_dragging(current, true);
        true
    }

    pub fn touch_move(&self, x: f32, y: f32) -> Option<DragUpdate> {
        let mut state = self.shared.state.lock();
        if state.destroyed || state.engine.is_transitioning() {
            return None;
        }
        let update = state.gesture.on_move(x, y)?;
        if !update.axis_locked {
            self.shared.apply_drag(&mut state, update.offset);
        }
        Some(update)
    }

    /// Finish a touch drag: navigate on commit, snap back otherwise.
    pub fn touch_end(&self, at: Instant) -> SwipeResult {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return SwipeResult::Ignored;
        }
        let Some(decision) = state.gesture.on_end(at) else {
            return SwipeResult::Ignored;
        };
        if let Some(index) = state.dragging.take() {
            state.stage.set_dragging(index, false);
        }

        if state.engine.is_transitioning() {
            // A transition started mid-drag and now owns the frames.
            state.drag_offset = 0.0;
            return SwipeResult::Navigated(Navigation::Rejected(Rejection::Busy));
        }

        let current = state.engine.current_index();
        let count = self.shared.slide_count;
        let Some(target) = decision.target(current, count) else {
            self.shared.snap_back(&mut state);
            return SwipeResult::SnappedBack;
        };

        let parked = if target > current {
            current.checked_sub(1)
        } else {
            Some(current + 1).filter(|index| *index < count)
        };
        let navigation = self.shared.go_to(&mut state, target);
        if navigation.is_accepted() {
            if let Some(parked) = parked {
                state.stage.set_frame(parked, SlideFrame::HIDDEN);
            }
        } else {
            self.shared.snap_back(&mut state);
        }
        SwipeResult::Navigated(navigation)
    }

    /// Abort a touch drag (e.g. the platform cancelled the touch).
    pub fn touch_cancel(&self) {
        let mut state = self.shared.state.lock();
        if state.destroyed || !state.gesture.is_active() {
            return;
        }
        state.gesture.cancel();
        if let Some(index) = state.dragging.take() {
            state.stage.set_dragging(index, false);
        }
        if !state.engine.is_transitioning() {
            self.shared.snap_back(&mut state);
        }
    }

    /// Load the image for `index` and wait for the outcome.
    ///
    /// A slide in `Error` starts a fresh round of attempts; a loaded slide
    /// resolves immediately with [`LoadOutcome::Cached`]. A slide that is
    /// already loading resolves immediately with [`LoadOutcome::InFlight`]
    /// and does not wait for that load; watch [`Carousel::subscribe`] for its
    /// `SlideLoaded` or `SlideUnavailable` event instead.
    pub async fn load_slide(
        &self,
        index: usize,
    ) -> std::result::Result<LoadOutcome, ResourceLoadError> {
        let url = {
            let mut state = self.shared.state.lock();
            if state.destroyed {
                return Err(ResourceLoadError::Cancelled { index });
            }
            if index >= self.shared.slide_count {
                return Err(ResourceLoadError::NoSuchSlide { index });
            }
            if self.shared.config.loading.show_indicator
                && !self.shared.loader.status(index).is_loaded()
            {
                state.stage.set_loading(true);
            }
            state.stage.image_url(index)
        };

        let result = self.shared.loader.load(&url, index).await;
        self.shared.finish_load(index, &result);
        result
    }

    /// Tear down timers, in-flight loads and animations, and the stage.
    /// Safe to call any number of times.
    pub fn destroy(&self) {
        let mut state = self.shared.state.lock();
        if state.destroyed {
            return;
        }
        state.destroyed = true;
        state.autoplay.stop();
        self.shared.root.cancel();
        state.animation = None;
        state.settle = None;
        state.engine.settle();
        state.gesture.cancel();
        state.dragging = None;
        state.stage.detach();
        self.shared.emit(CarouselEvent::Destroyed);
        tracing::info!(
            target: "zenslide::carousel",
            container = %self.shared.config.container,
            "carousel destroyed"
        );
    }
}

impl<S: Stage> Shared<S> {
    fn emit(&self, event: CarouselEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn tick_callback(self: &Arc<Self>) -> impl Fn() + Send + use<S> {
        let weak: Weak<Self> = Arc::downgrade(self);
        move || {
            if let Some(shared) = weak.upgrade() {
                shared.autoplay_tick();
            }
        }
    }

    /// The single navigation entry point. Runs under the state lock.
    fn go_to(
        self: &Arc<Self>,
        state: &mut CarouselState<S>,
        target: usize,
    ) -> Navigation {
        if state.destroyed {
            return Navigation::Rejected(Rejection::Destroyed);
        }
        let status = self.loader.status(target);
        let ticket = match state.engine.request(target, status) {
            Ok(ticket) => ticket,
            Err(reason) => {
                tracing::debug!(
                    target: "zenslide::transition",
                    slide = target,
                    %reason,
                    "navigation rejected"
                );
                return Navigation::Rejected(reason);
            }
        };
        let TransitionTicket { from, to, .. } = ticket;

        if let Some(settle) = state.settle.take() {
            settle.cancel();
        }

        // Indicator and accessibility state follow the request immediately.
        if self.config.navigation.enabled && self.config.navigation.kind.shows_dots() {
            state.stage.set_indicator(to);
        }
        state.stage.set_hidden(from, true);
        state.stage.set_hidden(to, false);
        state.stage.set_active(from, false);
        self.announce(state, to);
        self.emit(CarouselEvent::SlideChanged { from, to });
        tracing::debug!(target: "zenslide::transition", from, to, "transition started");

        let tween = Tween::crossfade(
            from,
            to,
            std::mem::take(&mut state.drag_offset),
            self.config.zoom_intensity,
            self.config.transition_duration(),
        );
        self.spawn_transition(state, ticket, tween);

        self.request_load(state, to);
        if self.config.loading.preload_next {
            self.preload_after(state, to);
        }

        Navigation::Accepted { from, to }
    }

    fn announce(&self, state: &mut CarouselState<S>, index: usize) {
        let accessibility = &self.config.accessibility;
        if accessibility.enabled && accessibility.announce_slides {
            state.stage.announce(&format!(
                "Showing slide {} of {}",
                index + 1,
                self.slide_count
            ));
        }
    }

    fn spawn_transition(
        self: &Arc<Self>,
        state: &mut CarouselState<S>,
        ticket: TransitionTicket,
        tween: Tween,
    ) {
        let token = self.root.child_token();
        if let Some(previous) = state.animation.replace(token.clone()) {
            previous.cancel();
        }
        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            let completed = tween
                .play(&token, |index, frame| shared.paint(index, frame))
                .await;
            if completed {
                shared.finish_transition(ticket);
            }
        });
    }

    /// Write one animation frame. A tween that raced `destroy` must not
    /// repaint the detached stage.
    fn paint(&self, index: usize, frame: SlideFrame) {
        let mut state = self.state.lock();
        if state.destroyed {
            return;
        }
        state.stage.set_frame(index, frame);
    }

    fn finish_transition(&self, ticket: TransitionTicket) {
        let mut state = self.state.lock();
        if state.destroyed {
            return;
        }
        if state.engine.complete(&ticket) {
            state.animation = None;
            state.stage.set_active(ticket.to, true);
            self.emit(CarouselEvent::TransitionFinished { index: ticket.to });
            tracing::debug!(target: "zenslide::transition", index = ticket.to, "transition finished");
        }
    }

    fn autoplay_tick(self: &Arc<Self>) {
        let mut state = self.state.lock();
        if state.destroyed || state.autoplay.is_paused() {
            return;
        }
        let navigation = match self.next_playable(&state) {
            Some(target) => self.go_to(&mut state, target),
            None => Navigation::Rejected(Rejection::NoLoadableTarget),
        };
        tracing::trace!(target: "zenslide::autoplay", ?navigation, "autoplay tick");
    }

    /// Next slide forward that has not failed to load, wrapping around.
    fn next_playable(&self, state: &CarouselState<S>) -> Option<usize> {
        let current = state.engine.current_index();
        (1..self.slide_count)
            .map(|step| (current + step) % self.slide_count)
            .find(|index| !self.loader.status(*index).is_error())
    }

    fn apply_drag(&self, state: &mut CarouselState<S>, offset: f32) {
        state.drag_offset = offset;
        let current = state.engine.current_index();
        let width = state.stage.viewport_width();
        state
            .stage
            .set_frame(current, SlideFrame::VISIBLE.with_offset(offset));
        if current > 0 {
            state
                .stage
                .set_frame(current - 1, SlideFrame::VISIBLE.with_offset(offset - width));
        }
        if current + 1 < self.slide_count {
            state
                .stage
                .set_frame(current + 1, SlideFrame::VISIBLE.with_offset(offset + width));
        }
    }

    fn snap_back(self: &Arc<Self>, state: &mut CarouselState<S>) {
        let current = state.engine.current_index();
        let offset = std::mem::take(&mut state.drag_offset);
        let tween = Tween::snap_back(
            current,
            self.slide_count,
            offset,
            state.stage.viewport_width(),
        );

        let token = self.root.child_token();
        if let Some(previous) = state.settle.replace(token.clone()) {
            previous.cancel();
        }
        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            tween
                .play(&token, |index, frame| shared.paint(index, frame))
                .await;
        });
    }

    /// Fire-and-forget load of `index` unless it is loaded or loading.
    fn request_load(self: &Arc<Self>, state: &mut CarouselState<S>, index: usize) {
        let status = self.loader.status(index);
        if status.is_loaded() || status.is_loading() {
            return;
        }
        let url = state.stage.image_url(index);
        if self.config.loading.show_indicator {
            state.stage.set_loading(true);
        }
        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            let result = shared.loader.load(&url, index).await;
            shared.finish_load(index, &result);
        });
    }

    /// Preload the slide after `index`. Failed slides are left alone; only an
    /// explicit [`Carousel::load_slide`] retries them.
    fn preload_after(self: &Arc<Self>, state: &mut CarouselState<S>, index: usize) {
        let next = (index + 1) % self.slide_count;
        if next == index || self.loader.status(next).is_error() {
            return;
        }
        self.request_load(state, next);
    }

    fn finish_load(
        &self,
        index: usize,
        result: &std::result::Result<LoadOutcome, ResourceLoadError>,
    ) {
        let mut state = self.state.lock();
        if state.destroyed {
            return;
        }
        match result {
            Ok(LoadOutcome::Loaded) => {
                self.emit(CarouselEvent::SlideLoaded { index });
            }
            Ok(LoadOutcome::Cached | LoadOutcome::InFlight) => {}
            Err(err @ ResourceLoadError::Exhausted { .. }) => {
                state.stage.mark_unavailable(index);
                self.emit(CarouselEvent::SlideUnavailable {
                    index,
                    reason: err.to_string(),
                });
            }
            Err(ResourceLoadError::Cancelled { .. } | ResourceLoadError::NoSuchSlide { .. }) => {}
        }
        if self.config.loading.show_indicator {
            let busy = self.loader.statuses().any_loading();
            state.stage.set_loading(busy);
        }
    }
}
