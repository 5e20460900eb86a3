//! ZenSlide core: the slide transition state machine and the controllers that
//! feed it.
//!
//! A [`Carousel`] composes an [`ImageLoader`], a [`GestureTracker`], a
//! [`TransitionEngine`] and an [`AutoplayScheduler`] around one owned state
//! object. Rendering is delegated to a [`Stage`] supplied by the caller, and
//! image resources are fetched through an [`ImageFetcher`].
//!
//! All coordination runs on a tokio runtime: loads, timers and animations are
//! tasks tied to the carousel's cancellation token, so [`Carousel::destroy`]
//! stops every one of them.

pub mod autoplay;
pub mod carousel;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod gesture;
pub mod loader;
pub mod stage;
pub mod transition;
pub mod tween;

pub use autoplay::AutoplayScheduler;
pub use carousel::Carousel;
pub use error::{CarouselError, FetchError, ResourceLoadError, Result};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::ImageFetcher;
pub use gesture::{
    DragUpdate, GestureThresholds, GestureTracker, SwipeDecision, SwipeResult,
};
pub use loader::{ImageLoader, LoadOutcome, LoadPolicy, StatusTable};
pub use stage::{Controls, Stage};
pub use transition::{TransitionEngine, TransitionTicket};
pub use tween::{CubicBezier, Easing, Track, Tween};

pub use zenslide_config::CarouselConfig;
pub use zenslide_model::{
    CarouselEvent, Direction, Key, LoadStatus, Navigation, NavigationType,
    Rejection, SlideFrame, TransitionState,
};
