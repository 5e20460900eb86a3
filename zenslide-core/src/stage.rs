//! Rendering collaborator interface.
//!
//! A [`Stage`] owns the slide surfaces and every other piece of presentation:
//! indicator controls, the live-announcement region, the pause overlay and the
//! loading indicator. The carousel only tells it what to show. Implementations
//! must not call back into the carousel from these methods; input reaches the
//! carousel through its own entry points (`go_to_slide`, `on_key`, the touch
//! handlers).

use zenslide_config::AccessibilityLabels;
use zenslide_model::{NavigationPosition, NavigationType, SlideFrame};

/// Description of the navigation controls to build at mount time.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub kind: NavigationType,
    pub position: NavigationPosition,
    pub slide_count: usize,
    /// Present when accessibility support is enabled.
    pub labels: Option<AccessibilityLabels>,
}

/// Everything the carousel draws goes through this trait.
pub trait Stage: Send + 'static {
    /// Bind to the named mount target. Returns `false` when it does not exist.
    fn attach(&mut self, container: &str) -> bool;

    fn slide_count(&self) -> usize;

    /// Image resource backing the slide at `index`.
    fn image_url(&self, index: usize) -> String;

    /// Width of the visible area in pixels; neighbours are parked one width
    /// away while dragging.
    fn viewport_width(&self) -> f32;

    fn set_frame(&mut self, index: usize, frame: SlideFrame);

    fn set_active(&mut self, index: usize, active: bool);

    /// Hide or expose a slide to assistive technology.
    fn set_hidden(&mut self, index: usize, hidden: bool);

    /// Show an inline "unavailable" marker in place of the image.
    fn mark_unavailable(&mut self, index: usize);

    fn set_dragging(&mut self, _index: usize, _dragging: bool) {}

    fn build_controls(&mut self, _controls: &Controls) {}

    /// Highlight the indicator for `index`.
    fn set_indicator(&mut self, _index: usize) {}

    fn announce(&mut self, _message: &str) {}

    fn set_paused(&mut self, _paused: bool) {}

    fn set_loading(&mut self, _visible: bool) {}

    /// Remove built controls and reset every slide to its unstyled state.
    fn detach(&mut self);
}
