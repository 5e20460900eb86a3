//! Core data model definitions shared across ZenSlide crates.
#![allow(missing_docs)]

pub mod events;
pub mod frame;
pub mod load_status;
pub mod navigation;
pub mod transition;

// Intentionally curated re-exports for downstream consumers.
pub use events::CarouselEvent;
pub use frame::SlideFrame;
pub use load_status::{LoadStatus, StatusTransitionError};
pub use navigation::{Direction, Key, NavigationPosition, NavigationType};
pub use transition::{Navigation, Rejection, TransitionState};
