//! Shared configuration library for ZenSlide.
//!
//! User options are deep-merged over the built-in defaults into one immutable
//! [`CarouselConfig`] snapshot. Every component of a carousel reads the same
//! snapshot; nothing mutates it after construction. Override documents can be
//! supplied inline as JSON values or loaded from `.json`/`.toml` files.

pub mod error;
pub mod loader;
pub mod merge;
pub mod models;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoad, ConfigLoader};
pub use merge::resolve;
pub use models::{
    AccessibilityConfig, AccessibilityLabels, CarouselConfig, LoadingConfig,
    NavigationConfig, TouchConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
