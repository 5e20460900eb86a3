use std::time::Duration;

use thiserror::Error;
use zenslide_config::ConfigError;

/// Fatal errors raised while mounting a carousel.
#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("container '{0}' not found")]
    ContainerNotFound(String),

    #[error("no slides found")]
    NoSlides,

    #[error("start slide {start} out of range for {count} slides")]
    StartOutOfRange { start: usize, count: usize },

    #[error("carousel must be mounted from within a tokio runtime")]
    NoRuntime,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure of a single fetch attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// Recoverable per-slide load failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceLoadError {
    #[error("slide {index} unavailable after {attempts} attempts")]
    Exhausted {
        index: usize,
        attempts: u32,
        #[source]
        source: FetchError,
    },

    #[error("load for slide {index} cancelled")]
    Cancelled { index: usize },

    #[error("no slide at index {index}")]
    NoSuchSlide { index: usize },
}

/// Result of mounting or driving a carousel.
pub type Result<T> = std::result::Result<T, CarouselError>;
