use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zenslide_model::{NavigationPosition, NavigationType};

use crate::error::Result;
use crate::merge::resolve;

/// Immutable option snapshot for one carousel instance.
///
/// Field names serialize in camelCase so option documents use the same keys
/// as the presentation layer (`transitionDuration`, `startAtSlide`, ...).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    /// Identifier of the mount target handed to the stage.
    pub container: String,
    /// Crossfade duration in seconds.
    pub transition_duration: f64,
    /// Scale the outgoing slide grows to while fading out.
    pub zoom_intensity: f32,
    pub autoplay: bool,
    /// Autoplay interval in milliseconds.
    pub autoplay_duration: u64,
    pub pause_on_hover: bool,
    /// Zero-based index shown after mounting.
    pub start_at_slide: usize,
    pub navigation: NavigationConfig,
    pub touch: TouchConfig,
    pub loading: LoadingConfig,
    pub accessibility: AccessibilityConfig,
    /// Unrecognized options, kept for forward compatibility.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            container: "zen-slide".to_string(),
            transition_duration: 2.0,
            zoom_intensity: 1.05,
            autoplay: true,
            autoplay_duration: 5_000,
            pause_on_hover: true,
            start_at_slide: 0,
            navigation: NavigationConfig::default(),
            touch: TouchConfig::default(),
            loading: LoadingConfig::default(),
            accessibility: AccessibilityConfig::default(),
            extra: Map::new(),
        }
    }
}

impl CarouselConfig {
    /// Deep-merge `overrides` over the defaults, then validate the result.
    pub fn resolve(overrides: &Value) -> Result<Self> {
        Self::resolve_over(&Self::default(), overrides)
    }

    /// Deep-merge `overrides` over an explicit base snapshot.
    pub fn resolve_over(base: &CarouselConfig, overrides: &Value) -> Result<Self> {
        let defaults = serde_json::to_value(base)?;
        let merged = resolve(&defaults, overrides);
        let config: CarouselConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_secs_f64(self.transition_duration)
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_duration)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: NavigationType,
    pub position: NavigationPosition,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kind: NavigationType::Both,
            position: NavigationPosition::Bottom,
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TouchConfig {
    pub enabled: bool,
    /// Minimum horizontal travel in pixels that commits a swipe.
    pub swipe_threshold: f32,
    /// Fraction of finger travel applied to the visual offset, in `[0, 1)`.
    pub resistance: f32,
    /// Minimum speed in px/ms that commits a swipe regardless of distance.
    pub velocity_threshold: f32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            swipe_threshold: 50.0,
            resistance: 0.3,
            velocity_threshold: 0.3,
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingConfig {
    pub show_indicator: bool,
    pub preload_next: bool,
    /// Retries after the first failed attempt.
    pub retry_count: u32,
    /// Per-attempt timeout in milliseconds.
    pub timeout: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            show_indicator: true,
            preload_next: true,
            retry_count: 2,
            timeout: 10_000,
            extra: Map::new(),
        }
    }
}

impl LoadingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityConfig {
    pub enabled: bool,
    pub announce_slides: bool,
    pub labels: AccessibilityLabels,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            announce_slides: true,
            labels: AccessibilityLabels::default(),
            extra: Map::new(),
        }
    }
}

/// Text used to label the navigation controls.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityLabels {
    pub previous: String,
    pub next: String,
    /// Prefix for dot labels; the 1-based slide number is appended.
    pub dot: String,
    pub pause: String,
    pub play: String,
}

impl Default for AccessibilityLabels {
    fn default() -> Self {
        Self {
            previous: "Previous slide".to_string(),
            next: "Next slide".to_string(),
            dot: "Go to slide".to_string(),
            pause: "Pause slider".to_string(),
            play: "Play slider".to_string(),
        }
    }
}

impl AccessibilityLabels {
    pub fn dot_label(&self, index: usize) -> String {
        format!("{} {}", self.dot, index + 1)
    }
}
