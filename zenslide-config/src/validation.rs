//! Guard rails for resolved option snapshots.

use crate::error::{ConfigError, Result};
use crate::models::CarouselConfig;

/// Non-fatal observation about a resolved snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    fn push(&mut self, message: String, hint: Option<&str>) {
        self.items.push(ConfigWarning {
            message,
            hint: hint.map(str::to_string),
        });
    }
}

fn out_of_range(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::OutOfRange { field, reason }
}

impl CarouselConfig {
    /// Reject values no carousel can run with.
    ///
    /// The start index is checked against the slide count at mount time.
    pub fn validate(&self) -> Result<()> {
        if !(self.transition_duration.is_finite() && self.transition_duration > 0.0) {
            return Err(out_of_range(
                "transitionDuration",
                "must be a positive number of seconds",
            ));
        }
        if !(self.zoom_intensity.is_finite() && self.zoom_intensity > 1.0) {
            return Err(out_of_range("zoomIntensity", "must be greater than 1"));
        }
        if self.autoplay_duration == 0 {
            return Err(out_of_range(
                "autoplayDuration",
                "must be a positive number of milliseconds",
            ));
        }
        let touch = &self.touch;
        if !(0.0..1.0).contains(&touch.resistance) {
            return Err(out_of_range("touch.resistance", "must lie in [0, 1)"));
        }
        if !(touch.swipe_threshold.is_finite() && touch.swipe_threshold >= 0.0) {
            return Err(out_of_range(
                "touch.swipeThreshold",
                "must be a non-negative pixel distance",
            ));
        }
        if !(touch.velocity_threshold.is_finite() && touch.velocity_threshold >= 0.0)
        {
            return Err(out_of_range(
                "touch.velocityThreshold",
                "must be a non-negative speed in px/ms",
            ));
        }
        if self.loading.timeout == 0 {
            return Err(out_of_range(
                "loading.timeout",
                "must be a positive number of milliseconds",
            ));
        }
        Ok(())
    }

    /// Collect observations that do not block mounting.
    pub fn warnings(&self) -> ConfigWarnings {
        let mut warnings = ConfigWarnings::default();

        let groups = [
            ("", &self.extra),
            ("navigation.", &self.navigation.extra),
            ("touch.", &self.touch.extra),
            ("loading.", &self.loading.extra),
            ("accessibility.", &self.accessibility.extra),
        ];
        for (prefix, extra) in groups {
            for key in extra.keys() {
                warnings.push(
                    format!("unrecognized option '{prefix}{key}' passed through"),
                    Some("check the spelling; unknown options have no effect"),
                );
            }
        }

        if self.autoplay
            && self.autoplay_interval() <= self.transition_duration()
        {
            warnings.push(
                "autoplayDuration is not longer than transitionDuration; ticks will land mid-transition"
                    .to_string(),
                None,
            );
        }

        warnings
    }
}
