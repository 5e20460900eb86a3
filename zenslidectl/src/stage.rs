//! Headless stage and fetcher used by the simulator.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use zenslide_core::{Controls, FetchError, ImageFetcher, SlideFrame, Stage};

/// Stage that renders nothing and logs what it is asked to show.
#[derive(Debug)]
pub struct LoggingStage {
    slides: usize,
    base_url: String,
    viewport_width: f32,
}

impl LoggingStage {
    pub fn new(slides: usize, base_url: impl Into<String>, viewport_width: f32) -> Self {
        Self {
            slides,
            base_url: base_url.into(),
            viewport_width,
        }
    }
}

/// Image URL of slide `index` under `base_url`.
pub fn image_url(base_url: &str, index: usize) -> String {
    format!("{}/slide-{index}.jpg", base_url.trim_end_matches('/'))
}

impl Stage for LoggingStage {
    fn attach(&mut self, container: &str) -> bool {
        tracing::info!(target: "zenslidectl::stage", container, slides = self.slides, "stage attached");
        true
    }

    fn slide_count(&self) -> usize {
        self.slides
    }

    fn image_url(&self, index: usize) -> String {
        image_url(&self.base_url, index)
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn set_frame(&mut self, index: usize, frame: SlideFrame) {
        tracing::trace!(
            target: "zenslidectl::stage",
            index,
            opacity = frame.opacity,
            scale = frame.scale,
            offset_x = frame.offset_x,
            "frame"
        );
    }

    fn set_active(&mut self, index: usize, active: bool) {
        tracing::debug!(target: "zenslidectl::stage", index, active, "active marker");
    }

    fn set_hidden(&mut self, index: usize, hidden: bool) {
        tracing::trace!(target: "zenslidectl::stage", index, hidden, "hidden flag");
    }

    fn mark_unavailable(&mut self, index: usize) {
        tracing::warn!(target: "zenslidectl::stage", index, "slide marked unavailable");
    }

    fn build_controls(&mut self, controls: &Controls) {
        tracing::debug!(
            target: "zenslidectl::stage",
            kind = ?controls.kind,
            position = %controls.position,
            slides = controls.slide_count,
            labelled = controls.labels.is_some(),
            "controls built"
        );
    }

    fn set_indicator(&mut self, index: usize) {
        tracing::debug!(target: "zenslidectl::stage", index, "indicator");
    }

    fn announce(&mut self, message: &str) {
        tracing::info!(target: "zenslidectl::stage", message, "announce");
    }

    fn set_paused(&mut self, paused: bool) {
        tracing::debug!(target: "zenslidectl::stage", paused, "paused overlay");
    }

    fn set_loading(&mut self, visible: bool) {
        tracing::debug!(target: "zenslidectl::stage", visible, "loading indicator");
    }

    fn detach(&mut self) {
        tracing::info!(target: "zenslidectl::stage", "stage detached");
    }
}

/// Offline fetcher: every image takes `latency`, listed URLs always fail.
#[derive(Debug, Default)]
pub struct SimulatedFetcher {
    latency: Duration,
    failing: HashSet<String>,
}

impl SimulatedFetcher {
    pub fn new(latency: Duration, failing: impl IntoIterator<Item = String>) -> Self {
        Self {
            latency,
            failing: failing.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ImageFetcher for SimulatedFetcher {
    async fn fetch(&self, url: &str) -> Result<(), FetchError> {
        tokio::time::sleep(self.latency).await;
        if self.failing.contains(url) {
            return Err(FetchError::Status(404));
        }
        Ok(())
    }
}
