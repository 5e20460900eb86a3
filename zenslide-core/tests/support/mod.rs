#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;
use zenslide_core::{
    Carousel, CarouselEvent, Controls, FetchError, ImageFetcher, SlideFrame,
    Stage,
};

pub const VIEWPORT_WIDTH: f32 = 800.0;

pub fn slide_url(index: usize) -> String {
    format!("https://img.test/slide-{index}.jpg")
}

/// Everything a [`RecordingStage`] was told to show.
#[derive(Debug, Default)]
pub struct StageLog {
    pub attached: Option<String>,
    pub detached: bool,
    pub frames: HashMap<usize, SlideFrame>,
    pub active: BTreeSet<usize>,
    pub hidden: BTreeMap<usize, bool>,
    pub unavailable: BTreeSet<usize>,
    pub dragging: BTreeSet<usize>,
    pub controls: Option<Controls>,
    pub indicator: Option<usize>,
    pub announcements: Vec<String>,
    pub paused: bool,
    pub loading: bool,
    /// Frames written after `detach`.
    pub late_frames: usize,
}

impl StageLog {
    pub fn frame(&self, index: usize) -> SlideFrame {
        self.frames.get(&index).copied().unwrap_or_default()
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(&index).copied().unwrap_or(false)
    }
}

/// In-memory stage. Clones share one log so tests can inspect what the
/// carousel rendered after handing the stage over.
#[derive(Debug, Clone)]
pub struct RecordingStage {
    container: String,
    slides: usize,
    log: Arc<Mutex<StageLog>>,
}

impl RecordingStage {
    pub fn new(slides: usize) -> Self {
        Self {
            container: "zen-slide".to_string(),
            slides,
            log: Arc::default(),
        }
    }

    pub fn with_container(mut self, container: &str) -> Self {
        self.container = container.to_string();
        self
    }

    pub fn log(&self) -> MutexGuard<'_, StageLog> {
        self.log.lock()
    }
}

impl Stage for RecordingStage {
    fn attach(&mut self, container: &str) -> bool {
        if container != self.container {
            return false;
        }
        self.log.lock().attached = Some(container.to_string());
        true
    }

    fn slide_count(&self) -> usize {
        self.slides
    }

    fn image_url(&self, index: usize) -> String {
        slide_url(index)
    }

    fn viewport_width(&self) -> f32 {
        VIEWPORT_WIDTH
    }

    fn set_frame(&mut self, index: usize, frame: SlideFrame) {
        let mut log = self.log.lock();
        if log.detached {
            log.late_frames += 1;
        } else {
            log.frames.insert(index, frame);
        }
    }

    fn set_active(&mut self, index: usize, active: bool) {
        let mut log = self.log.lock();
        if active {
            log.active.insert(index);
        } else {
            log.active.remove(&index);
        }
    }

    fn set_hidden(&mut self, index: usize, hidden: bool) {
        self.log.lock().hidden.insert(index, hidden);
    }

    fn mark_unavailable(&mut self, index: usize) {
        self.log.lock().unavailable.insert(index);
    }

    fn set_dragging(&mut self, index: usize, dragging: bool) {
        let mut log = self.log.lock();
        if dragging {
            log.dragging.insert(index);
        } else {
            log.dragging.remove(&index);
        }
    }

    fn build_controls(&mut self, controls: &Controls) {
        self.log.lock().controls = Some(controls.clone());
    }

    fn set_indicator(&mut self, index: usize) {
        self.log.lock().indicator = Some(index);
    }

    fn announce(&mut self, message: &str) {
        self.log.lock().announcements.push(message.to_string());
    }

    fn set_paused(&mut self, paused: bool) {
        self.log.lock().paused = paused;
    }

    fn set_loading(&mut self, visible: bool) {
        self.log.lock().loading = visible;
    }

    fn detach(&mut self) {
        let mut log = self.log.lock();
        log.detached = true;
        log.frames.clear();
        log.active.clear();
        log.hidden.clear();
        log.dragging.clear();
        log.controls = None;
        log.indicator = None;
        log.paused = false;
        log.loading = false;
    }
}

/// Outcome of one scripted fetch attempt.
#[derive(Debug, Clone)]
pub enum Attempt {
    Succeed,
    Fail(FetchError),
    /// Never resolves; only a timeout or cancellation ends the attempt.
    Hang,
}

/// Fetcher whose per-URL outcomes are scripted up front. Unscripted
/// attempts fall back to the URL's default outcome, then to success.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<Attempt>>>,
    fallbacks: Mutex<HashMap<String, Attempt>>,
    calls: Mutex<HashMap<String, usize>>,
    latency: Duration,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_latency(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            latency,
            ..Self::default()
        })
    }

    /// Queue outcomes for the next attempts on `url`.
    pub fn script(&self, url: &str, attempts: impl IntoIterator<Item = Attempt>) {
        self.scripts
            .lock()
            .entry(url.to_string())
            .or_default()
            .extend(attempts);
    }

    /// Outcome for every unscripted attempt on `url`.
    pub fn always(&self, url: &str, attempt: Attempt) {
        self.fallbacks.lock().insert(url.to_string(), attempt);
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ImageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<(), FetchError> {
        *self.calls.lock().entry(url.to_string()).or_default() += 1;

        let scripted = self
            .scripts
            .lock()
            .get_mut(url)
            .and_then(|queue| queue.pop_front());
        let attempt = scripted
            .or_else(|| self.fallbacks.lock().get(url).cloned())
            .unwrap_or(Attempt::Succeed);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match attempt {
            Attempt::Succeed => Ok(()),
            Attempt::Fail(err) => Err(err),
            Attempt::Hang => std::future::pending().await,
        }
    }
}

pub struct Harness {
    pub carousel: Carousel<RecordingStage>,
    pub stage: RecordingStage,
    pub fetcher: Arc<ScriptedFetcher>,
}

/// Mount `slides` slides with `overrides` over the default options.
pub fn mount(slides: usize, overrides: Value) -> Harness {
    mount_with(slides, overrides, ScriptedFetcher::new())
}

pub fn mount_with(
    slides: usize,
    overrides: Value,
    fetcher: Arc<ScriptedFetcher>,
) -> Harness {
    let stage = RecordingStage::new(slides);
    let carousel = Carousel::with_options(
        &overrides,
        stage.clone(),
        Arc::clone(&fetcher) as Arc<dyn ImageFetcher>,
    )
    .expect("carousel mounts");
    Harness {
        carousel,
        stage,
        fetcher,
    }
}

/// Let spawned tasks run without moving the clock meaningfully.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

pub fn drain(events: &mut tokio::sync::broadcast::Receiver<CarouselEvent>) -> Vec<CarouselEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}
