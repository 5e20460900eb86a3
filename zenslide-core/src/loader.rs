//! Image loading with per-attempt timeout and bounded retry.
//!
//! Each slide's load runs independently; preloading the next slide is just
//! another concurrent load. Loading an already-loaded slide is a no-op that
//! resolves with [`LoadOutcome::Cached`], and a request for a slide that is
//! already loading is coalesced into the running load
//! ([`LoadOutcome::InFlight`]). A slide in `Error` may be requested again,
//! which starts a fresh round of attempts.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use zenslide_config::LoadingConfig;
use zenslide_model::LoadStatus;

use crate::constants::RETRY_BACKOFF;
use crate::error::{FetchError, ResourceLoadError};
use crate::fetch::ImageFetcher;

/// Retry/timeout policy for one carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPolicy {
    /// Retries after the first failed attempt.
    pub retry_count: u32,
    /// Timeout applied to each attempt on its own; backoff is not counted.
    pub timeout: Duration,
    pub backoff: Duration,
}

impl From<&LoadingConfig> for LoadPolicy {
    fn from(config: &LoadingConfig) -> Self {
        Self {
            retry_count: config.retry_count,
            timeout: config.timeout(),
            backoff: RETRY_BACKOFF,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This call fetched the image.
    Loaded,
    /// The image was already loaded; nothing was fetched.
    Cached,
    /// Another load for the slide is running.
    InFlight,
}

enum Begin {
    Started,
    Cached,
    InFlight,
}

/// Load status per slide index. Missing entries read as `Unloaded`.
#[derive(Debug, Default)]
pub struct StatusTable {
    slots: DashMap<usize, LoadStatus>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> LoadStatus {
        self.slots.get(&index).map(|slot| *slot).unwrap_or_default()
    }

    pub fn any_loading(&self) -> bool {
        self.slots.iter().any(|slot| slot.is_loading())
    }

    pub fn snapshot(&self, count: usize) -> Vec<LoadStatus> {
        (0..count).map(|index| self.get(index)).collect()
    }

    fn begin(&self, index: usize) -> Begin {
        let mut slot = self.slots.entry(index).or_default();
        match *slot {
            LoadStatus::Loaded => Begin::Cached,
            LoadStatus::Loading => Begin::InFlight,
            LoadStatus::Unloaded | LoadStatus::Error => {
                *slot = LoadStatus::Loading;
                Begin::Started
            }
        }
    }

    fn finish(&self, index: usize, status: LoadStatus) {
        let mut slot = self.slots.entry(index).or_default();
        match slot.advance(status) {
            Ok(next) => *slot = next,
            Err(err) => {
                tracing::warn!(target: "zenslide::loader", index, error = %err, "ignoring load status change");
            }
        }
    }
}

/// Loads slide images through an [`ImageFetcher`].
#[derive(Clone)]
pub struct ImageLoader {
    fetcher: Arc<dyn ImageFetcher>,
    policy: LoadPolicy,
    statuses: Arc<StatusTable>,
    cancel: CancellationToken,
}

impl fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageLoader")
            .field("policy", &self.policy)
            .field("statuses", &self.statuses)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl ImageLoader {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        policy: LoadPolicy,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            fetcher,
            policy,
            statuses: Arc::new(StatusTable::new()),
            cancel,
        }
    }

    /// Timeout and retry policy applied to every load.
    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Status of slide `index`.
    pub fn status(&self, index: usize) -> LoadStatus {
        self.statuses.get(index)
    }

    /// Shared status table.
    pub fn statuses(&self) -> &StatusTable {
        &self.statuses
    }

    /// Load the image for slide `index`.
    ///
    /// Each attempt races the fetch against the policy timeout. A failed
    /// attempt is retried after the fixed backoff until `retry_count` retries
    /// are spent, after which the slide is marked `Error`. Cancellation resets
    /// the slide to `Unloaded`.
    pub async fn load(
        &self,
        url: &str,
        index: usize,
    ) -> Result<LoadOutcome, ResourceLoadError> {
        match self.statuses.begin(index) {
            Begin::Started => {}
            Begin::Cached => return Ok(LoadOutcome::Cached),
            Begin::InFlight => return Ok(LoadOutcome::InFlight),
        }

        let mut attempt: u32 = 0;
        loop {
            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(self.cancelled(index));
                }
                result = tokio::time::timeout(self.policy.timeout, self.fetcher.fetch(url)) => {
                    result.unwrap_or(Err(FetchError::TimedOut(self.policy.timeout)))
                }
            };

            let err = match result {
                Ok(()) => {
                    self.statuses.finish(index, LoadStatus::Loaded);
                    tracing::debug!(target: "zenslide::loader", index, attempt, "slide image loaded");
                    return Ok(LoadOutcome::Loaded);
                }
                Err(err) => err,
            };

            if attempt >= self.policy.retry_count {
                self.statuses.finish(index, LoadStatus::Error);
                tracing::warn!(
                    target: "zenslide::loader",
                    index,
                    attempts = attempt + 1,
                    error = %err,
                    url,
                    "slide unavailable"
                );
                return Err(ResourceLoadError::Exhausted {
                    index,
                    attempts: attempt + 1,
                    source: err,
                });
            }

            tracing::debug!(
                target: "zenslide::loader",
                index,
                attempt,
                error = %err,
                "image load failed, retrying"
            );
            attempt += 1;

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return Err(self.cancelled(index));
                }
                _ = tokio::time::sleep(self.policy.backoff) => {}
            }
        }
    }

    fn cancelled(&self, index: usize) -> ResourceLoadError {
        self.statuses.finish(index, LoadStatus::Unloaded);
        tracing::debug!(target: "zenslide::loader", index, "image load cancelled");
        ResourceLoadError::Cancelled { index }
    }
}
