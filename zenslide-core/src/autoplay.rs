//! Periodic autoplay timer.
//!
//! At most one timer is live per scheduler. `pause` cancels it outright and
//! `resume` arms a fresh one with a full interval; partial intervals are not
//! carried over. Whether a tick actually navigates is decided by the tick
//! callback, which consults the paused flag and the transition engine.

use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

struct Timer {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the single autoplay timer and its pause flag.
pub struct AutoplayScheduler {
    enabled: bool,
    interval: Duration,
    paused: bool,
    timer: Option<Timer>,
    runtime: Handle,
    parent: CancellationToken,
}

impl fmt::Debug for AutoplayScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoplayScheduler")
            .field("enabled", &self.enabled)
            .field("interval", &self.interval)
            .field("paused", &self.paused)
            .field("running", &self.is_running())
            .finish()
    }
}

impl AutoplayScheduler {
    /// Timers are spawned on `runtime` under a child of `parent`.
    pub fn new(
        enabled: bool,
        interval: Duration,
        runtime: Handle,
        parent: CancellationToken,
    ) -> Self {
        Self {
            enabled,
            interval,
            paused: false,
            timer: None,
            runtime,
            parent,
        }
    }

    /// Whether autoplay was enabled in the options.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether ticks are suspended.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a timer task is live and not cancelled.
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| {
            !timer.token.is_cancelled() && !timer.task.is_finished()
        })
    }

    /// Replace any live timer with a new one firing every `interval`.
    pub fn start<F>(&mut self, on_tick: F)
    where
        F: Fn() + Send + 'static,
    {
        self.stop();

        let token = self.parent.child_token();
        let cancel = token.clone();
        let interval = self.interval;
        let task = self.runtime.spawn(async move {
            let mut ticker =
                tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => on_tick(),
                }
            }
        });

        tracing::debug!(target: "zenslide::autoplay", interval_ms = interval.as_millis() as u64, "autoplay timer armed");
        self.timer = Some(Timer { token, task });
    }

    /// Cancel the live timer, if any.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.token.cancel();
            timer.task.abort();
            tracing::debug!(target: "zenslide::autoplay", "autoplay timer cancelled");
        }
    }

    pub fn pause(&mut self) {
        self.stop();
        self.paused = true;
    }

    /// Clear the paused flag and, when autoplay is enabled, re-arm the timer.
    ///
    /// Returns `false` without doing anything when not paused.
    pub fn resume<F>(&mut self, on_tick: F) -> bool
    where
        F: Fn() + Send + 'static,
    {
        if !self.paused {
            return false;
        }
        self.paused = false;
        if self.enabled {
            self.start(on_tick);
        }
        true
    }
}

impl Drop for AutoplayScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
