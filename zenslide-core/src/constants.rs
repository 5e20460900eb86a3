//! Timing and animation constants shared by the carousel components.

use std::time::Duration;

/// Fixed delay between a failed load attempt and the next retry.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(1_000);

/// Animation frame cadence (~60 FPS).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Duration of the snap-back after a cancelled drag.
pub const SNAP_BACK_DURATION: Duration = Duration::from_millis(300);

/// The incoming slide starts at `zoomIntensity - INCOMING_ZOOM_OFFSET`.
pub const INCOMING_ZOOM_OFFSET: f32 = 0.05;

/// Floor for gesture duration when computing release velocity.
pub const MIN_GESTURE_ELAPSED: Duration = Duration::from_millis(1);

/// Buffered carousel events per subscriber before lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
