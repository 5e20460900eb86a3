//! Time-based tweens over slide frames.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use zenslide_model::SlideFrame;

use crate::constants::{FRAME_INTERVAL, INCOMING_ZOOM_OFFSET, SNAP_BACK_DURATION};

/// CSS-style cubic Bézier timing curve through (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coefficients(p1: f32, p2: f32) -> (f32, f32, f32) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        let (a, b, c) = Self::coefficients(p1, p2);
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(p1: f32, p2: f32, t: f32) -> f32 {
        let (a, b, c) = Self::coefficients(p1, p2);
        (3.0 * a * t + 2.0 * b) * t + c
    }

    /// Curve parameter whose x coordinate is `x`.
    fn solve_t(&self, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;

        let mut t = x;
        for _ in 0..8 {
            let error = Self::sample(self.x1, self.x2, t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = Self::sample_derivative(self.x1, self.x2, t);
            if slope.abs() < EPSILON {
                break;
            }
            t -= error / slope;
        }

        // Newton stalled; fall back to bisection.
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let value = Self::sample(self.x1, self.x2, t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }

    pub fn at(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::sample(self.y1, self.y2, self.solve_t(x))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    Curve(CubicBezier),
}

impl Easing {
    /// Slow start, long glide to rest; used for slide hand-offs.
    pub const SLIDE: Easing = Easing::Curve(CubicBezier::new(0.25, 0.1, 0.25, 1.0));

    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::Curve(curve) => curve.at(t),
        }
    }
}

/// One slide's start and end frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub index: usize,
    pub from: SlideFrame,
    pub to: SlideFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub tracks: Vec<Track>,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    /// Crossfade-with-zoom from `outgoing` to `incoming`.
    ///
    /// The outgoing slide fades out while growing to `zoom`; the incoming
    /// slide fades in while settling from `zoom - 0.05` to its natural size.
    /// The outgoing slide keeps whatever horizontal offset it was left at.
    pub fn crossfade(
        outgoing: usize,
        incoming: usize,
        outgoing_offset: f32,
        zoom: f32,
        duration: Duration,
    ) -> Self {
        let out_from = SlideFrame::VISIBLE.with_offset(outgoing_offset);
        let out_to = SlideFrame {
            opacity: 0.0,
            scale: zoom,
            offset_x: outgoing_offset,
        };
        let in_from = SlideFrame {
            opacity: 0.0,
            scale: zoom - INCOMING_ZOOM_OFFSET,
            offset_x: 0.0,
        };
        Self {
            tracks: vec![
                Track {
                    index: outgoing,
                    from: out_from,
                    to: out_to,
                },
                Track {
                    index: incoming,
                    from: in_from,
                    to: SlideFrame::VISIBLE,
                },
            ],
            duration,
            easing: Easing::SLIDE,
        }
    }

    /// Return a dragged slide and its neighbours to rest.
    ///
    /// Neighbours sit one viewport away from the dragged slide and fade out
    /// as they return to their parked positions.
    pub fn snap_back(
        current: usize,
        count: usize,
        offset: f32,
        viewport_width: f32,
    ) -> Self {
        let mut tracks = vec![Track {
            index: current,
            from: SlideFrame::VISIBLE.with_offset(offset),
            to: SlideFrame::VISIBLE,
        }];
        if current > 0 {
            tracks.push(Track {
                index: current - 1,
                from: SlideFrame::VISIBLE.with_offset(offset - viewport_width),
                to: SlideFrame::HIDDEN.with_offset(-viewport_width),
            });
        }
        if current + 1 < count {
            tracks.push(Track {
                index: current + 1,
                from: SlideFrame::VISIBLE.with_offset(offset + viewport_width),
                to: SlideFrame::HIDDEN.with_offset(viewport_width),
            });
        }
        Self {
            tracks,
            duration: SNAP_BACK_DURATION,
            easing: Easing::EaseOutCubic,
        }
    }

    pub fn frames_at(&self, progress: f32) -> impl Iterator<Item = (usize, SlideFrame)> + '_ {
        let eased = self.easing.apply(progress);
        self.tracks
            .iter()
            .map(move |track| (track.index, track.from.lerp(track.to, eased)))
    }

    /// Drive the tween frame by frame until it completes or `cancel` fires.
    ///
    /// Returns `true` when the final frame was applied.
    pub async fn play<F>(&self, cancel: &CancellationToken, mut apply: F) -> bool
    where
        F: FnMut(usize, SlideFrame),
    {
        let started = Instant::now();
        let mut ticker = tokio::time::interval(FRAME_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return false,
                _ = ticker.tick() => {}
            }

            let progress = if self.duration.is_zero() {
                1.0
            } else {
                started.elapsed().as_secs_f32() / self.duration.as_secs_f32()
            };
            for (index, frame) in self.frames_at(progress) {
                apply(index, frame);
            }
            if progress >= 1.0 {
                return true;
            }
        }
    }
}
