// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::VecDeque;

use kurbo::Vec2;
use understory_gesture::Timestamp;

#[derive(Copy, Clone, Debug, PartialEq)]
struct Sample {
    dt: Timestamp,
    delta: Vec2,
}

/// Recent movement samples of a drag, used to derive the throw velocity.
///
/// Velocities are in pixels per millisecond.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
    capacity: usize,
    window: Timestamp,
    last_frame: Timestamp,
}

impl VelocityTracker {
    /// Keeps at most `capacity` samples and averages over `window` ms.
    #[must_use]
    pub fn new(capacity: usize, window: Timestamp) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity + 1),
            capacity: capacity.max(1),
            window,
            last_frame: 0,
        }
    }

    /// Starts timing at `now`.
    pub fn observe(&mut self, now: Timestamp) {
        self.last_frame = now;
    }

    /// Time of the last observed frame.
    #[must_use]
    pub fn last_frame(&self) -> Timestamp {
        self.last_frame
    }

    /// Records a movement of `delta` at `now`.
    pub fn add(&mut self, delta: Vec2, now: Timestamp) {
        let dt = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        self.samples.push_back(Sample { dt, delta });
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Mean velocity of the newest samples, as seen at release time `now`.
    ///
    /// A resting sample is recorded at `now` first, so a drag that paused
    /// before release yields a slow throw. Samples are taken newest first
    /// until their durations add up to more than the window; the oldest
    /// sample (timed from the gesture start) is never used. Samples without
    /// elapsed time carry no velocity and are skipped.
    pub fn mean(&mut self, now: Timestamp) -> Vec2 {
        self.add(Vec2::ZERO, now);
        let mut sum = Vec2::ZERO;
        let mut count = 0_u32;
        let mut elapsed: Timestamp = 0;
        for sample in self.samples.iter().skip(1).rev() {
            elapsed += sample.dt;
            if sample.dt > 0 {
                sum += sample.delta / sample.dt as f64;
                count += 1;
            }
            if elapsed > self.window {
                break;
            }
        }
        if count == 0 {
            Vec2::ZERO
        } else {
            sum / f64::from(count)
        }
    }

    /// Forgets all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Number of stored samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no samples are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
