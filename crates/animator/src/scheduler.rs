//! The frame-precise rendering loop.

use std::time::{Duration, Instant};

use futures::future::join_all;
use lumicast_core::{sequence::Sequence, time::FrameRate, Error, Result};
use lumicast_network::{Light, Transport};

use crate::{CancelToken, FrameSink};

/// How many times the sequence is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatPolicy {
    /// Replay the sequence `n` additional times after the first pass.
    Count(u32),
    /// Keep starting frames while the run's wall-clock time is below the
    /// limit.
    For(Duration),
    /// Replay until the cancel token fires.
    #[default]
    UntilCancelled,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The repeat policy was exhausted.
    Completed,
    /// The cancel token fired.
    Cancelled,
}

/// A fully configured animation run.
///
/// Owns the light endpoints for the duration of the run so the per-frame
/// fan-out can hand each light out by exclusive borrow; the lights share no
/// other mutable state.
pub struct Animation<S> {
    sequence: S,
    lights: Vec<Light>,
    frame_rate: FrameRate,
    smooth_transitions: bool,
    repeat: RepeatPolicy,
}

impl<S: Sequence> Animation<S> {
    /// Validates the configuration and creates a runnable animation.
    ///
    /// Fails when the sequence is empty, the frame rate is zero or any
    /// light's row lies outside the sequence; row bounds are checked here
    /// once and hold for the whole run.
    pub fn new(sequence: S, lights: Vec<Light>, frame_rate: FrameRate) -> Result<Self> {
        if frame_rate.0 == 0 {
            return Err(Error::ZeroFrameRate);
        }
        if sequence.frame_count() == 0 {
            return Err(Error::EmptySequence);
        }
        for (index, light) in lights.iter().enumerate() {
            if light.row() >= sequence.light_count() {
                return Err(Error::RowOutOfBounds {
                    light: index,
                    row: light.row(),
                    height: sequence.light_count(),
                });
            }
        }

        Ok(Self {
            sequence,
            lights,
            frame_rate,
            smooth_transitions: false,
            repeat: RepeatPolicy::default(),
        })
    }

    /// Enables smooth transitions: each send carries the frame period as its
    /// transition duration instead of telling the device to snap instantly.
    #[must_use]
    pub fn smooth_transitions(mut self, enable: bool) -> Self {
        self.smooth_transitions = enable;
        self
    }

    /// Sets the repeat policy. Defaults to [`RepeatPolicy::UntilCancelled`].
    #[must_use]
    pub fn repeat(mut self, policy: RepeatPolicy) -> Self {
        self.repeat = policy;
        self
    }

    /// Runs the animation until the repeat policy is exhausted or the token
    /// is cancelled.
    ///
    /// Within a frame, every light's send is dispatched concurrently and
    /// joined before pacing begins; no timeout is placed on individual
    /// sends, so a hung transport stalls the join indefinitely.
    pub async fn run<T, E>(mut self, transport: &T, cancel: &CancelToken, sink: &mut E) -> Outcome
    where
        T: Transport,
        E: FrameSink,
    {
        let frame_count = self.sequence.frame_count();
        let transition_ms = if self.smooth_transitions {
            self.frame_rate.period_ms()
        } else {
            0
        };

        // The timer starts once; every frame deadline is derived from the
        // total number of frames rendered so far, which keeps integer
        // rounding from accumulating into drift across cycles.
        let timer = Instant::now();
        let mut frames_sent: u64 = 0;

        let mut cycle = 0_u32;
        while self.should_render(cycle, timer, cancel) {
            let mut frame = 0;
            while frame < frame_count && self.should_render(cycle, timer, cancel) {
                sink.frame_started(frame + 1, frame_count, cycle);
                for light in &self.lights {
                    sink.light_color(light.address(), light.color(&self.sequence, frame));
                }

                let sequence = &self.sequence;
                join_all(self.lights.iter_mut().map(|light| {
                    light.send_set_color(transport, sequence, frame, transition_ms)
                }))
                .await;

                frames_sent += 1;
                sink.frame_rendered(timer.elapsed(), self.remaining_cycles(cycle));

                self.pace(timer, frames_sent, cancel).await;
                frame += 1;
            }
            cycle += 1;
        }

        if cancel.is_cancelled() {
            log::debug!("Animation cancelled after {} frame(s)", frames_sent);
            Outcome::Cancelled
        } else {
            log::debug!("Animation completed after {} frame(s)", frames_sent);
            Outcome::Completed
        }
    }

    fn should_render(&self, cycle: u32, timer: Instant, cancel: &CancelToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        match self.repeat {
            RepeatPolicy::Count(count) => cycle <= count,
            RepeatPolicy::For(limit) => timer.elapsed() < limit,
            RepeatPolicy::UntilCancelled => true,
        }
    }

    fn remaining_cycles(&self, cycle: u32) -> Option<u32> {
        match self.repeat {
            RepeatPolicy::Count(count) => Some(count.saturating_sub(cycle)),
            RepeatPolicy::For(_) | RepeatPolicy::UntilCancelled => None,
        }
    }

    /// Waits out the deadline of the frame that was just rendered.
    ///
    /// Coarse sleep primitives are only accurate to around 15 ms on some
    /// platforms, far too sloppy for frame pacing, so this polls the
    /// monotonic clock in a tight yielding loop instead. The extra CPU time
    /// buys sub-10ms accuracy, an acceptable trade for a short-lived
    /// foreground tool.
    async fn pace(&self, timer: Instant, frames_sent: u64, cancel: &CancelToken) {
        let deadline = self.frame_rate.deadline(frames_sent);
        while timer.elapsed() < deadline && !cancel.is_cancelled() {
            tokio::task::yield_now().await;
        }
    }
}
