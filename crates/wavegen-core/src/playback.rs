//! Playback engine interface.
//!
//! The device side (sample-clock timer plus DMA streaming to the DAC) is an
//! external collaborator. The engine only needs four operations from it, see
//! [`PlaybackController`].
//!
//! ## Consistency
//!
//! The playback reader runs on its own timeline and is never synchronized
//! with buffer writers. Two write paths exist:
//!
//! - **Full rebuilds** (`rate`, `buffer`, session start) go through
//!   [`rebuild`]: the stream is stopped before the buffer is touched and
//!   restarted afterwards, so the device never sees a half-rebuilt buffer.
//! - **Incremental mixing** (`add`, `clear`) writes into the live buffer while
//!   the stream keeps running and only flushes afterwards via
//!   [`flush_if_dirty`]. For the duration of one synthesis pass the device may
//!   play a mix of old and new samples. This window is accepted.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::Result;
use crate::engine::EngineState;

/// Device-side playback operations.
pub trait PlaybackController {
    /// Reprogram the sample clock to `sample_rate` Hz.
    fn configure_clock(&mut self, sample_rate: u32);

    /// Begin streaming `samples` to the DAC in a continuous loop.
    fn start_stream(&mut self, samples: &[u16]);

    /// Stop streaming.
    fn stop_stream(&mut self);

    /// Make CPU-side writes to `samples` visible to the device (for example a
    /// data-cache clean before DMA reads).
    fn flush_for_device(&mut self, samples: &[u16]);
}

impl<P: PlaybackController + ?Sized> PlaybackController for &mut P {
    fn configure_clock(&mut self, sample_rate: u32) {
        (**self).configure_clock(sample_rate);
    }

    fn start_stream(&mut self, samples: &[u16]) {
        (**self).start_stream(samples);
    }

    fn stop_stream(&mut self) {
        (**self).stop_stream();
    }

    fn flush_for_device(&mut self, samples: &[u16]) {
        (**self).flush_for_device(samples);
    }
}

/// Flush the active region if the engine wrote to it since the last flush.
///
/// Returns whether a flush happened.
pub fn flush_if_dirty<P>(state: &mut EngineState, playback: &mut P) -> bool
where
    P: PlaybackController + ?Sized,
{
    if !state.is_dirty() {
        return false;
    }
    playback.flush_for_device(state.buffer().active());
    state.mark_clean();
    true
}

/// Run a full-buffer mutation with playback paused.
///
/// Stops the stream, applies `mutate`, flushes, reprograms the clock for the
/// (possibly new) sample rate and restarts streaming over the (possibly new)
/// active length. Playback is restarted even if `mutate` fails; its result is
/// returned unchanged.
pub fn rebuild<P, T, F>(state: &mut EngineState, playback: &mut P, mutate: F) -> Result<T>
where
    P: PlaybackController + ?Sized,
    F: FnOnce(&mut EngineState) -> Result<T>,
{
    playback.stop_stream();
    let result = mutate(state);
    flush_if_dirty(state, playback);
    playback.configure_clock(state.sample_rate());
    playback.start_stream(state.buffer().active());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "rebuild: restarted at {} Hz over {} samples",
        state.sample_rate(),
        state.buffer().active_len()
    );

    result
}

/// One call into a [`RecordingPlayback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// `configure_clock(rate)`.
    ConfigureClock(u32),
    /// `start_stream` over this many samples.
    Start(usize),
    /// `stop_stream`.
    Stop,
    /// `flush_for_device` over this many samples.
    Flush(usize),
}

/// Playback controller that records every call, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayback {
    events: Vec<PlaybackEvent>,
    streaming: bool,
}

impl RecordingPlayback {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls received so far, oldest first.
    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    /// Forget recorded calls.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Whether the last start has not been followed by a stop.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }
}

impl PlaybackController for RecordingPlayback {
    fn configure_clock(&mut self, sample_rate: u32) {
        self.events.push(PlaybackEvent::ConfigureClock(sample_rate));
    }

    fn start_stream(&mut self, samples: &[u16]) {
        self.streaming = true;
        self.events.push(PlaybackEvent::Start(samples.len()));
    }

    fn stop_stream(&mut self) {
        self.streaming = false;
        self.events.push(PlaybackEvent::Stop);
    }

    fn flush_for_device(&mut self, samples: &[u16]) {
        self.events.push(PlaybackEvent::Flush(samples.len()));
    }
}
