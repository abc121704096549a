//! Host-side stand-in for the timer-driven DAC.
//!
//! The hardware paces the DAC with a timer whose reload period is derived
//! from a fixed master clock. [`SimulatedDac`] performs the same arithmetic
//! and tracks stream state so the console behaves like the board does.

use tracing::{debug, info, warn};
use wavegen_core::PlaybackController;

/// Timer reload period that paces samples at `sample_rate`.
///
/// Returns `None` for a zero rate or one faster than the master clock.
pub fn timer_period(master_clock_hz: u32, sample_rate: u32) -> Option<u32> {
    if sample_rate == 0 || sample_rate > master_clock_hz {
        return None;
    }
    Some(master_clock_hz / sample_rate - 1)
}

/// Playback controller that models the timer and DMA stream in memory.
#[derive(Debug, Clone)]
pub struct SimulatedDac {
    master_clock_hz: u32,
    period: Option<u32>,
    streaming: bool,
    stream_len: usize,
    flushes: u64,
}

impl SimulatedDac {
    /// Create an idle DAC clocked from `master_clock_hz`.
    pub fn new(master_clock_hz: u32) -> Self {
        Self {
            master_clock_hz,
            period: None,
            streaming: false,
            stream_len: 0,
            flushes: 0,
        }
    }

    /// Current timer reload period, if the clock was configured.
    pub fn period(&self) -> Option<u32> {
        self.period
    }

    /// Sample rate the timer actually produces.
    pub fn achieved_rate(&self) -> Option<u32> {
        self.period.map(|p| self.master_clock_hz / (p + 1))
    }

    /// Whether a stream is running.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    /// Length of the running (or last) stream in samples.
    pub fn stream_len(&self) -> usize {
        self.stream_len
    }

    /// Number of cache flushes performed.
    pub fn flushes(&self) -> u64 {
        self.flushes
    }
}

impl PlaybackController for SimulatedDac {
    fn configure_clock(&mut self, sample_rate: u32) {
        let Some(period) = timer_period(self.master_clock_hz, sample_rate) else {
            if sample_rate > self.master_clock_hz {
                warn!(
                    sample_rate,
                    master_clock_hz = self.master_clock_hz,
                    achieved = ?self.achieved_rate(),
                    "sample rate above master clock, timer unchanged"
                );
            } else {
                debug!(sample_rate, "clock unchanged");
            }
            return;
        };
        self.period = Some(period);
        debug!(
            sample_rate,
            period,
            achieved = self.master_clock_hz / (period + 1),
            "timer configured"
        );
    }

    fn start_stream(&mut self, samples: &[u16]) {
        self.streaming = true;
        self.stream_len = samples.len();
        info!(samples = samples.len(), "stream started");
    }

    fn stop_stream(&mut self) {
        if self.streaming {
            debug!("stream stopped");
        }
        self.streaming = false;
    }

    fn flush_for_device(&mut self, samples: &[u16]) {
        self.flushes += 1;
        debug!(samples = samples.len(), "cache flushed");
    }
}
