//! Synthesis engine state.
//!
//! [`EngineState`] owns everything the command handlers mutate: the sample
//! buffer, the sample clock rate, and the frequency/amplitude that persist
//! between `add` commands. Handlers receive it by `&mut`; there is no other
//! engine state.
//!
//! # Synthesis
//!
//! For a cycle frequency `f` at sample rate `R`:
//!
//! ```text
//! N      = floor(R / f)                      samples per cycle
//! offset = trunc(N * phase_percent / 100)    phase as an index rotation
//! n      = (sample + offset) mod N           position within the cycle
//! ```
//!
//! Each sample in the active region gets `waveform(n, N) * amplitude` mixed
//! in with [`SampleBuffer::encode_additive`]. `N` need not divide the active
//! length; the last cycle is simply cut off.

use crate::buffer::{DEFAULT_CAPACITY, SampleBuffer};
use crate::waveform::Waveform;
use crate::{Error, Result};

/// Default sample clock in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 500_000;

/// Default `add` frequency in Hz.
pub const DEFAULT_FREQUENCY: u32 = 5000;

/// Default `add` amplitude.
pub const DEFAULT_AMPLITUDE: f64 = 0.2;

/// Amplitudes at or below this are not stored as the new default.
pub const MIN_AMPLITUDE: f64 = 0.0001;

/// Start-up configuration for an [`EngineState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Fixed buffer capacity in samples.
    pub capacity: usize,
    /// Initial sample clock in Hz.
    pub sample_rate: u32,
    /// Initial persisted `add` frequency in Hz.
    pub frequency: u32,
    /// Initial persisted `add` amplitude.
    pub amplitude: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

/// Frequency and amplitude remembered between `add` commands.
///
/// Phase is never remembered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParameters {
    /// Last used cycle frequency in Hz.
    pub frequency: u32,
    /// Last used amplitude.
    pub amplitude: f64,
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl SynthesisParameters {
    /// Store a new frequency. Zero is ignored; returns whether it was stored.
    pub fn set_frequency(&mut self, hz: u32) -> bool {
        if hz == 0 {
            return false;
        }
        self.frequency = hz;
        true
    }

    /// Store a new amplitude if it is finite and above [`MIN_AMPLITUDE`].
    pub fn set_amplitude(&mut self, amplitude: f64) -> bool {
        if amplitude.is_finite() && amplitude > MIN_AMPLITUDE {
            self.amplitude = amplitude;
            true
        } else {
            false
        }
    }
}

/// Cycle geometry used by one synthesis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleLayout {
    /// `floor(sample_rate / frequency)`.
    pub samples_per_cycle: u32,
    /// Index rotation derived from the phase percentage.
    pub phase_offset: i64,
}

impl CycleLayout {
    /// Position within the cycle of buffer index 0.
    pub fn start_position(&self) -> u32 {
        self.phase_offset
            .rem_euclid(i64::from(self.samples_per_cycle)) as u32
    }
}

/// The engine: sample buffer, sample clock and persisted parameters.
#[derive(Debug, Clone)]
pub struct EngineState {
    buffer: SampleBuffer,
    sample_rate: u32,
    params: SynthesisParameters,
    dirty: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl EngineState {
    /// Allocate the buffer (zero-filled) and apply the configured defaults.
    pub fn new(config: &EngineConfig) -> Self {
        let mut params = SynthesisParameters::default();
        params.set_frequency(config.frequency);
        params.set_amplitude(config.amplitude);
        Self {
            buffer: SampleBuffer::new(config.capacity),
            sample_rate: config.sample_rate,
            params,
            dirty: true,
        }
    }

    /// The sample buffer.
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Current sample clock in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Persisted `add` parameters.
    pub fn params(&self) -> &SynthesisParameters {
        &self.params
    }

    /// Mutable access to the persisted `add` parameters.
    pub fn params_mut(&mut self) -> &mut SynthesisParameters {
        &mut self.params
    }

    /// Whether the buffer changed since the last device flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record that the device has seen the current buffer contents.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whole samples per cycle of `frequency` at the current sample rate.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCycle`] when the frequency is zero or above the sample
    /// rate.
    pub fn samples_per_cycle(&self, frequency: u32) -> Result<u32> {
        let empty = Error::EmptyCycle {
            sample_rate: self.sample_rate,
            frequency,
        };
        match self.sample_rate.checked_div(frequency) {
            Some(0) | None => Err(empty),
            Some(n) => Ok(n),
        }
    }

    /// Mix one waveform into the active region of the buffer.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCycle`] if no whole sample fits in one cycle; the buffer
    /// is left untouched.
    pub fn synthesize(
        &mut self,
        waveform: Waveform,
        frequency: u32,
        amplitude: f64,
        phase_percent: i64,
    ) -> Result<CycleLayout> {
        let samples_per_cycle = self.samples_per_cycle(frequency)?;
        let layout = CycleLayout {
            samples_per_cycle,
            phase_offset: i64::from(samples_per_cycle).saturating_mul(phase_percent) / 100,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "synthesize: {} {frequency} Hz x{amplitude}, {samples_per_cycle} samples/cycle, offset {}",
            waveform.name(),
            layout.phase_offset
        );

        let mut n = layout.start_position();
        for index in 0..self.buffer.active_len() {
            self.buffer
                .encode_additive(index, waveform.value_at(n, samples_per_cycle) * amplitude);
            n += 1;
            if n == samples_per_cycle {
                n = 0;
            }
        }
        self.dirty = true;
        Ok(layout)
    }

    /// Set the active region to silence.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.dirty = true;
    }

    /// Change the sample clock, restore the full buffer length and clear it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFrequency`] for a zero rate; nothing changes.
    pub fn set_sample_rate(&mut self, sample_rate: u32) -> Result<()> {
        if sample_rate == 0 {
            return Err(Error::InvalidFrequency("0".into()));
        }
        self.sample_rate = sample_rate;
        self.buffer.reset_active_len();
        self.clear();
        Ok(())
    }

    /// Change the active length and clear the buffer.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSizeOutOfRange`] unless `1 <= len <= capacity`; nothing
    /// changes.
    pub fn resize(&mut self, len: usize) -> Result<()> {
        self.buffer.set_active_len(len)?;
        self.clear();
        Ok(())
    }
}
