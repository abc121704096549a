//! Wavegen Core - waveform synthesis engine for a DAC signal generator
//!
//! This crate turns text commands such as `add sine 5k 0.3 25` into DAC
//! codes in a fixed-capacity sample buffer that a hardware playback engine
//! streams in a loop. Waveforms are mixed additively, so several `add`
//! commands build up a composite signal; the sum is clipped to full scale.
//!
//! # Core Components
//!
//! ## Buffer & Quantization
//!
//! - [`SampleBuffer`] - Fixed-capacity DAC code buffer with an active length
//! - [`encode`] / [`decode`] - Map between `[-1.0, 1.0]` and `0..=Q_MAX`
//!
//! ## Synthesis
//!
//! - [`Waveform`] - Sine, Sawtooth, Square, Triangle, resolved by prefix
//! - [`EngineState`] - Buffer, sample clock and persisted `add` parameters
//!
//! ## Control Surface
//!
//! - [`Session`] - Line-oriented command dispatcher
//! - [`Command`] / [`COMMANDS`] - The static command registry
//! - [`parse_line`] / [`parse_frequency`] - Tokenizer and `K`-suffix parsing
//!
//! ## Playback
//!
//! - [`PlaybackController`] - Device-side clock and streaming operations
//! - [`rebuild`] - Pause, mutate, flush and restart in one step
//!
//! # Example
//!
//! ```rust
//! use wavegen_core::{EngineConfig, RecordingPlayback, Session};
//!
//! let mut session = Session::new(EngineConfig::default(), RecordingPlayback::new());
//! let mut out = String::new();
//! session.start(&mut out).unwrap();
//!
//! session.execute_line("add sine 5k 0.3", &mut out).unwrap();
//! session.execute_line("add square 1k 0.1 50", &mut out).unwrap();
//! assert!(out.contains("Square at 1 KHz"));
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature:
//!
//! ```toml
//! [dependencies]
//! wavegen-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod args;
pub mod buffer;
pub mod command;
pub mod engine;
pub mod error;
pub mod playback;
pub mod waveform;

pub use args::{
    ArgLimits, MAX_ARG_LEN, MAX_ARGS, ParsedLine, matches_prefix, parse_float_prefix,
    parse_frequency, parse_int_prefix, parse_line,
};
pub use buffer::{DEFAULT_CAPACITY, MID_SCALE, Q_MAX, SampleBuffer, clip_unit, decode, encode};
pub use command::{
    COMMANDS, Command, CommandDescriptor, CommandStatus, Context, Session, write_help,
    write_restart,
};
pub use engine::{
    CycleLayout, DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_SAMPLE_RATE, EngineConfig,
    EngineState, MIN_AMPLITUDE, SynthesisParameters,
};
pub use error::{Error, Result};
pub use playback::{PlaybackController, PlaybackEvent, RecordingPlayback, flush_if_dirty, rebuild};
pub use waveform::{WAVEFORMS, Waveform};
