//! Error types for engine and command operations.
//!
//! None of these are fatal: the command dispatcher reports them as status text
//! and leaves engine state untouched. Only [`Error::Output`] (the status sink
//! itself failed) is propagated to the caller of the dispatcher.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use thiserror::Error;

/// Errors that can occur while parsing or executing a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A frequency or rate token was zero, negative, or not numeric.
    #[error("invalid frequency '{0}'")]
    InvalidFrequency(String),

    /// A token exceeded the maximum argument length and was dropped.
    #[error("argument too long: '{token}' (max {max} characters)")]
    ArgumentTooLong {
        /// The rejected token.
        token: String,
        /// Maximum accepted token length in characters.
        max: usize,
    },

    /// Requested active length is outside `1..=capacity`.
    #[error("buffer size {requested} out of range (1 to {capacity} samples)")]
    BufferSizeOutOfRange {
        /// Size the user asked for.
        requested: i64,
        /// Fixed buffer capacity.
        capacity: usize,
    },

    /// The first token matched no registry entry.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// `sample_rate / frequency` truncated to zero samples per cycle.
    #[error("bad sample rate - no samples per cycle ({frequency} Hz at {sample_rate} Hz)")]
    EmptyCycle {
        /// Current sample clock in Hz.
        sample_rate: u32,
        /// Requested cycle frequency in Hz.
        frequency: u32,
    },

    /// Writing to the status sink failed.
    #[error("failed to write status output")]
    Output(#[from] core::fmt::Error),
}

/// Convenience result type for engine and command operations.
pub type Result<T> = core::result::Result<T, Error>;
