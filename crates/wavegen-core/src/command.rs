//! Command registry and dispatcher.
//!
//! Commands live in the static, ordered [`COMMANDS`] table and are resolved by
//! case-insensitive prefix of the first token (`"h"` → `help`,
//! `"cl"` → `clear`). The first matching entry wins. Anything that matches no
//! entry, and an empty line, shows the help listing.
//!
//! Handlers never fail the session. They return a [`CommandStatus`]; errors
//! are written to the status sink by [`Session::execute_line`] and leave the
//! engine as it was.
//!
//! # Example
//!
//! ```rust
//! use wavegen_core::{EngineConfig, RecordingPlayback, Session, MID_SCALE};
//!
//! let mut session = Session::new(EngineConfig::default(), RecordingPlayback::new());
//! let mut out = String::new();
//!
//! session.execute_line("rate 1000", &mut out).unwrap();
//! session.execute_line("buffer 1000", &mut out).unwrap();
//! session.execute_line("add sine 100 0.5 0", &mut out).unwrap();
//!
//! assert_eq!(session.state().buffer().get(0), Some(MID_SCALE));
//! ```

use core::fmt::Write;

#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};

use crate::args::{
    ArgLimits, matches_prefix, parse_float_prefix, parse_frequency, parse_int_prefix, parse_line,
};
use crate::engine::{EngineConfig, EngineState};
use crate::playback::{PlaybackController, flush_if_dirty, rebuild};
use crate::waveform::{WAVEFORMS, Waveform};
use crate::{Error, Result};

/// Built-in commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// List commands and waveforms.
    Help,
    /// Silence the buffer.
    Clear,
    /// Mix a waveform into the buffer.
    Add,
    /// Set or show the sample clock.
    Rate,
    /// Set or show the active buffer length.
    Buffer,
}

/// Registry entry for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Keyword, matched by prefix.
    pub name: &'static str,
    /// One-line description.
    pub help: &'static str,
    /// Argument synopsis.
    pub help_args: &'static str,
    /// Handler selector.
    pub command: Command,
}

/// All commands in lookup order.
pub const COMMANDS: [CommandDescriptor; 5] = [
    CommandDescriptor {
        name: "help",
        help: "display help information",
        help_args: "",
        command: Command::Help,
    },
    CommandDescriptor {
        name: "clear",
        help: "clear waveform data",
        help_args: "",
        command: Command::Clear,
    },
    CommandDescriptor {
        name: "add",
        help: "add signal",
        help_args: "[<wave>] [<freq> [<ampl> [<phase>]]]",
        command: Command::Add,
    },
    CommandDescriptor {
        name: "rate",
        help: "set sample rate",
        help_args: "<rate>",
        command: Command::Rate,
    },
    CommandDescriptor {
        name: "buffer",
        help: "show buffer params",
        help_args: "[<size>]",
        command: Command::Buffer,
    },
];

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    /// Engine state or the buffer changed.
    Applied,
    /// Information was printed; nothing changed.
    Reported,
    /// Input was not understood and nothing happened.
    Ignored,
    /// Help was shown because the line was empty.
    Help,
    /// The command was refused; the error has been reported.
    Rejected(Error),
}

/// Borrowed state handed to a command handler.
pub struct Context<'a> {
    /// Engine state.
    pub state: &'a mut EngineState,
    /// Device-side playback.
    pub playback: &'a mut dyn PlaybackController,
    /// Status text sink.
    pub out: &'a mut dyn Write,
}

impl Command {
    /// Resolve a typed abbreviation, first match in table order.
    pub fn lookup(token: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|d| matches_prefix(d.name, token))
            .map(|d| d.command)
    }

    /// Registry entry for this command.
    pub fn descriptor(self) -> &'static CommandDescriptor {
        COMMANDS
            .iter()
            .find(|d| d.command == self)
            .unwrap_or(&COMMANDS[0])
    }

    /// Run the handler with the arguments after the keyword.
    ///
    /// # Errors
    ///
    /// Any [`Error`] the handler refuses the command with. The buffer and
    /// sample clock are unchanged in that case; `add` keeps the frequency and
    /// amplitude it parsed even when synthesis is refused.
    pub fn apply(self, ctx: &mut Context<'_>, args: &[String]) -> Result<CommandStatus> {
        match self {
            Command::Help => {
                write_help(ctx.out)?;
                Ok(CommandStatus::Reported)
            }
            Command::Clear => clear(ctx),
            Command::Add => add(ctx, args),
            Command::Rate => rate(ctx, args),
            Command::Buffer => buffer(ctx, args),
        }
    }
}

/// Write the command and waveform listing.
pub fn write_help(out: &mut dyn Write) -> core::fmt::Result {
    writeln!(out, "Commands are:")?;
    for d in &COMMANDS {
        writeln!(out, "  {:<10} {:<36}  {}", d.name, d.help_args, d.help)?;
    }
    writeln!(out, "Waveform choices are:")?;
    for w in &WAVEFORMS {
        writeln!(out, "  {}", w.name())?;
    }
    Ok(())
}

/// Write the line announcing a playback restart.
pub fn write_restart(out: &mut dyn Write, state: &EngineState) -> core::fmt::Result {
    writeln!(
        out,
        "Sample rate is {} KHz, {} Ksamples",
        state.sample_rate() / 1000,
        state.buffer().active_len() / 1000
    )
}

fn write_buffer_params(out: &mut dyn Write, state: &EngineState) -> core::fmt::Result {
    writeln!(out, "Buffer Parameters:")?;
    writeln!(out, "  size         {} samples", state.buffer().active_len())?;
    writeln!(out, "  max size     {} samples", state.buffer().capacity())?;
    writeln!(out, "  sample rate  {} KHz", state.sample_rate() / 1000)
}

fn clear(ctx: &mut Context<'_>) -> Result<CommandStatus> {
    ctx.state.clear();
    flush_if_dirty(ctx.state, ctx.playback);
    Ok(CommandStatus::Applied)
}

fn add(ctx: &mut Context<'_>, args: &[String]) -> Result<CommandStatus> {
    // A leading frequency means "add sine <freq> ...": keep it as the first
    // parameter instead of consuming it as a waveform name.
    let (waveform, params) = match args.split_first() {
        None => (Waveform::default(), args),
        Some((first, rest)) => match Waveform::lookup(first) {
            Some(w) => (w, rest),
            None if parse_frequency(first).is_ok() => (Waveform::default(), args),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("add: '{first}' is neither a waveform nor a frequency");
                return Ok(CommandStatus::Ignored);
            }
        },
    };

    writeln!(ctx.out, "{} waveform", waveform.name())?;
    let persisted = ctx.state.params_mut();
    if let Some(token) = params.first() {
        if let Ok(hz) = parse_frequency(token) {
            persisted.set_frequency(hz);
        }
        writeln!(ctx.out, "  frequency {} KHz", persisted.frequency / 1000)?;
    }
    if let Some(token) = params.get(1) {
        persisted.set_amplitude(parse_float_prefix(token));
        writeln!(ctx.out, "  amplitude {:.3}", persisted.amplitude)?;
    }
    let phase = params.get(2).map_or(0, |token| parse_int_prefix(token));
    if params.len() > 2 {
        writeln!(ctx.out, "  phase {phase:3} %")?;
    }

    let frequency = persisted.frequency;
    let amplitude = persisted.amplitude;
    writeln!(
        ctx.out,
        "{} at {} KHz ampl {:4}mv (phase {} %)",
        waveform.name(),
        frequency / 1000,
        (amplitude * 1000.0) as i64,
        phase
    )?;

    ctx.state.synthesize(waveform, frequency, amplitude, phase)?;
    flush_if_dirty(ctx.state, ctx.playback);
    Ok(CommandStatus::Applied)
}

fn rate(ctx: &mut Context<'_>, args: &[String]) -> Result<CommandStatus> {
    let Some(token) = args.first() else {
        writeln!(ctx.out, "sample rate is {} KHz", ctx.state.sample_rate() / 1000)?;
        return Ok(CommandStatus::Reported);
    };
    let sample_rate = parse_frequency(token)?;
    rebuild(ctx.state, ctx.playback, |s| s.set_sample_rate(sample_rate))?;
    write_restart(ctx.out, ctx.state)?;
    Ok(CommandStatus::Applied)
}

fn buffer(ctx: &mut Context<'_>, args: &[String]) -> Result<CommandStatus> {
    let mut status = CommandStatus::Reported;
    if let Some(token) = args.first() {
        let requested = parse_int_prefix(token);
        let capacity = ctx.state.buffer().capacity();
        let len = usize::try_from(requested)
            .ok()
            .filter(|len| (1..=capacity).contains(len))
            .ok_or(Error::BufferSizeOutOfRange {
                requested,
                capacity,
            })?;
        rebuild(ctx.state, ctx.playback, |s| s.resize(len))?;
        status = CommandStatus::Applied;
    }
    write_buffer_params(ctx.out, ctx.state)?;
    Ok(status)
}

/// An interactive session: engine state, playback device and token limits.
///
/// This is the command dispatcher. Feed it raw lines with
/// [`execute_line`](Self::execute_line).
#[derive(Debug)]
pub struct Session<P> {
    state: EngineState,
    playback: P,
    limits: ArgLimits,
}

impl<P: PlaybackController> Session<P> {
    /// Create a session. The buffer starts zero-filled; call
    /// [`start`](Self::start) to silence it and begin playback.
    pub fn new(config: EngineConfig, playback: P) -> Self {
        Self {
            state: EngineState::new(&config),
            playback,
            limits: ArgLimits::default(),
        }
    }

    /// Replace the tokenizer limits.
    pub fn with_limits(mut self, limits: ArgLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Engine state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Playback device.
    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Mutable playback device.
    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Show help, silence the buffer and start playback.
    ///
    /// # Errors
    ///
    /// [`Error::Output`] if the status sink fails.
    pub fn start(&mut self, out: &mut dyn Write) -> Result<()> {
        write_help(out)?;
        rebuild(&mut self.state, &mut self.playback, |s| {
            s.clear();
            Ok(())
        })?;
        write_restart(out, &self.state)?;
        Ok(())
    }

    /// Parse and run one line of input.
    ///
    /// Errors from the command are reported on `out` and returned as
    /// [`CommandStatus::Rejected`]; unknown commands print help and are
    /// returned as `Rejected(UnknownCommand)`.
    ///
    /// # Errors
    ///
    /// Only [`Error::Output`], when the status sink fails.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Result<CommandStatus> {
        let parsed = parse_line(line, &self.limits);
        for dropped in &parsed.dropped {
            writeln!(out, "{dropped}")?;
        }

        let Some((keyword, args)) = parsed.args.split_first() else {
            write_help(out)?;
            return Ok(CommandStatus::Help);
        };

        let Some(command) = Command::lookup(keyword) else {
            #[cfg(feature = "tracing")]
            tracing::warn!("unknown command '{keyword}'");
            write_help(out)?;
            return Ok(CommandStatus::Rejected(Error::UnknownCommand(
                keyword.to_string(),
            )));
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("dispatch: {} {:?}", command.descriptor().name, args);

        let mut ctx = Context {
            state: &mut self.state,
            playback: &mut self.playback,
            out: &mut *out,
        };
        match command.apply(&mut ctx, args) {
            Ok(status) => Ok(status),
            Err(Error::Output(e)) => Err(Error::Output(e)),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("{} rejected: {e}", command.descriptor().name);
                writeln!(out, "{e}")?;
                Ok(CommandStatus::Rejected(e))
            }
        }
    }
}
