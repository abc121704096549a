//! Interactive command console.

use super::common::{ConfigArgs, init_tracing, load_config, parse_rate};
use crate::console::LineEditor;
use crate::playback::SimulatedDac;
use clap::Args;
use std::io::{self, Write};
use wavegen_core::Session;

/// Run the generator console on stdin/stdout.
#[derive(Args, Debug)]
pub struct ConsoleArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Start-up sample rate in Hz (e.g. 500k)
    #[arg(long, value_parser = parse_rate)]
    rate: Option<u32>,

    /// Sample buffer capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Echo typed characters (for raw serial terminals)
    #[arg(long)]
    echo: bool,
}

/// Run the console command.
pub fn run(args: ConsoleArgs) -> anyhow::Result<()> {
    let (mut config, path) = load_config(&args.config)?;
    if let Some(rate) = args.rate {
        config.engine.sample_rate = rate;
    }
    if let Some(capacity) = args.capacity {
        config.engine.capacity = capacity;
    }
    config.console.echo |= args.echo;
    config.validate()?;

    init_tracing(&config.log_level);
    if let Some(path) = &path {
        tracing::info!(path = %path.display(), "loaded config");
    }

    let mut session = Session::new(
        config.engine_config(),
        SimulatedDac::new(config.playback.master_clock_hz),
    )
    .with_limits(config.arg_limits());

    let stdin = io::stdin();
    let mut editor = LineEditor::new(stdin.lock(), config.console.max_line, config.console.echo);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut status = String::new();
    session.start(&mut status)?;
    out.write_all(status.as_bytes())?;

    loop {
        write!(out, "\n{}", config.console.prompt)?;
        out.flush()?;

        let Some(line) = editor.read_line(&mut out)? else {
            break;
        };
        writeln!(out)?;

        status.clear();
        session.execute_line(&line, &mut status)?;
        out.write_all(status.as_bytes())?;
    }

    writeln!(out)?;
    out.flush()?;

    let dac = session.playback();
    tracing::info!(
        streaming = dac.is_streaming(),
        samples = dac.stream_len(),
        flushes = dac.flushes(),
        "end of input"
    );
    Ok(())
}
