//! Wavegen CLI - interactive console for the wavegen DAC signal generator.

mod commands;
mod console;
mod playback;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wavegen")]
#[command(author, version, about = "DAC waveform generator console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive command console on stdin/stdout
    Console(commands::console::ConsoleArgs),

    /// Show the effective configuration, commands and waveforms
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Console(args) => commands::console::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
