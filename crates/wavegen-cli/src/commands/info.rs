//! Show the effective session configuration.

use super::common::{ConfigArgs, init_tracing, load_config};
use crate::playback::SimulatedDac;
use clap::Args;
use wavegen_config::default_config_path;
use wavegen_core::{PlaybackController, write_help};

/// Print the configuration, command table and timer setup, then exit.
#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let (config, path) = load_config(&args.config)?;
    init_tracing(&config.log_level);

    match &path {
        Some(path) => println!("Config:      {}", path.display()),
        None => println!(
            "Config:      built-in defaults ({} not found)",
            default_config_path().display()
        ),
    }

    let mut dac = SimulatedDac::new(config.playback.master_clock_hz);
    dac.configure_clock(config.engine.sample_rate);

    println!("Sample Rate: {} Hz", config.engine.sample_rate);
    println!("Capacity:    {} samples", config.engine.capacity);
    println!("Master:      {} Hz", config.playback.master_clock_hz);
    if let (Some(period), Some(achieved)) = (dac.period(), dac.achieved_rate()) {
        println!("Timer:       period {period} ({achieved} Hz achieved)");
    }
    println!();
    print!("{}", config.to_toml()?);
    println!();

    let mut help = String::new();
    write_help(&mut help)?;
    print!("{help}");

    Ok(())
}
