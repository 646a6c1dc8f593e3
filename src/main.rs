use anyhow::Result;
use clap::Parser;

use county_tracker::cli::{Cli, Commands};
use county_tracker::commands::{export, plot};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(filter)
        .init();

    match &cli.command {
        Commands::Plot(args) => plot::run(&cli, args),
        Commands::Export(args) => export::run(&cli, args),
    }
}
