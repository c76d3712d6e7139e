use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use approach_spacing::calculate::Calculate;
use approach_spacing::generate::ScenarioGenerator;
use approach_spacing::resolve::Handoff;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct ApspTools {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a random scenario
    Generate(ScenarioGenerator),
    /// Print the required spacing of every sequenced aircraft
    Calculate(Calculate),
    /// Print the departure frequency of every departing aircraft
    Handoff(Handoff),
}

fn main() -> ExitCode {
    // use RUST_LOG to set max level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = ApspTools::parse();
    let result = match cli.command {
        Command::Generate(mut generate) => generate.generate(),
        Command::Calculate(calculate) => calculate.calculate(),
        Command::Handoff(handoff) => handoff.resolve(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
