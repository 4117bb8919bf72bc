use clap::Parser;
use otlogging::app::{handle_fatal_error, init_logging, run_simulation_mapper, AppConfig};
use otlogging::cli::SimulationCli;

fn main() {
    let cli = SimulationCli::parse();
    let config = AppConfig::from_cli(&cli.io);
    init_logging(&config);

    if let Err(e) = run_simulation_mapper(&config) {
        handle_fatal_error(e);
    }
}
