use clap::Parser;
use otlogging::app::{handle_fatal_error, init_logging, run_log_parser, AppConfig};
use otlogging::cli::ParseLogCli;

fn main() {
    let cli = ParseLogCli::parse();
    let config = AppConfig::from_cli(&cli.io);
    init_logging(&config);

    if let Err(e) = run_log_parser(&config) {
        handle_fatal_error(e);
    }
}
