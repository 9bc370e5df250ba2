//! rotalog CLI - validate sink configs and write events to rotated logs

use clap::Parser;
use rotalog::RotalogLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

fn main() {
    let cli = Cli::parse();

    output::set_json_mode(cli.json);

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Diagnostics of the CLI and the writers go through the installed sink
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("rotalog={}", log_level).into()),
        )
        .with(RotalogLayer::new())
        .init();

    let result = match cli.command {
        Commands::Check(args) => check::execute(args),
        Commands::Emit(args) => emit::execute(args),
    };

    if let Err(e) = result {
        output::print_error_json(&format!("{:#}", e));
        std::process::exit(1);
    }
}
