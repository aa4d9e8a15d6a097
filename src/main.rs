use std::process::ExitCode;

use clap::Parser;
use crmdb::adapter::inbound::cli::command::Cli;
use crmdb::adapter::inbound::cli::run;
use tracing::{debug, warn};

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.color.apply();

    let config = match run::load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            run::report(&e);
            return ExitCode::from(run::exit_code(&e));
        }
    };

    config.init_logging();
    debug!(command = ?cli.command, "crmdb starting");

    match run::execute(&cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!(error = %e, "command failed");
            run::report(&e);
            ExitCode::from(run::exit_code(&e))
        }
    }
}
