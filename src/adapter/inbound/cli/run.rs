//! Command dispatch and exit status mapping.

use std::path::Path;

use crate::adapter::inbound::cli::command::{Cli, Commands};
use crate::adapter::inbound::cli::{output, record, schema};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::database::DeletePolicy;
use crate::infrastructure::config::settings::Config;

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_PATH: &str = "crmdb.toml";

/// Exit status for a failed command: 2 for constraint violations, 1 for
/// everything else.
#[must_use]
pub fn exit_code(err: &Error) -> u8 {
    if err.is_constraint() {
        2
    } else {
        1
    }
}

/// Resolve configuration: file, then environment, then command-line flags.
///
/// # Errors
/// Returns an error if the file cannot be loaded or the result is invalid.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::read(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Config::read(DEFAULT_CONFIG_PATH)?,
        None => Config::with_env(),
    };

    if let Some(url) = &cli.database {
        config.database.url.clone_from(url);
    }
    if let Some(level) = &cli.log_level {
        config.logging.level.clone_from(level);
    }
    if cli.json_logs {
        config.logging.format = "json".into();
    }
    config.validate()?;
    Ok(config)
}

/// Execute a parsed command.
///
/// # Errors
/// Returns the command's error; see [`exit_code`] for how it maps to the
/// process status.
pub fn execute(command: &Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Schema(args) => schema::execute(args.table),
        Commands::Migrate => {
            bootstrap::open_store(&config.database)?;
            output::success("schema is up to date");
            output::field("Database", output::highlight(&config.database.url));
            Ok(())
        }
        Commands::Delete(args) => {
            let mut database = config.database.clone();
            if args.cascade {
                database.on_delete = DeletePolicy::Cascade;
            }
            let store = bootstrap::open_store(&database)?;
            record::delete(&store, args)
        }
        Commands::Insert(args) => record::insert(&bootstrap::open_store(&config.database)?, args),
        Commands::Get(args) => record::get(&bootstrap::open_store(&config.database)?, args),
        Commands::List(args) => record::list(&bootstrap::open_store(&config.database)?, args),
        Commands::Update(args) => record::update(&bootstrap::open_store(&config.database)?, args),
        Commands::Link(args) => record::link(&bootstrap::open_store(&config.database)?, args),
    }
}

/// Print an error with a hint where one helps.
pub fn report(err: &Error) {
    output::error(&err.to_string());
    match err {
        Error::Constraint(_) => {
            output::error_hint("the database was left unchanged");
        }
        Error::Json(_) => {
            output::error_hint(&format!(
                "pass column values as a JSON object; see {}",
                output::highlight("crmdb schema <table>")
            ));
        }
        _ => {}
    }
}
