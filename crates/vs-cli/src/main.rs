//! vs - vidshare session CLI
//!
//! Signs in against the vidshare backend, keeps the session between runs and
//! answers access questions the way the web client's route guards do.
//!
//! # Examples
//!
//! ```bash
//! # Sign in (the session is saved under the config directory)
//! vs login alice --password secret
//!
//! # Who is signed in?
//! vs whoami --pretty
//!
//! # May the current session open the admin panel?
//! vs guard /admin --role admin
//!
//! # Fetch a resource with the session's token
//! vs get /videos/
//! ```

use vs_cli::{App, Cli, CliResult, Outcome, logger};

use std::process::ExitCode;

use clap::Parser;
use log::error;
use vs_config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let pretty = cli.pretty;

    match run(cli).await {
        Ok(outcome) => {
            if let Outcome::SessionEnded(_) = outcome {
                eprintln!("Your session has expired. Please sign in again.");
            }

            match outcome.render(pretty) {
                Ok(json) => {
                    println!("{}", json);
                    outcome.exit_code()
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<Outcome> {
    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.api.base_url = server;
    }
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    let app = App::from_config(&config)?;
    app.initialize();
    app.run(cli.command).await
}
