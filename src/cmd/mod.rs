//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`routes`]. Each handler lives in its
//! own submodule.

pub mod routes;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::CitydevsError;

pub async fn dispatch(cli: Cli) -> Result<(), CitydevsError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Routes) => routes::execute(),
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  citydevs v{version} \u{2014} local developer directory\n\n  \
         No command provided. To get started:\n\n    \
         citydevs run                 Start the server on port 3000\n    \
         citydevs routes              Print the assembled route table\n    \
         citydevs --help              See all commands and options\n"
    );
}
