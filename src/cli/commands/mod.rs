//! Command implementations for the stream data processor CLI
//!
//! Each command lives in its own module:
//! - `process`: normalize a directory of exports and write the outputs
//! - `sites`: show the site alias tables

pub mod process;
pub mod shared;
pub mod sites;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the subcommand handler
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => {
            process::run_process(process_args).await?;
        }
        Some(Commands::Sites(sites_args)) => {
            sites::run_sites(sites_args).await?;
        }
        None => return Err(Error::configuration("No command given")),
    }
    Ok(())
}
