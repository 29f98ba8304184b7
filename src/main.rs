use anyhow::Context;
use clap::Parser;
use streamdata_processor::Error;
use streamdata_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

    runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result.map_err(anyhow::Error::from),
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => {
                    eprintln!("\nReceived CTRL+C, shutting down...");
                    Err(anyhow::Error::from(Error::processing_interrupted(
                        "Processing interrupted by user",
                    )))
                }
                Err(e) => Err(anyhow::Error::from(e).context("Failed to listen for CTRL+C")),
            },
        }
    })?;

    Ok(())
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Stream Data Processor - Field Instrument Export Consolidator");
    println!("============================================================");
    println!();
    println!("Normalize multi-parameter logger workbooks and temperature logger CSVs");
    println!("into one summary table with daily per-site medians.");
    println!();
    println!("USAGE:");
    println!("    streamdata-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Process a directory of instrument exports (main command)");
    println!("    sites       Show the site alias tables in effect");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Process logger workbooks and write the regulator export:");
    println!("    streamdata-processor process -i ./field -o ./out --regulatory-export");
    println!();
    println!("    # Process temperature exports and report as JSON:");
    println!("    streamdata-processor process -i ./temps --mode temperature --output-format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    streamdata-processor <COMMAND> --help");
}
