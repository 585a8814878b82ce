use anyhow::Context;
use clap::Parser;
use ems_converter::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();
    let input = args.input_file.clone();

    let result = commands::run(args)
        .with_context(|| format!("Failed to convert {}", input.display()));

    match result {
        Ok(_outcome) => {
            // Summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
