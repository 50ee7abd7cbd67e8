use adif_csv::cli::{args::ConvertArgs, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = ConvertArgs::parse();
    commands::setup_logging(args.get_log_level(), args.quiet);

    match commands::run_convert(&args) {
        Ok(_stats) => {
            // Summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
