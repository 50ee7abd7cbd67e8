use adif_csv::cli::{args::ProfileArgs, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = ProfileArgs::parse();
    commands::setup_logging(args.get_log_level(), args.quiet);

    if let Err(error) = commands::run_profile(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
