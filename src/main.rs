use chirps_extractor::cli::{run, Cli};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Fatal errors are reported, not signalled through the exit status
    if let Err(e) = run(cli) {
        eprintln!("A critical error occurred: {:#}", e);
    }
}
