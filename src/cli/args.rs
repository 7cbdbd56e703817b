use clap::Parser;

/// Input and output locations are fixed; the flags only control logging.
#[derive(Parser, Debug)]
#[command(name = "chirps-extractor")]
#[command(about = "Extract daily CHIRPS rainfall at station locations into one CSV")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Only log errors and hide the progress bar"
    )]
    pub quiet: bool,
}
