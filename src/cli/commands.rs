use crate::cli::args::Cli;
use crate::config::ExtractionConfig;
use crate::processors::run_extraction;
use crate::utils::logging::init_logging;
use anyhow::{Context, Result};
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet);

    let config = ExtractionConfig::default().with_progress(!cli.quiet);
    run_with_config(&config)
}

/// Run one extraction and print the completion line.
pub fn run_with_config(config: &ExtractionConfig) -> Result<()> {
    let report = run_extraction(config).with_context(|| {
        format!(
            "extracting '{}' for stations in {} from {}",
            config.variable,
            config.stations_file.display(),
            config.grid_dir.display()
        )
    })?;

    info!("\n{}", report.generate_summary());
    println!(
        "Data extraction complete. Results saved to {}",
        config.output_file.display()
    );

    Ok(())
}
