use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::PipelineConfig;

mod config;
mod models;
mod helper_functions;
mod data_handling;
mod processing;
mod plotting;
mod figures;
mod system_info;

fn main() -> anyhow::Result<()> {
    // Setup logging and project configuration
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = PipelineConfig::from_env().context("Resolving the data directory")?;
    system_info::report(&config);

    info!("Writing figures to {}", config.output_dir().display());

    figures::plot_figure1(&config).context("Figure 1")?;
    figures::plot_figure2(&config).context("Figure 2")?;
    figures::plot_figure3(&config).context("Figure 3")?;
    figures::plot_figure4(&config).context("Figure 4")?;

    info!("All figures written");
    Ok(())
}
