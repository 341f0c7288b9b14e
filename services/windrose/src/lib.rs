//! Wind rose plotting tool.
//!
//! Loads a wind statistics record, renders it as a polar bar chart and saves
//! the figure as a PNG.

pub mod config;

pub use config::{ConfigOverrides, WindRoseConfig};

use anyhow::{Context, Result};
use renderer::Figure;
use tracing::info;
use windrose_common::WindInput;

/// Render `input` with `config.render` and save it to `config.output`.
pub fn plot_wind_rose(input: &WindInput, config: &WindRoseConfig) -> Result<Figure> {
    info!(
        directions = input.len(),
        output = %config.output.display(),
        "Rendering wind rose"
    );

    let figure = renderer::render(input, &config.render).context("Failed to render wind rose")?;
    figure
        .save(&config.output)
        .with_context(|| format!("Failed to save wind rose to {:?}", config.output))?;

    info!("Wind rose plot saved to {}", config.output.display());
    for line in figure.layout().summary.lines() {
        info!("{}", line);
    }

    Ok(figure)
}

/// Load the configured input file, then render and save it.
pub fn run(config: &WindRoseConfig) -> Result<Figure> {
    let input = windrose_common::load(&config.input)
        .with_context(|| format!("Failed to load wind data from {:?}", config.input))?;
    plot_wind_rose(&input, config)
}

/// Render the default input file to the default output path.
pub fn run_default() -> Result<Figure> {
    run(&WindRoseConfig::default())
}
