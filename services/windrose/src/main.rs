//! Wind rose CLI.
//!
//! With no arguments, renders `data/wind_rose_input.json` to
//! `results/wind_rose_plot.png`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use renderer::BarWidthMode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use windrose::{ConfigOverrides, WindRoseConfig};

#[derive(Parser, Debug)]
#[command(name = "windrose")]
#[command(about = "Render wind direction frequencies as a polar wind rose")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "WINDROSE_CONFIG")]
    config: Option<PathBuf>,

    /// Wind statistics JSON file
    #[arg(short, long, env = "WINDROSE_INPUT")]
    input: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, env = "WINDROSE_OUTPUT")]
    output: Option<PathBuf>,

    /// Output resolution
    #[arg(long, env = "WINDROSE_DPI")]
    dpi: Option<u32>,

    /// Built-in colormap (e.g. RdYlBu_r, coolwarm)
    #[arg(long, env = "WINDROSE_COLORMAP")]
    colormap: Option<String>,

    /// JSON style file with custom color stops
    #[arg(long, env = "WINDROSE_STYLE_FILE")]
    style_file: Option<PathBuf>,

    /// Bar width mode: uniform or neighbors
    #[arg(long, env = "WINDROSE_BAR_WIDTH")]
    bar_width: Option<BarWidthMode>,

    /// Figure title
    #[arg(long, env = "WINDROSE_TITLE")]
    title: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "WINDROSE_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "WINDROSE_LOG_JSON")]
    log_json: bool,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder().with_max_level(level).with_target(false);
    if args.log_json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let overrides = ConfigOverrides {
        input: args.input,
        output: args.output,
        dpi: args.dpi,
        colormap: args.colormap,
        style_file: args.style_file,
        bar_width: args.bar_width,
        title: args.title,
    };
    let config = WindRoseConfig::resolve(args.config.as_deref(), overrides)?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        dpi = config.render.dpi,
        "Starting wind rose"
    );

    if let Err(e) = windrose::run(&config) {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
