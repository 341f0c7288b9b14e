//! Configuration loader for the wind rose tool.
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line/environment overrides. The YAML file supports environment
//! variable substitution using `${VAR}` and `${VAR:-default}` syntax.

use anyhow::{Context, Result};
use renderer::{BarWidthMode, RenderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the wind statistics record.
pub const DEFAULT_INPUT_PATH: &str = "data/wind_rose_input.json";

/// Default location of the rendered figure.
pub const DEFAULT_OUTPUT_PATH: &str = "results/wind_rose_plot.png";

// ============================================================================
// Configuration types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindRoseConfig {
    /// JSON wind statistics file
    pub input: PathBuf,
    /// PNG output path; parent directories are created on save
    pub output: PathBuf,
    pub render: RenderOptions,
}

impl Default for WindRoseConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            render: RenderOptions::default(),
        }
    }
}

/// Values supplied on the command line or through the environment.
/// Anything left as `None` keeps the lower layer's value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub colormap: Option<String>,
    pub style_file: Option<PathBuf>,
    pub bar_width: Option<BarWidthMode>,
    pub title: Option<String>,
}

impl WindRoseConfig {
    /// Apply command-line overrides on top of this configuration.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output) = overrides.output {
            self.output = output;
        }
        if let Some(dpi) = overrides.dpi {
            self.render.dpi = dpi;
        }
        if let Some(colormap) = overrides.colormap {
            self.render.colormap = colormap;
        }
        if let Some(style_file) = overrides.style_file {
            self.render.style_file = Some(style_file);
        }
        if let Some(bar_width) = overrides.bar_width {
            self.render.bar_width = bar_width;
        }
        if let Some(title) = overrides.title {
            self.render.title = title;
        }
    }

    /// Resolve the full configuration: YAML file if given, then overrides,
    /// then validation.
    pub fn resolve(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => load_config(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        validate_config(&config)?;
        Ok(config)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and parse a YAML configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WindRoseConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config from {:?}", path.as_ref()))?;

    debug!(path = %path.as_ref().display(), "Loaded configuration file");
    Ok(config)
}

/// Parse YAML configuration text after environment substitution.
pub fn parse_config(content: &str) -> Result<WindRoseConfig> {
    let expanded = expand_env_vars(content)?;
    let config: WindRoseConfig =
        serde_yaml::from_str(&expanded).context("Invalid wind rose config YAML")?;
    Ok(config)
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in the format ${VAR} or ${VAR:-default}
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::new();
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut var_expr = String::new();
            let mut brace_count = 1;

            while brace_count > 0 {
                match chars.next() {
                    Some('{') => {
                        brace_count += 1;
                        var_expr.push('{');
                    }
                    Some('}') => {
                        brace_count -= 1;
                        if brace_count > 0 {
                            var_expr.push('}');
                        }
                    }
                    Some(c) => var_expr.push(c),
                    None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
                }
            }

            result.push_str(&resolve_var_expr(&var_expr)?);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}

// ============================================================================
// Validation
// ============================================================================

pub fn validate_config(config: &WindRoseConfig) -> Result<()> {
    anyhow::ensure!(
        !config.input.as_os_str().is_empty(),
        "Input path cannot be empty"
    );
    anyhow::ensure!(
        !config.output.as_os_str().is_empty(),
        "Output path cannot be empty"
    );
    config
        .render
        .validate()
        .context("Invalid render settings")?;

    Ok(())
}
