//! CLI argument parsing using clap.

use crate::io::{Preset, Severity};
use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Spinners and key-value rows for the terminal
#[derive(Parser, Debug)]
#[command(
    name = "ttylog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Spinners and width-aware key-value output for the terminal",
    next_line_help = true,
    styles = clap_cargo_style(),
    after_help = "Examples:\n  ttylog spin --preset monkeys --seconds 3\n  ttylog spin --fail \"disk full\"\n  ttylog print --level warn \"cache cold\" hits 0 misses 12\n  ttylog presets"
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Animate a spinner, then resolve it
    #[command(about = "Run a spinner for a while and report done or failed")]
    Spin {
        /// Animation to use (overrides config)
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// How long to spin before resolving
        #[arg(short, long, default_value_t = 2.0)]
        seconds: f64,

        /// Resolve as failed with this reason instead of done
        #[arg(long, value_name = "REASON")]
        fail: Option<String>,

        /// Text shown next to the animation
        #[arg(short, long, default_value = "working")]
        message: String,
    },

    /// Print a header and key-value rows
    #[command(
        about = "Print a message with key-value fields",
        after_help = "FIELDS alternate key and value: KEY VALUE [KEY VALUE]..."
    )]
    Print {
        /// Severity of this message (overrides config)
        #[arg(short, long, value_enum)]
        level: Option<Severity>,

        /// Threshold below which nothing is printed (overrides config)
        #[arg(short, long, value_enum)]
        threshold: Option<Severity>,

        /// Header text
        message: String,

        /// Alternating keys and values
        #[arg(value_name = "FIELDS", trailing_var_arg = true, allow_hyphen_values = true)]
        fields: Vec<String>,
    },

    /// List the built-in spinner animations
    #[command(about = "Show built-in spinner presets")]
    Presets,

    /// Show current configuration settings
    #[command(about = "Display active settings from .ttylog/settings.toml")]
    Config,

    /// Initialize project
    #[command(about = "Create .ttylog/settings.toml with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
