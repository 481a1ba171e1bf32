use clap::Parser;
use ttylog::Settings;
use ttylog::cli::commands::{init, presets, print, spin};
use ttylog::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    ttylog::logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Spin {
            preset,
            seconds,
            fail,
            message,
        } => {
            if !spin::run_spin(&settings, preset, seconds, fail, &message)? {
                std::process::exit(1);
            }
        }
        Commands::Print {
            level,
            threshold,
            message,
            fields,
        } => print::run_print(&settings, level, threshold, &message, &fields),
        Commands::Presets => presets::run_presets(&settings)?,
        Commands::Config => init::run_config(&settings)?,
        Commands::Init { force } => init::run_init(force)?,
    }

    Ok(())
}
