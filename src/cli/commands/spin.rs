//! Spin command.

use crate::config::Settings;
use crate::io::{Preset, spinner};
use anyhow::Context;
use std::time::Duration;

/// Spin for `seconds`, then resolve. Returns `false` when resolved as failed.
pub fn run_spin(
    settings: &Settings,
    preset: Option<Preset>,
    seconds: f64,
    fail: Option<String>,
    message: &str,
) -> anyhow::Result<bool> {
    let duration = Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("invalid duration: {seconds} seconds"))?;
    let preset = preset.unwrap_or(settings.spinner.preset);

    let handle = spinner::start(message, preset.spec());
    std::thread::sleep(duration);

    let succeeded = match fail {
        Some(reason) => {
            handle.fail(reason);
            false
        }
        None => {
            handle.succeed();
            true
        }
    };
    handle.wait();
    Ok(succeeded)
}
