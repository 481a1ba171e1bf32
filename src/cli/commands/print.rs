//! Print command.

use crate::config::Settings;
use crate::io::{Printer, Severity};

/// Print `message` with `fields` at `level`, gated by `threshold` or the configured level.
pub fn run_print(
    settings: &Settings,
    level: Option<Severity>,
    threshold: Option<Severity>,
    message: &str,
    fields: &[String],
) {
    let printer = match threshold {
        Some(threshold) => Printer::new(threshold).with_layout(settings.printer.layout()),
        None => Printer::from_settings(settings),
    };
    let severity = level.unwrap_or_default();
    tracing::debug!(%severity, threshold = %printer.threshold(), "print");
    printer.print(severity, message, fields);
}
