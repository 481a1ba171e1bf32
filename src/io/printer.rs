//! Level-gated front end for key-value output.
//!
//! A [`Printer`] holds a minimum [`Severity`] fixed at construction. Each of
//! `debug`/`info`/`warn`/`error` prints only when its severity is at or above
//! that threshold, then hands the message and fields to the [`KvFormatter`].
//!
//! ```no_run
//! use ttylog::io::{Printer, Severity};
//!
//! let printer = Printer::new(Severity::Info);
//! printer.debug("hidden", &["key", "value"]);
//! printer.info("status", &["key", "value", "key2", "value2"]);
//! ```

use super::kv::{KvFormatter, Layout};
use super::level::Severity;
use crate::config::Settings;
use crate::error::TuiError;
use crate::terminal::SizeProbe;
use parking_lot::Mutex;
use std::io::{Stdout, Write};

/// Synchronous, unbuffered key-value printer with a fixed level threshold.
pub struct Printer<W: Write = Stdout> {
    threshold: Severity,
    formatter: KvFormatter,
    sink: Mutex<W>,
}

impl Printer<Stdout> {
    /// Printer on standard output with the default layout.
    pub fn new(threshold: Severity) -> Self {
        Self::with_sink(threshold, std::io::stdout())
    }

    /// Printer on standard output configured from [`Settings`].
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.printer.level).with_layout(settings.printer.layout())
    }
}

impl<W: Write> Printer<W> {
    pub fn with_sink(threshold: Severity, sink: W) -> Self {
        Self {
            threshold,
            formatter: KvFormatter::default(),
            sink: Mutex::new(sink),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.formatter = KvFormatter::new(layout);
        self
    }

    /// Replace the terminal size source, e.g. to simulate piped output.
    pub fn with_probe(mut self, probe: impl SizeProbe + 'static) -> Self {
        self.formatter = self.formatter.with_probe(probe);
        self
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    pub fn debug<S: AsRef<str>>(&self, message: &str, fields: &[S]) {
        self.print(Severity::Debug, message, fields);
    }

    pub fn info<S: AsRef<str>>(&self, message: &str, fields: &[S]) {
        self.print(Severity::Info, message, fields);
    }

    pub fn warn<S: AsRef<str>>(&self, message: &str, fields: &[S]) {
        self.print(Severity::Warn, message, fields);
    }

    pub fn error<S: AsRef<str>>(&self, message: &str, fields: &[S]) {
        self.print(Severity::Error, message, fields);
    }

    /// Print at an explicit severity. Malformed fields and write errors are
    /// reported through `tracing` and never reach the caller.
    pub fn print<S: AsRef<str>>(&self, severity: Severity, message: &str, fields: &[S]) {
        if !self.enabled(severity) {
            return;
        }
        let mut sink = self.sink.lock();
        let result = self
            .formatter
            .render(&mut *sink, message, severity.icon(), fields)
            .and_then(|()| sink.flush().map_err(TuiError::from));
        match result {
            Ok(()) => {}
            Err(e @ TuiError::MalformedFields { .. }) => {
                tracing::debug!(%severity, msg = message, "skipped table: {e}");
            }
            Err(e) => {
                tracing::warn!(%severity, msg = message, "failed to print fields: {e}");
            }
        }
    }

    /// Unwrap the sink, e.g. to inspect captured output.
    pub fn into_sink(self) -> W {
        self.sink.into_inner()
    }
}
