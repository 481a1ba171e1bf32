//! Structured diagnostics on stderr.
//!
//! Terminal output (spinners, key-value rows) goes to stdout. Everything the
//! library has to say about itself, such as malformed fields or failed writes,
//! goes through `tracing` to stderr so the two streams never interleave.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"   # quiet by default
//! add_source = true  # file:line of the call site
//!
//! [logging.modules]
//! "ttylog::io" = "debug"
//! ```
//!
//! # Environment Variable
//!
//! `RUST_LOG` takes precedence over config:
//! ```bash
//! RUST_LOG=debug ttylog spin
//! RUST_LOG=ttylog::io::printer=trace ttylog print hello key value
//! ```

use is_terminal::IsTerminal;
use std::sync::Once;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// ISO-8601 in UTC with milliseconds, e.g. `2024-05-01T09:30:00.125Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

struct Iso8601;

impl FormatTime for Iso8601 {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Utc::now().format(TIMESTAMP_FORMAT))
    }
}

/// Filter directives for `config`: the default level, then one `module=level` per override.
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = config.default.clone();
    for (module, level) in &config.modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

/// Initialize logging with configuration.
///
/// Only the first call takes effect. `RUST_LOG` wins over `config` when set.
/// Colors are enabled only when stderr is a terminal.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(true)
            .with_timer(Iso8601)
            .with_level(true)
            .with_file(config.add_source)
            .with_line_number(config.add_source)
            .with_filter(filter);

        // try_init: a host application may already own the global subscriber
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

/// Initialize logging with `LoggingConfig::default()` (level `warn`).
pub fn init() {
    init_with_config(&LoggingConfig::default());
}
