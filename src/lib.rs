//! Terminal output helpers: spinners resolved by a cancellation cause, and a
//! level-gated printer that lays key-value pairs out within the terminal width.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod terminal;

pub use config::Settings;
pub use error::{TuiError, TuiResult};
pub use io::{Cause, KvEntry, KvFormatter, Layout, Preset, Printer, Severity, SpinnerHandle};
pub use terminal::{FixedSize, SizeProbe, StdoutProbe};
