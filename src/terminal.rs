//! Terminal size detection.
//!
//! Layout code never talks to the terminal directly. It asks a [`SizeProbe`],
//! which is either the real standard output ([`StdoutProbe`]) or a fixed answer
//! ([`FixedSize`]) for redirected output and tests.

use crate::error::{TuiError, TuiResult};

/// Width used whenever no terminal is attached (CI, pipes, files).
pub const DEFAULT_WIDTH: usize = 80;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: usize,
    pub height: usize,
}

/// Answers "how large is the terminal right now".
pub trait SizeProbe: Send + Sync {
    fn size(&self) -> TuiResult<TermSize>;

    /// Current width, or `fallback` when there is no terminal.
    fn width_or(&self, fallback: usize) -> usize {
        match self.size() {
            Ok(size) => size.width,
            Err(e) => {
                tracing::trace!("terminal width unavailable ({e}), using {fallback}");
                fallback
            }
        }
    }
}

/// Queries the terminal behind standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutProbe;

impl SizeProbe for StdoutProbe {
    fn size(&self) -> TuiResult<TermSize> {
        // console reports (rows, columns)
        match console::Term::stdout().size_checked() {
            Some((rows, cols)) if cols > 0 => Ok(TermSize {
                width: cols as usize,
                height: rows as usize,
            }),
            _ => Err(TuiError::TerminalUnavailable),
        }
    }
}

/// A probe with a predetermined answer. `FixedSize(None)` simulates piped output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSize(pub Option<TermSize>);

impl FixedSize {
    pub fn width(width: usize) -> Self {
        Self(Some(TermSize { width, height: 24 }))
    }

    pub fn detached() -> Self {
        Self(None)
    }
}

impl SizeProbe for FixedSize {
    fn size(&self) -> TuiResult<TermSize> {
        match self.0 {
            Some(size) if size.width > 0 => Ok(size),
            _ => Err(TuiError::TerminalUnavailable),
        }
    }
}

/// Size of the terminal attached to standard output.
pub fn size() -> TuiResult<TermSize> {
    StdoutProbe.size()
}

/// Whether standard output is an interactive terminal.
pub fn stdout_is_terminal() -> bool {
    is_terminal::is_terminal(std::io::stdout())
}
