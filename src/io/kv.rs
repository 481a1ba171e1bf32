//! Key-value rows laid out within the terminal width.
//!
//! Every call prints a header line followed by one row group per pair:
//!
//! ```text
//! 14:02:11 🟢 status
//!             | key  | value  |
//!             | key2 | value2 |
//!             | trace |
//! first line of a long value
//! second line of a long value
//! ```
//!
//! Short values share an aligned grid. A value that would push its row past the
//! terminal width (or that spans several lines) falls through to an overflow
//! group: the key on its own bordered line, then the value verbatim below it.
//! The value column is as wide as the widest value that still fits; values that
//! overflow do not widen it.

use crate::error::{TuiError, TuiResult};
use crate::terminal::{DEFAULT_WIDTH, SizeProbe, StdoutProbe};
use console::{Alignment, measure_text_width, pad_str};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::Arc;

/// Spaces before every row.
pub const DEFAULT_INDENT: usize = 12;

/// Header timestamp, local time with seconds.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One key with its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
}

impl KvEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Pair up `[k1, v1, k2, v2, ...]`. An odd count is [`TuiError::MalformedFields`].
    pub fn parse_flat<S: AsRef<str>>(fields: &[S]) -> TuiResult<Vec<KvEntry>> {
        if fields.len() % 2 != 0 {
            return Err(TuiError::MalformedFields {
                count: fields.len(),
            });
        }
        Ok(fields
            .chunks_exact(2)
            .map(|pair| KvEntry::new(pair[0].as_ref(), pair[1].as_ref()))
            .collect())
    }
}

/// Indent and fallback width used for every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub indent: usize,
    pub fallback_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            fallback_width: DEFAULT_WIDTH,
        }
    }
}

/// How a single entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Aligned { key: &'a str, value: &'a str },
    Overflow { key: &'a str, value: &'a str },
}

/// Column widths for one render call. Never cached between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPlan {
    pub key_width: usize,
    pub value_width: usize,
    pub terminal_width: usize,
    pub indent: usize,
}

impl RenderPlan {
    pub fn compute(entries: &[KvEntry], indent: usize, terminal_width: usize) -> Self {
        let key_width = entries
            .iter()
            .map(|entry| measure_text_width(entry.key.trim()))
            .max()
            .unwrap_or(0);

        let mut plan = Self {
            key_width,
            value_width: 0,
            terminal_width,
            indent,
        };
        let value_width = entries
            .iter()
            .map(|entry| entry.value.trim())
            .filter(|value| plan.fits(value))
            .map(measure_text_width)
            .max()
            .unwrap_or(0);
        plan.value_width = value_width;
        plan
    }

    /// Whether a trimmed value can share the aligned grid.
    pub fn fits(&self, value: &str) -> bool {
        !value.contains('\n')
            && self.indent + self.key_width + measure_text_width(value) <= self.terminal_width
    }

    pub fn row<'a>(&self, entry: &'a KvEntry) -> Row<'a> {
        let key = entry.key.trim();
        let value = entry.value.trim();
        if self.fits(value) {
            Row::Aligned { key, value }
        } else {
            Row::Overflow { key, value }
        }
    }

    pub fn write_row<W: Write + ?Sized>(&self, out: &mut W, entry: &KvEntry) -> io::Result<()> {
        let indent = self.indent;
        match self.row(entry) {
            Row::Aligned { key, value } => writeln!(
                out,
                "{:indent$}| {} | {} |",
                "",
                pad_str(key, self.key_width, Alignment::Left, None),
                pad_str(value, self.value_width, Alignment::Left, None),
            ),
            Row::Overflow { key, value } => writeln!(
                out,
                "{:indent$}| {} |\n{value}",
                "",
                pad_str(key, self.key_width, Alignment::Left, None),
            ),
        }
    }
}

/// Renders headers and key-value rows, asking a [`SizeProbe`] for the width on every call.
#[derive(Clone)]
pub struct KvFormatter {
    layout: Layout,
    probe: Arc<dyn SizeProbe>,
}

impl KvFormatter {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            probe: Arc::new(StdoutProbe),
        }
    }

    pub fn with_probe(mut self, probe: impl SizeProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn plan(&self, entries: &[KvEntry]) -> RenderPlan {
        let width = self.probe.width_or(self.layout.fallback_width);
        RenderPlan::compute(entries, self.layout.indent, width)
    }

    /// Parse a flat field list and render it.
    ///
    /// Odd-length input writes a single diagnostic line instead of the table and
    /// returns [`TuiError::MalformedFields`].
    pub fn render<W: Write + ?Sized, S: AsRef<str>>(
        &self,
        out: &mut W,
        message: &str,
        icon: &str,
        fields: &[S],
    ) -> TuiResult<()> {
        let entries = match KvEntry::parse_flat(fields) {
            Ok(entries) => entries,
            Err(e) => {
                writeln!(out, "tui print failed: {e}")?;
                return Err(e);
            }
        };
        self.render_entries(out, message, icon, &entries)?;
        Ok(())
    }

    pub fn render_entries<W: Write + ?Sized>(
        &self,
        out: &mut W,
        message: &str,
        icon: &str,
        entries: &[KvEntry],
    ) -> io::Result<()> {
        let now = chrono::Local::now().format(TIME_FORMAT);
        writeln!(out, "{now} {icon} {message}")?;

        let plan = self.plan(entries);
        for entry in entries {
            plan.write_row(out, entry)?;
        }
        Ok(())
    }
}

impl Default for KvFormatter {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}
