//! Terminal output: spinners, key-value rows, and tables.
//!
//! This module provides:
//! - [`spinner`]: animated progress indicator resolved by a cancellation cause
//! - [`kv`]: width-aware key-value layout
//! - [`printer`]: level-gated front end over [`kv`]
//! - [`table`]: tables for records with declared columns

pub mod kv;
pub mod level;
pub mod printer;
pub mod sink;
pub mod spinner;
pub mod table;

pub use kv::{KvEntry, KvFormatter, Layout, RenderPlan, Row};
pub use level::Severity;
pub use printer::Printer;
pub use sink::SharedBuffer;
pub use spinner::{Cause, Preset, Spinner, SpinnerHandle, SpinnerSpec};
pub use table::{Tabular, render_table};
