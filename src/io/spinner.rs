//! Animated spinner that runs beside a long operation.
//!
//! A spinner is started with a message and a [`SpinnerSpec`], animates on its own
//! thread, and resolves to exactly one final line once the caller attaches a
//! [`Cause`]:
//!
//! ```text
//! 🟢 reticulating splines ... done!
//! ❌ dismantling capitalism ... failed: too entrenched
//! ```
//!
//! ```no_run
//! use ttylog::io::spinner::{self, Preset};
//!
//! let handle = spinner::start("fetching index", Preset::Runner.spec());
//! let result: Result<(), std::io::Error> = Ok(());
//! handle.finish(&result);
//! handle.wait();
//! ```
//!
//! ## Cancellation
//! The cause lives in a single-assignment cell. The first `cancel` wins, later
//! calls are ignored and report `false`. The animation thread polls the cell
//! before every frame, so the final line appears at most one frame interval
//! after cancellation. [`SpinnerHandle::wait`] returns only after the final line
//! has been written and flushed.

use super::level::{ICON_ERROR, ICON_INFO};
use crate::error::{TuiError, TuiResult};
use crate::terminal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::io::Write;
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const ERASE_LINE: &str = "\x1b[2K";
const CURSOR_LEFT: &str = "\r";

/// Immutable animation descriptor: glyphs shown in order, each for `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinnerSpec {
    frames: &'static [&'static str],
    interval: Duration,
}

impl SpinnerSpec {
    /// Build a custom spec. Frames must be non-empty and the interval non-zero.
    pub fn new(frames: &'static [&'static str], interval: Duration) -> TuiResult<Self> {
        if frames.is_empty() {
            return Err(TuiError::InvalidSpinner {
                reason: "at least one frame is required".to_string(),
            });
        }
        if interval.is_zero() {
            return Err(TuiError::InvalidSpinner {
                reason: "frame interval must be greater than zero".to_string(),
            });
        }
        Ok(Self { frames, interval })
    }

    const fn preset(frames: &'static [&'static str], millis: u64) -> Self {
        Self {
            frames,
            interval: Duration::from_millis(millis),
        }
    }

    pub fn frames(&self) -> &'static [&'static str] {
        self.frames
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

pub const HOURGLASS: SpinnerSpec = SpinnerSpec::preset(&["⏳", "⌛"], 500);
pub const DOTS: SpinnerSpec = SpinnerSpec::preset(
    &["⠴", "⠦", "⠧", "⠇", "⠏", "⠋", "⠙", "⠹", "⠸", "⠼"],
    100,
);
pub const PULSE: SpinnerSpec = SpinnerSpec::preset(&["⬫", "⬨", "◊", "⬨"], 200);
pub const RUNNER: SpinnerSpec = SpinnerSpec::preset(&["🏃", "🚶"], 200);
pub const LOCKING: SpinnerSpec = SpinnerSpec::preset(&["🔓", "🔓", "🔓", "🔓", "🔒"], 200);
pub const UNLOCKING: SpinnerSpec = SpinnerSpec::preset(&["🔒", "🔒", "🔒", "🔒", "🔓"], 200);
pub const MONKEYS: SpinnerSpec = SpinnerSpec::preset(&["🙉", "🙈", "🙊"], 500);

/// Named spinner presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Hourglass,
    #[default]
    Dots,
    Pulse,
    Runner,
    Locking,
    Unlocking,
    Monkeys,
}

impl Preset {
    pub const ALL: [Preset; 7] = [
        Preset::Hourglass,
        Preset::Dots,
        Preset::Pulse,
        Preset::Runner,
        Preset::Locking,
        Preset::Unlocking,
        Preset::Monkeys,
    ];

    pub fn spec(self) -> SpinnerSpec {
        match self {
            Preset::Hourglass => HOURGLASS,
            Preset::Dots => DOTS,
            Preset::Pulse => PULSE,
            Preset::Runner => RUNNER,
            Preset::Locking => LOCKING,
            Preset::Unlocking => UNLOCKING,
            Preset::Monkeys => MONKEYS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Hourglass => "hourglass",
            Preset::Dots => "dots",
            Preset::Pulse => "pulse",
            Preset::Runner => "runner",
            Preset::Locking => "locking",
            Preset::Unlocking => "unlocking",
            Preset::Monkeys => "monkeys",
        }
    }
}

/// Why a spinner stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// The operation completed normally.
    Done,
    /// The operation failed; the text is shown verbatim.
    Failed(String),
}

impl Cause {
    pub fn failed(reason: impl Display) -> Self {
        Cause::Failed(reason.to_string())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Cause::Failed(_))
    }

    fn final_line(&self, message: &str) -> String {
        match self {
            Cause::Done => format!("{ICON_INFO} {message} ... done!"),
            Cause::Failed(reason) => format!("{ICON_ERROR} {message} ... failed: {reason}"),
        }
    }
}

impl<T, E: Display> From<&Result<T, E>> for Cause {
    fn from(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Cause::Done,
            Err(e) => Cause::failed(e),
        }
    }
}

/// A spinner that has not been started yet.
pub struct Spinner {
    message: String,
    spec: SpinnerSpec,
    sink: Box<dyn Write + Send>,
    ansi: bool,
}

impl Spinner {
    /// Spinner writing to standard output, with cursor control when it is a terminal.
    pub fn new(message: impl Into<String>, spec: SpinnerSpec) -> Self {
        Self {
            message: message.into(),
            spec,
            sink: Box::new(std::io::stdout()),
            ansi: terminal::stdout_is_terminal(),
        }
    }

    /// Redirect output. Disables ANSI cursor control unless re-enabled with [`Spinner::with_ansi`].
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self.ansi = false;
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Start animating on a dedicated thread. Returns immediately.
    pub fn start(self) -> SpinnerHandle {
        let cause = Arc::new(OnceLock::new());
        let cause_ref = Arc::clone(&cause);
        tracing::debug!(message = %self.message, "spinner started");
        let worker = thread::spawn(move || self.run(&cause_ref));
        SpinnerHandle {
            cause,
            worker: Some(worker),
        }
    }

    fn run(self, cause: &OnceLock<Cause>) {
        let Spinner {
            message,
            spec,
            mut sink,
            ansi,
        } = self;
        let erase = if ansi { ERASE_LINE } else { "" };

        if ansi {
            emit(sink.as_mut(), format_args!("{CURSOR_HIDE}"));
        }
        for frame in spec.frames.iter().cycle() {
            if let Some(cause) = cause.get() {
                let line = cause.final_line(&message);
                emit(sink.as_mut(), format_args!("{CURSOR_LEFT}{erase}{line}\n"));
                if ansi {
                    emit(sink.as_mut(), format_args!("{CURSOR_SHOW}"));
                }
                tracing::debug!(message = %message, failed = cause.is_failure(), "spinner finished");
                return;
            }
            emit(
                sink.as_mut(),
                format_args!("{CURSOR_LEFT}{erase}{frame} {message} ... "),
            );
            thread::sleep(spec.interval);
        }
    }
}

fn emit(sink: &mut dyn Write, args: fmt::Arguments<'_>) {
    fn write_all(sink: &mut dyn Write, args: fmt::Arguments<'_>) -> std::io::Result<()> {
        sink.write_fmt(args)?;
        sink.flush()
    }
    if let Err(e) = write_all(sink, args) {
        tracing::debug!("spinner write failed: {e}");
    }
}

/// Start a spinner on standard output.
pub fn start(message: impl Into<String>, spec: SpinnerSpec) -> SpinnerHandle {
    Spinner::new(message, spec).start()
}

/// Caller-side control of a running spinner.
///
/// Dropping a handle that was never cancelled finishes the spinner with
/// [`Cause::Done`] and waits for its final line.
pub struct SpinnerHandle {
    cause: Arc<OnceLock<Cause>>,
    worker: Option<JoinHandle<()>>,
}

impl SpinnerHandle {
    /// Attach the stop cause. Returns `false` if a cause was already attached.
    pub fn cancel(&self, cause: Cause) -> bool {
        match self.cause.set(cause) {
            Ok(()) => true,
            Err(ignored) => {
                tracing::trace!(?ignored, "spinner already cancelled");
                false
            }
        }
    }

    pub fn succeed(&self) -> bool {
        self.cancel(Cause::Done)
    }

    pub fn fail(&self, reason: impl Display) -> bool {
        self.cancel(Cause::failed(reason))
    }

    /// Stop with the outcome of an operation: `Ok` is done, `Err` is failed.
    pub fn finish<T, E: Display>(&self, result: &Result<T, E>) -> bool {
        self.cancel(Cause::from(result))
    }

    /// The attached cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.get()
    }

    /// True once the final line has been written.
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().is_none_or(|worker| worker.is_finished())
    }

    /// Block until the final line is written.
    ///
    /// Nothing else can cancel a consumed handle, so a spinner without a cause
    /// is finished with [`Cause::Done`] first.
    pub fn wait(mut self) {
        self.cancel(Cause::Done);
        self.join();
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("spinner thread panicked");
            }
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.cancel(Cause::Done);
            self.join();
        }
    }
}
