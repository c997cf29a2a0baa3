//! # Terminal Output
//!
//! Commands decorate their console lines with a [`Marker`]: an emoji when
//! the terminal takes colors, a bracketed word such as `[SCAN]` otherwise.
//!
//! Whether colors are used is decided once, from the `--color` flag and,
//! in `auto` mode, from the environment:
//! - `NO_COLOR` set to anything (see https://no-color.org/) turns them off;
//! - `CLICOLOR=0` turns them off;
//! - `CLICOLOR_FORCE` set to a non-zero value turns them on even off a TTY;
//! - `TERM=dumb` turns them off;
//! - otherwise `console` decides from the stdout terminal.
//!
//! ```rust,ignore
//! use wildintel_tools::output::{Marker, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{} Checking R0001...", out.marker(Marker::Scan));
//! ```

use std::env;
use std::ffi::OsString;

use crate::report::ReportStatus;

/// Value of the `--color` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    Always,
    Never,
    /// Anything that is not `always` or `never`.
    #[default]
    Auto,
}

impl ColorChoice {
    pub fn from_flag(flag: &str) -> Self {
        match flag.to_lowercase().as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        }
    }
}

/// Something a command announces on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A dataset walk is starting.
    Scan,
    /// An export is starting.
    Export,
    Done,
    Warning,
    Error,
    /// A report with nothing in it.
    Nothing,
    /// Where a report file was written.
    ReportFile,
}

impl Marker {
    /// Marker for the overall status of a report.
    pub fn for_status(status: ReportStatus) -> Self {
        match status {
            ReportStatus::Success => Marker::Done,
            ReportStatus::Partial => Marker::Warning,
            ReportStatus::Failed => Marker::Error,
            ReportStatus::Empty => Marker::Nothing,
        }
    }

    /// `(emoji, plain)` renderings.
    fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            Marker::Scan => ("🔍", "[SCAN]"),
            Marker::Export => ("📦", "[COPY]"),
            Marker::Done => ("✅", "[OK]"),
            Marker::Warning => ("⚠️", "[WARN]"),
            Marker::Error => ("❌", "[ERR]"),
            Marker::Nothing => ("💤", "[EMPTY]"),
            Marker::ReportFile => ("📄", "[FILE]"),
        }
    }
}

/// How console output is decorated for this run.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve from the `--color` flag value and the process environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        Self::resolve(
            ColorChoice::from_flag(color_flag),
            |key| env::var_os(key),
            || console::Term::stdout().features().colors_supported(),
        )
    }

    /// Decide from `choice`, looking variables up with `var` and asking
    /// `terminal` only when nothing in the environment settles it.
    fn resolve(
        choice: ColorChoice,
        var: impl Fn(&str) -> Option<OsString>,
        terminal: impl FnOnce() -> bool,
    ) -> Self {
        let is = |key: &str, value: &str| var(key).is_some_and(|v| v == value);

        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto if var("NO_COLOR").is_some() || is("CLICOLOR", "0") => false,
            ColorChoice::Auto
                if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") =>
            {
                true
            }
            ColorChoice::Auto if is("TERM", "dumb") => false,
            ColorChoice::Auto => terminal(),
        };
        Self { use_color }
    }

    pub fn marker(&self, marker: Marker) -> &'static str {
        let (emoji, plain) = marker.glyphs();
        if self.use_color {
            emoji
        } else {
            plain
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
