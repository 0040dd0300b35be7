use crate::render::{Color, Line};

/// Output stream a line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Interprets render tokens for one output device
pub trait Terminal {
    fn write_line(&mut self, stream: Stream, line: &Line);
}

/// Message verbosity, least to most chatty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// The single output channel of a run.
///
/// Data and summaries go to stdout; errors and warnings go to stderr.
/// Messages below the configured verbosity are dropped; data never is.
pub struct Reporter<'t> {
    terminal: &'t mut dyn Terminal,
    verbosity: Verbosity,
}

impl<'t> Reporter<'t> {
    pub fn new(terminal: &'t mut dyn Terminal, verbosity: Verbosity) -> Self {
        Self {
            terminal,
            verbosity,
        }
    }

    fn enabled(&self, level: Verbosity) -> bool {
        level <= self.verbosity
    }

    /// Rendered data, always written
    pub fn line(&mut self, line: Line) {
        self.terminal.write_line(Stream::Stdout, &line);
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        if self.enabled(Verbosity::Error) {
            let line = Line::new()
                .colored(Some(Color::DarkRed), "Error: ")
                .text(message.as_ref());
            self.terminal.write_line(Stream::Stderr, &line);
        }
    }

    pub fn warning(&mut self, message: impl AsRef<str>) {
        if self.enabled(Verbosity::Warn) {
            let line = Line::new()
                .colored(Some(Color::Yellow), "Warning: ")
                .text(message.as_ref());
            self.terminal.write_line(Stream::Stderr, &line);
        }
    }

    /// Summaries and other plain messages
    pub fn info(&mut self, message: impl AsRef<str>) {
        if self.enabled(Verbosity::Info) {
            self.terminal
                .write_line(Stream::Stdout, &Line::from(message.as_ref()));
        }
    }

    pub fn debug(&mut self, message: impl AsRef<str>) {
        if self.enabled(Verbosity::Debug) {
            let line = Line::new().colored(Some(Color::Gray), message.as_ref());
            self.terminal.write_line(Stream::Stderr, &line);
        }
    }

    pub fn trace(&mut self, message: impl AsRef<str>) {
        if self.enabled(Verbosity::Trace) {
            let line = Line::new().colored(Some(Color::Gray), message.as_ref());
            self.terminal.write_line(Stream::Stderr, &line);
        }
    }
}

/// Terminal that keeps plain-text lines in memory
#[derive(Debug, Default)]
pub struct CaptureTerminal {
    lines: Vec<(Stream, Line)>,
}

impl CaptureTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(Stream, Line)] {
        &self.lines
    }

    pub fn stdout_lines(&self) -> Vec<String> {
        self.plain_lines(Stream::Stdout)
    }

    pub fn stderr_lines(&self) -> Vec<String> {
        self.plain_lines(Stream::Stderr)
    }

    fn plain_lines(&self, stream: Stream) -> Vec<String> {
        self.lines
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, line)| line.plain())
            .collect()
    }
}

impl Terminal for CaptureTerminal {
    fn write_line(&mut self, stream: Stream, line: &Line) {
        self.lines.push((stream, line.clone()));
    }
}
