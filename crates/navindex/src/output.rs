//! Colored status lines on stderr.

use console::{Style, Term};

/// Severity of a status line, mapped to a color.
#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Good,
    Caution,
    Failure,
}

/// Status printer for command results.
///
/// Generated content never goes to the terminal, so everything here writes
/// to stderr.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    /// Green.
    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Good, msg);
    }

    /// Yellow.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Caution, msg);
    }

    /// Red.
    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Failure, msg);
    }

    fn line(&self, tone: Tone, msg: &str) {
        let style = match tone {
            Tone::Plain => Style::new(),
            Tone::Good => Style::new().green(),
            Tone::Caution => Style::new().yellow(),
            Tone::Failure => Style::new().red().bold(),
        };
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
