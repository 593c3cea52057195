//! Styled status output on stderr.
//!
//! Command results go to stdout; everything here is decoration around them.

use console::{Style, Term};

/// Placeholder shown for a missing page.
const NONE: &str = "-";

/// Stderr writer for headings, notes and diagnostics.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    note: Style,
    warning: Style,
    error: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().cyan().bold(),
            note: Style::new().dim(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
        }
    }

    /// Heading underlined to its own width.
    pub(crate) fn heading(&self, title: &str) {
        let _ = self
            .term
            .write_line(&self.heading.apply_to(title).to_string());
        let _ = self
            .term
            .write_line(&self.note.apply_to(underline(title)).to_string());
    }

    /// `label: path` line for a neighbouring page.
    pub(crate) fn neighbour(&self, label: &str, path: Option<&str>) {
        let value = match path {
            Some(path) => path.to_owned(),
            None => self.note.apply_to(NONE).to_string(),
        };
        let _ = self.term.write_line(&format!("{label}: {value}"));
    }

    pub(crate) fn note(&self, msg: &str) {
        let _ = self.term.write_line(&self.note.apply_to(msg).to_string());
    }

    pub(crate) fn warning(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.warning.apply_to(msg).to_string());
    }

    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.error.apply_to(msg).to_string());
    }
}

fn underline(title: &str) -> String {
    "-".repeat(console::measure_text_width(title).max(1))
}
