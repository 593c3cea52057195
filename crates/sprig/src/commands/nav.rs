//! `sprig nav` command implementation.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use sprig_tree::{PageRef, SiblingAware};

use super::{GlobalArgs, PageSummary, describe, find_page, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Page path, e.g. `blog/hello`.
    page: String,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// Position and neighbours of a page among its siblings.
#[derive(Debug, Serialize)]
pub(crate) struct NavReport {
    page: PageSummary,
    index: Option<usize>,
    count: usize,
    is_first: bool,
    is_last: bool,
    prev: Option<PageSummary>,
    next: Option<PageSummary>,
    prev_listed: Option<PageSummary>,
    next_listed: Option<PageSummary>,
    prev_unlisted: Option<PageSummary>,
    next_unlisted: Option<PageSummary>,
    prev_cycle: Option<PageSummary>,
    next_cycle: Option<PageSummary>,
}

impl NavReport {
    pub(crate) fn new(page: PageRef<'_>) -> Self {
        Self {
            page: PageSummary::from(page),
            index: page.index_of(),
            count: page.siblings(true).len(),
            is_first: page.is_first(),
            is_last: page.is_last(),
            prev: page.prev().map(PageSummary::from),
            next: page.next().map(PageSummary::from),
            prev_listed: page.prev_listed().map(PageSummary::from),
            next_listed: page.next_listed().map(PageSummary::from),
            prev_unlisted: page.prev_unlisted().map(PageSummary::from),
            next_unlisted: page.next_unlisted().map(PageSummary::from),
            prev_cycle: page.prev_cycle().map(PageSummary::from),
            next_cycle: page.next_cycle().map(PageSummary::from),
        }
    }

    pub(crate) fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        let position = self
            .index
            .map_or_else(|| "-".to_owned(), |i| (i + 1).to_string());
        writeln!(out, "position:      {position} of {}", self.count)?;

        let rows = [
            ("prev", &self.prev),
            ("next", &self.next),
            ("prev listed", &self.prev_listed),
            ("next listed", &self.next_listed),
            ("prev unlisted", &self.prev_unlisted),
            ("next unlisted", &self.next_unlisted),
            ("prev cycle", &self.prev_cycle),
            ("next cycle", &self.next_cycle),
        ];
        for (label, page) in rows {
            writeln!(out, "{:<15}{}", format!("{label}:"), describe(page.as_ref()))?;
        }
        Ok(())
    }
}

impl NavArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let tree = global.load_tree()?;
        let page = find_page(&tree, &self.page)?;
        let report = NavReport::new(page);

        let mut stdout = std::io::stdout().lock();
        if self.json {
            write_json(&mut stdout, &report)?;
        } else {
            Output::new().heading(&report.page.line());
            report.write_text(&mut stdout)?;
        }
        Ok(())
    }
}
