//! `sprig siblings` command implementation.

use std::io::Write;

use clap::Args;
use sprig_tree::{PageRef, Pages, SiblingAware};

use super::{GlobalArgs, PageSummary, find_page, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the siblings command.
#[derive(Args)]
pub(crate) struct SiblingsArgs {
    /// Page path, e.g. `blog/hello`.
    page: String,

    /// Leave the page itself out of the list.
    #[arg(long)]
    exclude_self: bool,

    /// Only list siblings sharing the page's template.
    #[arg(long)]
    same_template: bool,

    /// Print the list as JSON.
    #[arg(long)]
    json: bool,
}

impl SiblingsArgs {
    fn collect<'t>(&self, page: PageRef<'t>) -> Pages<PageRef<'t>> {
        if self.same_template {
            page.template_siblings(!self.exclude_self)
        } else {
            page.siblings(!self.exclude_self)
        }
    }

    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let tree = global.load_tree()?;
        let page = find_page(&tree, &self.page)?;
        let siblings = self.collect(page);

        let mut stdout = std::io::stdout().lock();
        if self.json {
            write_json(&mut stdout, &PageSummary::all(&siblings))?;
        } else if siblings.is_empty() {
            Output::new().warning(&format!("{} has no siblings", page.path()));
        } else {
            write_marked(&mut stdout, &siblings, page)?;
        }
        Ok(())
    }
}

/// Write one page per line, marking `current` with `*`.
pub(crate) fn write_marked(
    out: &mut impl Write,
    pages: &Pages<PageRef<'_>>,
    current: PageRef<'_>,
) -> std::io::Result<()> {
    for page in pages.iter() {
        let marker = if page == current { '*' } else { ' ' };
        writeln!(out, "{marker} {}", PageSummary::from(page).line())?;
    }
    Ok(())
}
