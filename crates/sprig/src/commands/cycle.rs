//! `sprig cycle` command implementation.


use clap::Args;
use serde::Serialize;
use sprig_tree::{CyclePolicy, FilterSet, PageRef, SiblingAware};

use super::siblings::write_marked;
use super::{GlobalArgs, PageSummary, find_page, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the cycle command.
#[derive(Args)]
pub(crate) struct CycleArgs {
    /// Page path, e.g. `blog/hello`.
    page: String,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

/// Cycle policy, members and cycle neighbours of a page.
#[derive(Debug, Serialize)]
pub(crate) struct CycleReport {
    page: PageSummary,
    policy: Option<CyclePolicy>,
    members: Vec<PageSummary>,
    prev: Option<PageSummary>,
    next: Option<PageSummary>,
}

impl CycleReport {
    pub(crate) fn new(page: PageRef<'_>) -> Self {
        Self {
            page: PageSummary::from(page),
            policy: page.cycle_policy().cloned(),
            members: PageSummary::all(&page.filter_cycle(&page.siblings_cycle())),
            prev: page.prev_cycle().map(PageSummary::from),
            next: page.next_cycle().map(PageSummary::from),
        }
    }
}

/// Text rendering of a policy, e.g. `status=all template=article,note sortBy=num desc`.
pub(crate) fn describe_policy(policy: Option<&CyclePolicy>) -> String {
    let Some(policy) = policy else {
        return "own status and template".to_owned();
    };

    let set = |s: &FilterSet| s.iter().collect::<Vec<_>>().join(",");
    let mut parts = vec![
        format!(
            "status={}",
            policy.status.as_ref().map_or_else(|| "own".to_owned(), set)
        ),
        format!(
            "template={}",
            policy.template.as_ref().map_or_else(|| "own".to_owned(), set)
        ),
    ];
    if let Some(sort_by) = &policy.sort_by {
        parts.push(format!("sortBy={sort_by}"));
    }
    parts.join(" ")
}

impl CycleArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let tree = global.load_tree()?;
        let page = find_page(&tree, &self.page)?;

        let mut stdout = std::io::stdout().lock();
        if self.json {
            return write_json(&mut stdout, &CycleReport::new(page));
        }

        let output = Output::new();
        output.heading(&format!("cycle: {}", describe_policy(page.cycle_policy())));

        let members = page.filter_cycle(&page.siblings_cycle());
        write_marked(&mut stdout, &members, page)?;

        output.neighbour("prev", page.prev_cycle().map(|p| p.path()));
        output.neighbour("next", page.next_cycle().map(|p| p.path()));
        Ok(())
    }
}
