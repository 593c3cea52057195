//! `sprig tree` command implementation.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use sprig_tree::{PageRef, PageTree, Pages};

use super::{GlobalArgs, PageSummary, write_json};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,
}

/// Page with its nested children and drafts.
#[derive(Debug, Serialize)]
pub(crate) struct TreeNode {
    #[serde(flatten)]
    page: PageSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    drafts: Vec<TreeNode>,
}

impl TreeNode {
    fn build(page: PageRef<'_>) -> Self {
        Self {
            page: PageSummary::from(page),
            children: nodes(&page.children()),
            drafts: nodes(&page.drafts()),
        }
    }

    fn write_text(&self, out: &mut impl Write, depth: usize) -> std::io::Result<()> {
        writeln!(out, "{}{}", "  ".repeat(depth), self.page.line())?;
        for node in self.children.iter().chain(&self.drafts) {
            node.write_text(out, depth + 1)?;
        }
        Ok(())
    }
}

fn nodes(pages: &Pages<PageRef<'_>>) -> Vec<TreeNode> {
    pages.iter().map(TreeNode::build).collect()
}

/// Nested view of the whole tree: site children, then site drafts.
pub(crate) fn report(tree: &PageTree) -> Vec<TreeNode> {
    let mut roots = nodes(&tree.children());
    roots.extend(nodes(&tree.drafts()));
    roots
}

pub(crate) fn write_text(out: &mut impl Write, roots: &[TreeNode]) -> std::io::Result<()> {
    for node in roots {
        node.write_text(out, 0)?;
    }
    Ok(())
}

impl TreeArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let tree = global.load_tree()?;
        let roots = report(&tree);

        let mut stdout = std::io::stdout().lock();
        if self.json {
            write_json(&mut stdout, &roots)?;
        } else if roots.is_empty() {
            Output::new().warning("Content tree is empty");
        } else {
            write_text(&mut stdout, &roots)?;
            Output::new().note(&format!("{} pages", tree.len()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::fixtures;

    #[test]
    fn test_write_text_indents_children_then_drafts() {
        let tree = fixtures::site();
        let mut out = Vec::new();
        write_text(&mut out, &report(&tree)).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "blog [unlisted] blog\n\
             \x20 blog/first [listed #1] article\n\
             \x20 blog/about [unlisted] note\n\
             \x20 blog/second [listed #2] article\n\
             \x20 blog/third [listed #3] note\n\
             \x20 blog/upcoming [draft] article\n"
        );
    }

    #[test]
    fn test_json_nests_drafts_separately() {
        let tree = fixtures::site();
        let json = serde_json::to_value(report(&tree)).unwrap();

        let blog = &json[0];
        assert_eq!(blog["path"], "blog");
        assert_eq!(blog["children"].as_array().unwrap().len(), 4);
        assert_eq!(blog["drafts"][0]["path"], "blog/upcoming");
        assert_eq!(blog["drafts"][0]["status"], "draft");
        assert!(blog["children"][0].get("children").is_none());
    }

    #[test]
    fn test_empty_tree_reports_nothing() {
        let tree = PageTree::builder().build();
        assert!(report(&tree).is_empty());
    }
}
