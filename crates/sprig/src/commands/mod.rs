//! CLI command implementations.

pub(crate) mod cycle;
pub(crate) mod nav;
pub(crate) mod siblings;
pub(crate) mod tree;

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sprig_config::{CliSettings, Config};
use sprig_tree::{PageRef, PageTree, Pages, Snapshot, Status};

use crate::error::CliError;

pub(crate) use cycle::CycleArgs;
pub(crate) use nav::NavArgs;
pub(crate) use siblings::SiblingsArgs;
pub(crate) use tree::TreeArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover sprig.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content snapshot to load (overrides config).
    #[arg(long, global = true, env = "SPRIG_CONTENT")]
    content: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

impl GlobalArgs {
    /// Load configuration and build the content tree it points at.
    pub(crate) fn load_tree(&self) -> Result<PageTree, CliError> {
        let cli_settings = CliSettings {
            content_source: self.content.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration");
        }

        let snapshot = Snapshot::load(&config.content_resolved.source)?;
        Ok(snapshot.into_tree(config.blueprints)?)
    }
}

/// Look up a page by path.
pub(crate) fn find_page<'t>(tree: &'t PageTree, path: &str) -> Result<PageRef<'t>, CliError> {
    tree.get(path)
        .ok_or_else(|| CliError::PageNotFound(path.to_owned()))
}

/// Serializable view of a page.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct PageSummary {
    pub(crate) path: String,
    pub(crate) title: String,
    pub(crate) status: Status,
    pub(crate) template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) num: Option<u32>,
}

impl From<PageRef<'_>> for PageSummary {
    fn from(page: PageRef<'_>) -> Self {
        Self {
            path: page.path().to_owned(),
            title: page.title().to_owned(),
            status: page.status(),
            template: page.intended_template().to_owned(),
            num: page.num(),
        }
    }
}

impl PageSummary {
    /// Collect summaries of every page in a collection.
    pub(crate) fn all(pages: &Pages<PageRef<'_>>) -> Vec<Self> {
        pages.iter().map(Self::from).collect()
    }

    /// One-line text rendering: `path [status] template`.
    pub(crate) fn line(&self) -> String {
        match self.num {
            Some(num) => format!(
                "{} [{} #{num}] {}",
                self.path, self.status, self.template
            ),
            None => format!("{} [{}] {}", self.path, self.status, self.template),
        }
    }
}

/// Write a value as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Render an optional page reference for text output.
pub(crate) fn describe(page: Option<&PageSummary>) -> String {
    page.map_or_else(|| "-".to_owned(), |p| p.path.clone())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use sprig_tree::{Blueprint, Blueprints, CyclePolicy, FilterSet, PageTree, Snapshot};

    pub(crate) const SITE: &str = r"
children:
  - slug: blog
    title: Blog
    template: blog
    children:
      - slug: first
        num: 1
        template: article
      - slug: about
        template: note
      - slug: second
        num: 2
        template: article
      - slug: third
        num: 3
        template: note
    drafts:
      - slug: upcoming
        template: article
";

    pub(crate) fn site() -> PageTree {
        let blueprints = Blueprints::new().with(
            "article",
            Blueprint {
                cycle: Some(CyclePolicy {
                    status: Some(FilterSet::all()),
                    template: Some(FilterSet::one("article")),
                    sort_by: None,
                }),
                ..Default::default()
            },
        );
        Snapshot::parse(SITE)
            .unwrap()
            .into_tree(blueprints)
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_summary_from_page() {
        let tree = fixtures::site();
        let summary = PageSummary::from(tree.get("blog/second").unwrap());

        assert_eq!(
            summary,
            PageSummary {
                path: "blog/second".to_owned(),
                title: "second".to_owned(),
                status: Status::Listed,
                template: "article".to_owned(),
                num: Some(2),
            }
        );
        assert_eq!(summary.line(), "blog/second [listed #2] article");
    }

    #[test]
    fn test_page_summary_json_skips_missing_num() {
        let tree = fixtures::site();
        let summary = PageSummary::from(tree.get("blog/about").unwrap());

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "blog/about",
                "title": "about",
                "status": "unlisted",
                "template": "note",
            })
        );
    }

    #[test]
    fn test_find_page_missing() {
        let tree = fixtures::site();
        let err = find_page(&tree, "blog/missing").unwrap_err();
        assert_eq!(err.to_string(), "Page not found: blog/missing");
    }

    #[test]
    fn test_load_tree_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sprig.toml");
        std::fs::write(
            &config,
            "[content]\nsource = \"site.yaml\"\n\n[blueprints.article]\ncycle = { status = \"all\" }\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("site.yaml"), fixtures::SITE).unwrap();

        let args = GlobalArgs {
            config: Some(config),
            content: None,
            verbose: false,
        };
        let tree = args.load_tree().unwrap();

        assert_eq!(tree.len(), 6);
        assert!(tree.get("blog/upcoming").unwrap().is_draft());
        assert!(tree.blueprints().get("article").unwrap().cycle.is_some());
    }

    #[test]
    fn test_load_tree_missing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("sprig.toml");
        std::fs::write(&config, "").unwrap();

        let args = GlobalArgs {
            config: Some(config),
            content: Some(dir.path().join("nope.yaml")),
            verbose: false,
        };
        let err = args.load_tree().unwrap_err();

        assert!(matches!(err, CliError::Snapshot(_)));
        assert!(err.to_string().contains("nope.yaml"));
    }

    #[test]
    fn test_write_json_appends_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
