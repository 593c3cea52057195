//! YAML content snapshots.
//!
//! A snapshot describes a content tree as nested YAML:
//!
//! ```yaml
//! children:
//!   - slug: blog
//!     template: blog
//!     children:
//!       - slug: hello
//!         num: 1
//!         template: article
//!         content:
//!           date: 2024-01-02
//!     drafts:
//!       - slug: upcoming
//!         template: article
//! drafts:
//!   - slug: secret-page
//! ```
//!
//! Order in the file is storage order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::access::ReadAccess;
use crate::blueprint::Blueprints;
use crate::error::TreeError;
use crate::page::{NewPage, PageId};
use crate::tree::{PageTree, PageTreeBuilder};

/// Error returned when loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Snapshot file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Snapshot path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Snapshot is not valid YAML or has the wrong shape.
    #[error("Invalid content snapshot: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Snapshot describes an invalid tree.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Parsed content snapshot.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    children: Vec<Entry>,
    drafts: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    slug: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    template: Option<String>,
    #[serde(default)]
    num: Option<u32>,
    #[serde(default)]
    content: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    children: Vec<Entry>,
    #[serde(default)]
    drafts: Vec<Entry>,
}

impl Entry {
    fn new_page(&self) -> NewPage {
        NewPage {
            slug: self.slug.clone(),
            title: self.title.clone(),
            template: self.template.clone(),
            num: self.num,
            content: self
                .content
                .iter()
                .map(|(k, v)| (k.clone(), render_scalar(v)))
                .collect(),
        }
    }
}

/// Flatten a YAML value into a content string.
fn render_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

impl Snapshot {
    /// Parse a snapshot from YAML. Empty content is an empty tree.
    pub fn parse(content: &str) -> Result<Self, SnapshotError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(trimmed)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "Loaded content snapshot");
        Ok(snapshot)
    }

    /// Build a tree with the given blueprints and the default access policy.
    pub fn into_tree(self, blueprints: Blueprints) -> Result<PageTree, SnapshotError> {
        self.into_builder(PageTree::builder().with_blueprints(blueprints))
    }

    /// Build a tree with a custom access policy.
    pub fn into_tree_with_access(
        self,
        blueprints: Blueprints,
        access: Arc<dyn ReadAccess>,
    ) -> Result<PageTree, SnapshotError> {
        self.into_builder(
            PageTree::builder()
                .with_blueprints(blueprints)
                .with_access(access),
        )
    }

    fn into_builder(self, mut builder: PageTreeBuilder) -> Result<PageTree, SnapshotError> {
        add_entries(&mut builder, None, &self.children, &self.drafts)?;
        let tree = builder.build();
        tracing::info!(pages = tree.len(), "Content tree ready");
        Ok(tree)
    }
}

fn add_entries(
    builder: &mut PageTreeBuilder,
    parent: Option<PageId>,
    children: &[Entry],
    drafts: &[Entry],
) -> Result<(), TreeError> {
    for entry in children {
        let id = builder.add_child(parent, entry.new_page())?;
        add_entries(builder, Some(id), &entry.children, &entry.drafts)?;
    }
    for entry in drafts {
        let id = builder.add_draft(parent, entry.new_page())?;
        add_entries(builder, Some(id), &entry.children, &entry.drafts)?;
    }
    Ok(())
}
