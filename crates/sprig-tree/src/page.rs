//! Page data types.
//!
//! A [`Page`] is plain data owned by the [`PageTree`](crate::PageTree).
//! Relationships (parent, children, drafts) live in the tree, not here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Template name used when a page does not declare one.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Publication status of a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Unpublished, stored apart from the published children.
    Draft,
    /// Published without a sorting number.
    Unlisted,
    /// Published with a sorting number.
    Listed,
}

impl Status {
    /// Lowercase name as used in blueprints and content files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Unlisted => "unlisted",
            Self::Listed => "listed",
        }
    }

    /// Whether the page lives in the drafts scope of its parent.
    #[must_use]
    pub fn is_draft(self) -> bool {
        self == Self::Draft
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown page status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "unlisted" => Ok(Self::Unlisted),
            "listed" => Ok(Self::Listed),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

/// Stable index of a page inside its [`PageTree`](crate::PageTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub(crate) usize);

impl PageId {
    /// Raw arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Content page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Folder name, unique among the children and drafts of one parent.
    pub slug: String,
    /// Slash-joined slugs from the site root (e.g., "blog/first-post").
    pub path: String,
    /// Display title (defaults to the slug).
    pub title: String,
    /// Publication status.
    pub status: Status,
    /// Sorting number. Present iff the page is listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
    /// Intended template name.
    pub template: String,
    /// Free-form content fields.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, String>,
}

impl Page {
    /// Resolve a named field for sorting and display.
    ///
    /// Built-in names take precedence over content fields of the same name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "slug" => Some(self.slug.clone()),
            "path" | "id" => Some(self.path.clone()),
            "title" => Some(self.title.clone()),
            "num" => self.num.map(|num| num.to_string()),
            "status" => Some(self.status.as_str().to_owned()),
            "template" | "intendedTemplate" => Some(self.template.clone()),
            other => self.content.get(other).cloned(),
        }
    }
}

/// Input for adding a page to a [`PageTreeBuilder`](crate::PageTreeBuilder).
#[derive(Clone, Debug, Default)]
pub struct NewPage {
    pub slug: String,
    pub title: Option<String>,
    pub template: Option<String>,
    pub num: Option<u32>,
    pub content: BTreeMap<String, String>,
}

impl NewPage {
    /// Unlisted page with the default template.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Set the sorting number (makes a child page listed).
    #[must_use]
    pub fn num(mut self, num: u32) -> Self {
        self.num = Some(num);
        self
    }

    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a content field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.insert(name.into(), value.into());
        self
    }
}
