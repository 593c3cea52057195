//! Tree construction and mutation errors.

use crate::page::PageId;

/// Error returned when building or mutating a [`PageTree`](crate::PageTree).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// Page id does not belong to this tree.
    #[error("Unknown page id: {}", .0.index())]
    UnknownPage(PageId),
    /// Slug is already taken among the children and drafts of the parent.
    #[error("Duplicate slug '{slug}' under '{parent}'")]
    DuplicateSlug {
        /// Parent path (empty for the site root).
        parent: String,
        /// Conflicting slug.
        slug: String,
    },
    /// Slug is empty or contains a path separator.
    #[error("Invalid slug: '{0}'")]
    InvalidSlug(String),
    /// No sorting number is left after the highest listed sibling.
    #[error("Sorting number overflow: a sibling already uses {}", u32::MAX)]
    NumOverflow,
}
