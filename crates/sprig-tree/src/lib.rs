//! Page tree model and sibling navigation for Sprig.
//!
//! This crate provides:
//! - [`PageTree`]: content tree of listed, unlisted and draft pages
//! - [`Pages`]: ordered page collections with positional queries
//! - [`SiblingAware`]: next/previous and cycle navigation among siblings
//! - [`Blueprints`] with per-template [`CyclePolicy`]
//! - [`Snapshot`]: YAML content snapshots
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sprig_tree::{Blueprints, SiblingAware, Snapshot};
//!
//! let tree = Snapshot::load("content.yaml".as_ref())?.into_tree(Blueprints::new())?;
//!
//! if let Some(page) = tree.get("blog/hello") {
//!     let next = page.next_listed();
//!     let cycle = page.next_cycle();
//! }
//! # Ok(())
//! # }
//! ```

mod access;
mod blueprint;
mod error;
mod page;
mod pages;
mod siblings;
mod snapshot;
mod sort;
mod tree;

pub use access::{AllowAll, BlueprintAccess, ReadAccess};
pub use blueprint::{ALL, Blueprint, BlueprintOptions, Blueprints, CyclePolicy, FilterSet};
pub use error::TreeError;
pub use page::{DEFAULT_TEMPLATE, NewPage, Page, PageId, ParseStatusError, Status};
pub use pages::{PageView, Pages};
pub use siblings::SiblingAware;
pub use snapshot::{Snapshot, SnapshotError};
pub use sort::{Direction, SortSpec, SortSpecError, SortTerm};
pub use tree::{PageRef, PageTree, PageTreeBuilder};
