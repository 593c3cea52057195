//! Sibling navigation.
//!
//! [`SiblingAware`] answers positional and adjacency queries for a page
//! relative to its natural siblings: the drafts of its parent when the page
//! is a draft, otherwise the published children of its parent. The default
//! collection is looked up again on every call, so queries always reflect
//! the current tree.
//!
//! To query against another collection, use the equivalent methods on
//! [`Pages`] directly.
//!
//! # Cycles
//!
//! `next_cycle` / `prev_cycle` walk the siblings selected by the page's
//! [`CyclePolicy`]:
//!
//! 1. A policy with `status` draws from the parent's children and drafts,
//!    otherwise from the natural siblings.
//! 2. `sortBy` re-sorts that collection.
//! 3. Candidates after (or before) the page are kept when their status and
//!    template match the policy, defaulting to the page's own status and
//!    template. An `"all"` value disables that filter.
//! 4. Unreadable pages are always dropped.
//!
//! `next_cycle` takes the first remaining candidate and `prev_cycle` the
//! last one, so both return the closest match.

use crate::blueprint::{CyclePolicy, FilterSet};
use crate::pages::{PageView, Pages};
use crate::tree::PageRef;

/// Sibling and cycle navigation for a page.
///
/// Implementors supply the tree lookups; every query is provided.
pub trait SiblingAware: PageView {
    /// Natural siblings, this page included.
    fn siblings_collection(&self) -> Pages<Self>;

    /// Children followed by drafts of the parent container.
    fn parent_children_and_drafts(&self) -> Pages<Self>;

    /// Cycle policy from the page's blueprint.
    fn cycle_policy(&self) -> Option<&CyclePolicy>;

    fn siblings(&self, include_self: bool) -> Pages<Self> {
        let siblings = self.siblings_collection();
        if include_self {
            siblings
        } else {
            siblings.without(self)
        }
    }

    /// Siblings sharing this page's intended template.
    fn template_siblings(&self, include_self: bool) -> Pages<Self> {
        self.siblings(include_self)
            .with_template(self.intended_template())
    }

    fn index_of(&self) -> Option<usize> {
        self.siblings_collection().index_of(self)
    }

    fn is_first(&self) -> bool {
        self.siblings_collection().is_first(self)
    }

    fn is_last(&self) -> bool {
        self.siblings_collection().is_last(self)
    }

    fn is_nth(&self, n: usize) -> bool {
        self.siblings_collection().is_nth(self, n)
    }

    fn next(&self) -> Option<Self> {
        self.siblings_collection().next_of(self)
    }

    fn prev(&self) -> Option<Self> {
        self.siblings_collection().prev_of(self)
    }

    fn next_all(&self) -> Pages<Self> {
        self.siblings_collection().next_all(self)
    }

    fn prev_all(&self) -> Pages<Self> {
        self.siblings_collection().prev_all(self)
    }

    fn has_next(&self) -> bool {
        self.next().is_some()
    }

    fn has_prev(&self) -> bool {
        self.prev().is_some()
    }

    fn next_listed(&self) -> Option<Self> {
        self.siblings_collection().next_listed(self)
    }

    fn next_unlisted(&self) -> Option<Self> {
        self.siblings_collection().next_unlisted(self)
    }

    fn prev_listed(&self) -> Option<Self> {
        self.siblings_collection().prev_listed(self)
    }

    /// See [`Pages::prev_unlisted`]: the farthest match, not the closest.
    fn prev_unlisted(&self) -> Option<Self> {
        self.siblings_collection().prev_unlisted(self)
    }

    fn has_next_listed(&self) -> bool {
        self.next_listed().is_some()
    }

    fn has_next_unlisted(&self) -> bool {
        self.next_unlisted().is_some()
    }

    fn has_prev_listed(&self) -> bool {
        self.prev_listed().is_some()
    }

    fn has_prev_unlisted(&self) -> bool {
        self.prev_unlisted().is_some()
    }

    /// Base collection for cycle navigation.
    fn siblings_cycle(&self) -> Pages<Self> {
        let policy = self.cycle_policy();

        let collection = if policy.is_some_and(|p| p.status.is_some()) {
            self.parent_children_and_drafts()
        } else {
            self.siblings_collection()
        };

        match policy.and_then(|p| p.sort_by.as_ref()) {
            Some(spec) => {
                tracing::trace!(slug = self.slug(), sort = %spec, "Sorting cycle siblings");
                collection.sorted_by(spec)
            }
            None => collection,
        }
    }

    /// Keep the pages of `pages` that take part in this page's cycle.
    fn filter_cycle(&self, pages: &Pages<Self>) -> Pages<Self> {
        let policy = self.cycle_policy();

        let own_status = FilterSet::one(self.status().as_str());
        let own_template = FilterSet::one(self.intended_template());
        let statuses = policy
            .and_then(|p| p.status.as_ref())
            .unwrap_or(&own_status);
        let templates = policy
            .and_then(|p| p.template.as_ref())
            .unwrap_or(&own_template);

        let mut filtered = pages.clone();
        if !templates.is_all() {
            filtered = filtered.filter_templates(templates);
        }
        if !statuses.is_all() {
            filtered = filtered.filter_statuses(statuses);
        }
        filtered.readable()
    }

    /// Closest following page in the cycle.
    fn next_cycle(&self) -> Option<Self> {
        let candidates = self.siblings_cycle().next_all(self);
        self.filter_cycle(&candidates).first()
    }

    /// Closest preceding page in the cycle.
    fn prev_cycle(&self) -> Option<Self> {
        let candidates = self.siblings_cycle().prev_all(self);
        self.filter_cycle(&candidates).last()
    }
}

impl<'t> SiblingAware for PageRef<'t> {
    fn siblings_collection(&self) -> Pages<PageRef<'t>> {
        self.natural_siblings()
    }

    fn parent_children_and_drafts(&self) -> Pages<PageRef<'t>> {
        self.parent_superset()
    }

    fn cycle_policy(&self) -> Option<&CyclePolicy> {
        self.cycle()
    }
}
