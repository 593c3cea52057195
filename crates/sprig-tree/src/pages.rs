//! Ordered page collections.
//!
//! [`Pages`] is an ordered sequence of page handles, unique by identity.
//! Besides the usual collection helpers it answers positional queries
//! (`index_of`, `next_of`, `prev_all`, ...) for a page relative to the
//! collection. These are the explicit-collection forms of the
//! [`SiblingAware`](crate::SiblingAware) queries.
//!
//! Absence is never an error: a page that is not part of the collection has
//! no index, no neighbours and empty `next_all` / `prev_all` sequences.

use crate::blueprint::FilterSet;
use crate::page::Status;
use crate::sort::SortSpec;

/// Read-only view of a page as seen by collections and the navigator.
pub trait PageView: Copy + PartialEq {
    fn slug(&self) -> &str;
    fn status(&self) -> Status;
    fn intended_template(&self) -> &str;
    /// Whether the current caller may read the page.
    fn is_readable(&self) -> bool;
    /// Named field value used for sorting.
    fn field(&self, name: &str) -> Option<String>;
}

/// Ordered collection of pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pages<P> {
    items: Vec<P>,
}

impl<P> Default for Pages<P> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<P: PageView> Pages<P> {
    /// Build a collection, dropping repeated pages (first occurrence wins).
    #[must_use]
    pub fn new(items: Vec<P>) -> Self {
        let mut unique: Vec<P> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Self { items: unique }
    }

    /// Wrap items already known to be unique.
    pub(crate) fn from_unique(items: Vec<P>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<P> {
        self.items.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<P> {
        self.items.last().copied()
    }

    /// Page at zero-based position `n`.
    #[must_use]
    pub fn nth(&self, n: usize) -> Option<P> {
        self.items.get(n).copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = P> + '_ {
        self.items.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, page: &P) -> bool {
        self.items.contains(page)
    }

    /// Find a page by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<P> {
        self.iter().find(|p| p.slug() == slug)
    }

    #[must_use]
    pub fn has(&self, slug: &str) -> bool {
        self.find(slug).is_some()
    }

    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        self.items.iter().map(PageView::slug).collect()
    }

    /// Collection without `page`.
    #[must_use]
    pub fn without(&self, page: &P) -> Self {
        self.filter(|p| p != page)
    }

    /// Collection in reverse order.
    #[must_use]
    pub fn flip(&self) -> Self {
        Self::from_unique(self.items.iter().rev().copied().collect())
    }

    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&P) -> bool) -> Self {
        Self::from_unique(self.items.iter().filter(|p| predicate(p)).copied().collect())
    }

    #[must_use]
    pub fn listed(&self) -> Self {
        self.with_status(Status::Listed)
    }

    #[must_use]
    pub fn unlisted(&self) -> Self {
        self.with_status(Status::Unlisted)
    }

    #[must_use]
    pub fn drafts(&self) -> Self {
        self.with_status(Status::Draft)
    }

    #[must_use]
    pub fn with_status(&self, status: Status) -> Self {
        self.filter(|p| p.status() == status)
    }

    #[must_use]
    pub fn with_template(&self, template: &str) -> Self {
        self.filter(|p| p.intended_template() == template)
    }

    /// Pages whose status name is in `statuses`.
    #[must_use]
    pub fn filter_statuses(&self, statuses: &FilterSet) -> Self {
        self.filter(|p| statuses.contains(p.status().as_str()))
    }

    /// Pages whose intended template is in `templates`.
    #[must_use]
    pub fn filter_templates(&self, templates: &FilterSet) -> Self {
        self.filter(|p| templates.contains(p.intended_template()))
    }

    /// Pages the current caller may read.
    #[must_use]
    pub fn readable(&self) -> Self {
        self.filter(|p| p.is_readable())
    }

    /// Stable sort by `spec`.
    #[must_use]
    pub fn sorted_by(&self, spec: &SortSpec) -> Self {
        let mut items = self.items.clone();
        items.sort_by(|a, b| spec.compare(|f| a.field(f), |f| b.field(f)));
        Self::from_unique(items)
    }

    /// Zero-based position of `page`.
    #[must_use]
    pub fn index_of(&self, page: &P) -> Option<usize> {
        self.items.iter().position(|p| p == page)
    }

    #[must_use]
    pub fn is_first(&self, page: &P) -> bool {
        self.is_nth(page, 0)
    }

    #[must_use]
    pub fn is_last(&self, page: &P) -> bool {
        self.index_of(page)
            .is_some_and(|i| i + 1 == self.items.len())
    }

    #[must_use]
    pub fn is_nth(&self, page: &P, n: usize) -> bool {
        self.index_of(page) == Some(n)
    }

    /// Page right after `page`.
    #[must_use]
    pub fn next_of(&self, page: &P) -> Option<P> {
        self.after(page).first().copied()
    }

    /// Page right before `page`.
    #[must_use]
    pub fn prev_of(&self, page: &P) -> Option<P> {
        self.before(page).last().copied()
    }

    #[must_use]
    pub fn has_next(&self, page: &P) -> bool {
        self.next_of(page).is_some()
    }

    #[must_use]
    pub fn has_prev(&self, page: &P) -> bool {
        self.prev_of(page).is_some()
    }

    /// All pages after `page`, in collection order.
    #[must_use]
    pub fn next_all(&self, page: &P) -> Self {
        Self::from_unique(self.after(page).to_vec())
    }

    /// All pages before `page`, in collection order (not reversed).
    #[must_use]
    pub fn prev_all(&self, page: &P) -> Self {
        Self::from_unique(self.before(page).to_vec())
    }

    /// Closest listed page after `page`.
    #[must_use]
    pub fn next_listed(&self, page: &P) -> Option<P> {
        self.after(page)
            .iter()
            .find(|p| p.status() == Status::Listed)
            .copied()
    }

    /// Closest unlisted page after `page`.
    #[must_use]
    pub fn next_unlisted(&self, page: &P) -> Option<P> {
        self.after(page)
            .iter()
            .find(|p| p.status() == Status::Unlisted)
            .copied()
    }

    /// Closest listed page before `page`.
    #[must_use]
    pub fn prev_listed(&self, page: &P) -> Option<P> {
        self.before(page)
            .iter()
            .rfind(|p| p.status() == Status::Listed)
            .copied()
    }

    /// First unlisted page of the collection, if it comes before `page`.
    ///
    /// Unlike [`prev_listed`](Self::prev_listed) this returns the match
    /// farthest from `page`, not the closest one. Callers rely on it.
    #[must_use]
    pub fn prev_unlisted(&self, page: &P) -> Option<P> {
        self.before(page)
            .iter()
            .find(|p| p.status() == Status::Unlisted)
            .copied()
    }

    #[must_use]
    pub fn has_next_listed(&self, page: &P) -> bool {
        self.next_listed(page).is_some()
    }

    #[must_use]
    pub fn has_next_unlisted(&self, page: &P) -> bool {
        self.next_unlisted(page).is_some()
    }

    #[must_use]
    pub fn has_prev_listed(&self, page: &P) -> bool {
        self.prev_listed(page).is_some()
    }

    #[must_use]
    pub fn has_prev_unlisted(&self, page: &P) -> bool {
        self.prev_unlisted(page).is_some()
    }

    fn after(&self, page: &P) -> &[P] {
        match self.index_of(page) {
            Some(i) => &self.items[i + 1..],
            None => &[],
        }
    }

    fn before(&self, page: &P) -> &[P] {
        match self.index_of(page) {
            Some(i) => &self.items[..i],
            None => &[],
        }
    }
}

impl<P: PageView> FromIterator<P> for Pages<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<P: PageView> From<Vec<P>> for Pages<P> {
    fn from(items: Vec<P>) -> Self {
        Self::new(items)
    }
}

impl<P> IntoIterator for Pages<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
