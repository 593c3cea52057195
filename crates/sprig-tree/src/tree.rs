//! Page tree arena.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` with parent, children and drafts
//! relationships tracked by [`PageId`] indices. This provides:
//! - O(1) path lookups via the `path_index` `HashMap`
//! - O(1) access to the children and drafts of any container
//! - cheap copyable [`PageRef`] handles for navigation
//!
//! The site root is not a page. Its children and drafts are kept in separate
//! lists and addressed with a `None` parent.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::access::{BlueprintAccess, ReadAccess};
use crate::blueprint::{Blueprint, Blueprints, CyclePolicy};
use crate::error::TreeError;
use crate::page::{DEFAULT_TEMPLATE, NewPage, Page, PageId, Status};
use crate::pages::{PageView, Pages};

/// Content tree with efficient path lookups.
pub struct PageTree {
    pages: Vec<Page>,
    parents: Vec<Option<PageId>>,
    children: Vec<Vec<PageId>>,
    drafts: Vec<Vec<PageId>>,
    site_children: Vec<PageId>,
    site_drafts: Vec<PageId>,
    path_index: HashMap<String, PageId>,
    blueprints: Blueprints,
    access: Arc<dyn ReadAccess>,
}

impl fmt::Debug for PageTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTree")
            .field("pages", &self.pages.len())
            .field("site_children", &self.site_children.len())
            .field("site_drafts", &self.site_drafts.len())
            .field("blueprints", &self.blueprints.len())
            .finish_non_exhaustive()
    }
}

impl PageTree {
    /// Start building a tree.
    #[must_use]
    pub fn builder() -> PageTreeBuilder {
        PageTreeBuilder::new()
    }

    /// Number of pages, drafts included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get a page by path (e.g., "blog/first-post").
    #[must_use]
    pub fn get(&self, path: &str) -> Option<PageRef<'_>> {
        let path = path.trim_matches('/');
        self.path_index.get(path).map(|&id| PageRef { tree: self, id })
    }

    /// Get a page by id.
    #[must_use]
    pub fn page(&self, id: PageId) -> Option<PageRef<'_>> {
        (id.0 < self.pages.len()).then_some(PageRef { tree: self, id })
    }

    /// Published pages at the site root.
    #[must_use]
    pub fn children(&self) -> Pages<PageRef<'_>> {
        self.collect(&self.site_children)
    }

    /// Drafts at the site root.
    #[must_use]
    pub fn drafts(&self) -> Pages<PageRef<'_>> {
        self.collect(&self.site_drafts)
    }

    /// Every page in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = PageRef<'_>> {
        (0..self.pages.len()).map(|i| PageRef {
            tree: self,
            id: PageId(i),
        })
    }

    #[must_use]
    pub fn blueprints(&self) -> &Blueprints {
        &self.blueprints
    }

    /// Change the status of a page.
    ///
    /// Moving between the draft and published scopes appends the page to the
    /// end of the target list. Listing assigns the next free sorting number
    /// among the listed siblings; any other status clears it.
    ///
    /// Fails with [`TreeError::NumOverflow`] when the highest sibling number
    /// is already `u32::MAX`. The tree is left unchanged.
    pub fn change_status(&mut self, id: PageId, status: Status) -> Result<(), TreeError> {
        let page = self.pages.get(id.0).ok_or(TreeError::UnknownPage(id))?;
        let previous = page.status;
        if previous == status {
            return Ok(());
        }

        let parent = self.parents[id.0];
        let num = match status {
            Status::Listed => Some(self.next_num(parent)?),
            Status::Unlisted | Status::Draft => None,
        };

        if previous.is_draft() != status.is_draft() {
            let (from, to) = if status.is_draft() {
                (self.child_ids_mut(parent), false)
            } else {
                (self.draft_ids_mut(parent), true)
            };
            from.retain(|&other| other != id);
            if to {
                self.child_ids_mut(parent).push(id);
            } else {
                self.draft_ids_mut(parent).push(id);
            }
        }

        let page = &mut self.pages[id.0];
        page.status = status;
        page.num = num;

        tracing::debug!(path = %page.path, from = %previous, to = %status, "Changed page status");
        Ok(())
    }

    fn next_num(&self, parent: Option<PageId>) -> Result<u32, TreeError> {
        match self
            .child_ids(parent)
            .iter()
            .filter_map(|&id| self.pages[id.0].num)
            .max()
        {
            Some(max) => max.checked_add(1).ok_or(TreeError::NumOverflow),
            None => Ok(1),
        }
    }

    fn child_ids(&self, parent: Option<PageId>) -> &[PageId] {
        match parent {
            Some(p) => &self.children[p.0],
            None => &self.site_children,
        }
    }

    fn draft_ids(&self, parent: Option<PageId>) -> &[PageId] {
        match parent {
            Some(p) => &self.drafts[p.0],
            None => &self.site_drafts,
        }
    }

    fn child_ids_mut(&mut self, parent: Option<PageId>) -> &mut Vec<PageId> {
        match parent {
            Some(p) => &mut self.children[p.0],
            None => &mut self.site_children,
        }
    }

    fn draft_ids_mut(&mut self, parent: Option<PageId>) -> &mut Vec<PageId> {
        match parent {
            Some(p) => &mut self.drafts[p.0],
            None => &mut self.site_drafts,
        }
    }

    fn collect<'t>(&'t self, ids: &[PageId]) -> Pages<PageRef<'t>> {
        Pages::from_unique(ids.iter().map(|&id| PageRef { tree: self, id }).collect())
    }
}

/// Copyable handle to a page inside a [`PageTree`].
///
/// Two handles are equal when they point at the same page of the same tree.
#[derive(Clone, Copy)]
pub struct PageRef<'t> {
    tree: &'t PageTree,
    id: PageId,
}

impl PartialEq for PageRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for PageRef<'_> {}

impl fmt::Debug for PageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRef")
            .field("id", &self.id.0)
            .field("path", &self.page().path)
            .field("status", &self.page().status)
            .finish()
    }
}

impl<'t> PageRef<'t> {
    #[must_use]
    pub fn id(&self) -> PageId {
        self.id
    }

    #[must_use]
    pub fn tree(&self) -> &'t PageTree {
        self.tree
    }

    /// Underlying page data.
    #[must_use]
    pub fn page(&self) -> &'t Page {
        &self.tree.pages[self.id.0]
    }

    #[must_use]
    pub fn slug(&self) -> &'t str {
        &self.page().slug
    }

    #[must_use]
    pub fn path(&self) -> &'t str {
        &self.page().path
    }

    #[must_use]
    pub fn title(&self) -> &'t str {
        &self.page().title
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.page().status
    }

    #[must_use]
    pub fn num(&self) -> Option<u32> {
        self.page().num
    }

    #[must_use]
    pub fn intended_template(&self) -> &'t str {
        &self.page().template
    }

    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.status().is_draft()
    }

    /// Parent page, `None` for pages at the site root.
    #[must_use]
    pub fn parent(&self) -> Option<PageRef<'t>> {
        self.tree.parents[self.id.0].map(|id| PageRef {
            tree: self.tree,
            id,
        })
    }

    /// Published children of this page.
    #[must_use]
    pub fn children(&self) -> Pages<PageRef<'t>> {
        self.tree.collect(&self.tree.children[self.id.0])
    }

    /// Drafts of this page.
    #[must_use]
    pub fn drafts(&self) -> Pages<PageRef<'t>> {
        self.tree.collect(&self.tree.drafts[self.id.0])
    }

    /// Children followed by drafts.
    #[must_use]
    pub fn children_and_drafts(&self) -> Pages<PageRef<'t>> {
        self.container_children_and_drafts(Some(self.id))
    }

    /// Blueprint of the intended template.
    #[must_use]
    pub fn blueprint(&self) -> Option<&'t Blueprint> {
        self.tree.blueprints.get(&self.page().template)
    }

    /// Cycle policy of the page's blueprint.
    #[must_use]
    pub fn cycle(&self) -> Option<&'t CyclePolicy> {
        self.blueprint().and_then(|b| b.cycle.as_ref())
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.tree.access.can_read(self.page(), self.blueprint())
    }

    /// Drafts of the parent container if this page is a draft, otherwise its
    /// published children. Includes this page.
    pub(crate) fn natural_siblings(&self) -> Pages<PageRef<'t>> {
        let parent = self.tree.parents[self.id.0];
        if self.is_draft() {
            self.tree.collect(self.tree.draft_ids(parent))
        } else {
            self.tree.collect(self.tree.child_ids(parent))
        }
    }

    pub(crate) fn parent_superset(&self) -> Pages<PageRef<'t>> {
        self.container_children_and_drafts(self.tree.parents[self.id.0])
    }

    fn container_children_and_drafts(&self, container: Option<PageId>) -> Pages<PageRef<'t>> {
        let ids: Vec<PageId> = self
            .tree
            .child_ids(container)
            .iter()
            .chain(self.tree.draft_ids(container))
            .copied()
            .collect();
        self.tree.collect(&ids)
    }
}

impl PageView for PageRef<'_> {
    fn slug(&self) -> &str {
        &self.page().slug
    }

    fn status(&self) -> Status {
        self.page().status
    }

    fn intended_template(&self) -> &str {
        &self.page().template
    }

    fn is_readable(&self) -> bool {
        PageRef::is_readable(self)
    }

    fn field(&self, name: &str) -> Option<String> {
        self.page().field(name)
    }
}

/// Builder for constructing [`PageTree`] instances.
pub struct PageTreeBuilder {
    pages: Vec<Page>,
    parents: Vec<Option<PageId>>,
    children: Vec<Vec<PageId>>,
    drafts: Vec<Vec<PageId>>,
    site_children: Vec<PageId>,
    site_drafts: Vec<PageId>,
    path_index: HashMap<String, PageId>,
    blueprints: Blueprints,
    access: Arc<dyn ReadAccess>,
}

impl Default for PageTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTreeBuilder {
    /// Create an empty builder with [`BlueprintAccess`] and no blueprints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            drafts: Vec::new(),
            site_children: Vec::new(),
            site_drafts: Vec::new(),
            path_index: HashMap::new(),
            blueprints: Blueprints::default(),
            access: Arc::new(BlueprintAccess),
        }
    }

    #[must_use]
    pub fn with_blueprints(mut self, blueprints: Blueprints) -> Self {
        self.blueprints = blueprints;
        self
    }

    #[must_use]
    pub fn with_access(mut self, access: Arc<dyn ReadAccess>) -> Self {
        self.access = access;
        self
    }

    /// Add a published page under `parent` (`None` for the site root).
    ///
    /// The page is listed if it carries a sorting number, unlisted otherwise.
    pub fn add_child(&mut self, parent: Option<PageId>, page: NewPage) -> Result<PageId, TreeError> {
        let status = if page.num.is_some() {
            Status::Listed
        } else {
            Status::Unlisted
        };
        self.add(parent, page, status)
    }

    /// Add a draft under `parent` (`None` for the site root).
    pub fn add_draft(
        &mut self,
        parent: Option<PageId>,
        mut page: NewPage,
    ) -> Result<PageId, TreeError> {
        if let Some(num) = page.num.take() {
            tracing::warn!(slug = %page.slug, num, "Ignoring sorting number on draft");
        }
        self.add(parent, page, Status::Draft)
    }

    fn add(
        &mut self,
        parent: Option<PageId>,
        page: NewPage,
        status: Status,
    ) -> Result<PageId, TreeError> {
        if page.slug.is_empty() || page.slug.contains('/') {
            return Err(TreeError::InvalidSlug(page.slug));
        }

        let parent_path = match parent {
            Some(p) => self
                .pages
                .get(p.0)
                .map(|parent| parent.path.clone())
                .ok_or(TreeError::UnknownPage(p))?,
            None => String::new(),
        };
        let path = if parent_path.is_empty() {
            page.slug.clone()
        } else {
            format!("{parent_path}/{}", page.slug)
        };
        if self.path_index.contains_key(&path) {
            return Err(TreeError::DuplicateSlug {
                parent: parent_path,
                slug: page.slug,
            });
        }

        let id = PageId(self.pages.len());
        self.path_index.insert(path.clone(), id);
        self.pages.push(Page {
            title: page.title.unwrap_or_else(|| page.slug.clone()),
            slug: page.slug,
            path,
            status,
            num: page.num,
            template: page.template.unwrap_or_else(|| DEFAULT_TEMPLATE.to_owned()),
            content: page.content,
        });
        self.parents.push(parent);
        self.children.push(Vec::new());
        self.drafts.push(Vec::new());

        let list = match (parent, status.is_draft()) {
            (Some(p), false) => &mut self.children[p.0],
            (Some(p), true) => &mut self.drafts[p.0],
            (None, false) => &mut self.site_children,
            (None, true) => &mut self.site_drafts,
        };
        list.push(id);

        Ok(id)
    }

    /// Build the [`PageTree`] instance.
    #[must_use]
    pub fn build(self) -> PageTree {
        tracing::debug!(pages = self.pages.len(), "Built page tree");
        PageTree {
            pages: self.pages,
            parents: self.parents,
            children: self.children,
            drafts: self.drafts,
            site_children: self.site_children,
            site_drafts: self.site_drafts,
            path_index: self.path_index,
            blueprints: self.blueprints,
            access: self.access,
        }
    }
}
