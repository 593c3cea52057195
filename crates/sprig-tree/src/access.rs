//! Read access policies.
//!
//! The navigator never shows a page the caller may not read. Whether a page
//! is readable is decided by a [`ReadAccess`] implementation installed on the
//! [`PageTree`](crate::PageTree).

use crate::blueprint::Blueprint;
use crate::page::Page;

/// Decides whether the current caller may read a page.
pub trait ReadAccess: Send + Sync {
    /// Check read access for `page`, whose blueprint (if any) is `blueprint`.
    fn can_read(&self, page: &Page, blueprint: Option<&Blueprint>) -> bool;
}

/// Grants read access according to the blueprint's `options.read` flag.
///
/// Pages without a blueprint are readable.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlueprintAccess;

impl ReadAccess for BlueprintAccess {
    fn can_read(&self, _page: &Page, blueprint: Option<&Blueprint>) -> bool {
        blueprint.is_none_or(|b| b.options.read)
    }
}

/// Grants read access to every page.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl ReadAccess for AllowAll {
    fn can_read(&self, _page: &Page, _blueprint: Option<&Blueprint>) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::blueprint::BlueprintOptions;
    use crate::page::Status;

    fn page() -> Page {
        Page {
            slug: "a".to_owned(),
            path: "a".to_owned(),
            title: "A".to_owned(),
            status: Status::Unlisted,
            num: None,
            template: "default".to_owned(),
            content: BTreeMap::new(),
        }
    }

    #[test]
    fn test_blueprint_access_without_blueprint() {
        assert!(BlueprintAccess.can_read(&page(), None));
    }

    #[test]
    fn test_blueprint_access_respects_read_option() {
        let hidden = Blueprint {
            options: BlueprintOptions { read: false },
            ..Default::default()
        };
        assert!(!BlueprintAccess.can_read(&page(), Some(&hidden)));
        assert!(BlueprintAccess.can_read(&page(), Some(&Blueprint::default())));
    }

    #[test]
    fn test_allow_all_ignores_blueprint() {
        let hidden = Blueprint {
            options: BlueprintOptions { read: false },
            ..Default::default()
        };
        assert!(AllowAll.can_read(&page(), Some(&hidden)));
    }
}
