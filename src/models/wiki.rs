//! Wiki models
//!
//! A wiki is a root document with an ordered tree of pages beneath it.
//! Pages reference their parent page (or none, for top-level pages) and
//! carry a display order within their parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wiki root entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wiki {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Markdown content of the wiki's front page
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single page within a wiki
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiPage {
    pub id: i64,
    /// Owning wiki
    pub wiki_id: i64,
    /// Parent page within the same wiki, None for top-level pages
    pub parent_id: Option<i64>,
    pub title: String,
    /// Markdown content
    pub content: String,
    /// Order among siblings
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A wiki page with its nested children, for table-of-contents display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiPageNode {
    #[serde(flatten)]
    pub page: WikiPage,
    pub children: Vec<WikiPageNode>,
}

impl WikiPageNode {
    pub fn new(page: WikiPage) -> Self {
        Self {
            page,
            children: Vec::new(),
        }
    }
}

/// Assemble a flat page list into an ordered tree.
///
/// Pages are nested under their parent and siblings are ordered by
/// `display_order`, then id for a stable tie-break. Pages whose parent
/// is missing from the list are treated as top-level.
pub fn build_page_tree(mut pages: Vec<WikiPage>) -> Vec<WikiPageNode> {
    pages.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then(a.id.cmp(&b.id))
    });

    let ids: std::collections::HashSet<i64> = pages.iter().map(|p| p.id).collect();
    let mut children_of: std::collections::HashMap<Option<i64>, Vec<WikiPage>> =
        std::collections::HashMap::new();
    for page in pages {
        let key = match page.parent_id {
            Some(pid) if ids.contains(&pid) => Some(pid),
            _ => None,
        };
        children_of.entry(key).or_default().push(page);
    }

    fn attach(
        parent: Option<i64>,
        children_of: &mut std::collections::HashMap<Option<i64>, Vec<WikiPage>>,
    ) -> Vec<WikiPageNode> {
        let pages = children_of.remove(&parent).unwrap_or_default();
        pages
            .into_iter()
            .map(|page| {
                let children = attach(Some(page.id), children_of);
                WikiPageNode { page, children }
            })
            .collect()
    }

    attach(None, &mut children_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: i64, parent_id: Option<i64>, display_order: i32) -> WikiPage {
        let now = Utc::now();
        WikiPage {
            id,
            wiki_id: 1,
            parent_id,
            title: format!("page-{}", id),
            content: String::new(),
            display_order,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_tree_nesting() {
        let tree = build_page_tree(vec![
            page(1, None, 0),
            page(2, Some(1), 0),
            page(3, Some(1), 1),
            page(4, None, 1),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].page.id, 1);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].page.id, 2);
        assert_eq!(tree[0].children[1].page.id, 3);
        assert_eq!(tree[1].page.id, 4);
    }

    #[test]
    fn test_tree_sibling_order() {
        let tree = build_page_tree(vec![page(1, None, 5), page(2, None, 1), page(3, None, 3)]);
        let ids: Vec<i64> = tree.iter().map(|n| n.page.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_tree_orphan_becomes_top_level() {
        let tree = build_page_tree(vec![page(1, None, 0), page(2, Some(99), 0)]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_tree_empty() {
        assert!(build_page_tree(Vec::new()).is_empty());
    }
}
