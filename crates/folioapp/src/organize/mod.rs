//! # Organize Tree
//!
//! The sidebar tree a user arranges by hand: folders that hold links to
//! documents, tags and collections, nested arbitrarily deep.
//!
//! ## Rules
//!
//! - The root is virtual: it has no record and is always a folder.
//! - Only folders have children. Creating anything under a link fails.
//! - Links cannot live at the top level. Any found there are hidden from
//!   [`Node::children`] of the root.
//! - Removing a folder removes every record below it.
//!
//! Violations are reported as [`crate::error::FolioError`] right away; callers
//! are expected to check [`Node::node_type`] before offering an action.

use crate::error::Result;
use crate::model::FolderRecord;
use crate::store::{FolderStore, StorageBackend};
use std::rc::Rc;

mod node;

pub use node::Node;

/// One row of a depth-first walk over the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub depth: usize,
    pub record: FolderRecord,
}

pub struct OrganizeService<B: StorageBackend> {
    store: Rc<FolderStore<B>>,
}

impl<B: StorageBackend> OrganizeService<B> {
    pub fn new(store: FolderStore<B>) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    pub fn store(&self) -> &FolderStore<B> {
        &self.store
    }

    pub fn root_folder(&self) -> Node<B> {
        Node::new(None, Rc::clone(&self.store))
    }

    /// A handle for an arbitrary record id. The id is not checked.
    pub fn node(&self, id: &str) -> Node<B> {
        Node::new(Some(id.to_string()), Rc::clone(&self.store))
    }

    /// Depth-first listing of everything reachable from the root, in sibling order.
    pub fn walk(&self) -> Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        let mut stack: Vec<(usize, Node<B>)> = self
            .root_folder()
            .children()?
            .into_iter()
            .rev()
            .map(|node| (0, node))
            .collect();

        while let Some((depth, node)) = stack.pop() {
            let Some(record) = node.info()? else {
                continue;
            };
            for child in node.children()?.into_iter().rev() {
                stack.push((depth + 1, child));
            }
            entries.push(TreeEntry { depth, record });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::TreeFixture;

    #[test]
    fn walk_lists_tree_depth_first() {
        let fixture = TreeFixture::new();
        let service = OrganizeService::new(fixture.store);

        let rows: Vec<(usize, String)> = service
            .walk()
            .unwrap()
            .into_iter()
            .map(|e| (e.depth, e.record.data))
            .collect();

        assert_eq!(
            rows,
            vec![
                (0, "Work".to_string()),
                (1, "doc-a".to_string()),
                (1, "Archive".to_string()),
                (2, "tag-b".to_string()),
                (0, "Personal".to_string()),
            ]
        );
    }

    #[test]
    fn walk_of_empty_tree_is_empty() {
        let service = OrganizeService::new(crate::store::memory::InMemoryFolderStore::new());
        assert!(service.walk().unwrap().is_empty());
    }
}
