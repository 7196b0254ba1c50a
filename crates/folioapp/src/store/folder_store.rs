use super::backend::{FolderTable, StorageBackend};
use super::FolderEvent;
use crate::error::{FolioError, Result};
use crate::model::{index_after, FolderRecord, LinkType};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use uuid::Uuid;

/// Handle returned by [`FolderStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(&FolderEvent)>;

pub struct FolderStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Cell<u64>,
}

impl<B: StorageBackend> FolderStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current record for `node_id`, if any.
    pub fn watch_node_info(&self, node_id: &str) -> Result<Option<FolderRecord>> {
        let records = self.backend.load_records()?;
        Ok(records.get(node_id).cloned())
    }

    /// Records whose parent is `parent_id` (`None` selects top-level records),
    /// ordered by sort key and then id.
    pub fn watch_node_children(&self, parent_id: Option<&str>) -> Result<Vec<FolderRecord>> {
        let records = self.backend.load_records()?;
        let mut children: Vec<FolderRecord> = records
            .into_values()
            .filter(|r| r.parent_id.as_deref() == parent_id)
            .collect();
        children.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.id.cmp(&b.id)));
        Ok(children)
    }

    /// Creates a folder under `parent_id` (or at the top level) and returns its id.
    pub fn create_folder(&self, parent_id: Option<&str>, name: &str) -> Result<String> {
        let mut records = self.backend.load_records()?;
        if let Some(parent_id) = parent_id {
            require_parent_folder(&records, parent_id)?;
        }

        let id = Uuid::new_v4().to_string();
        let index = next_sibling_index(&records, parent_id);
        let record = FolderRecord::folder(
            id.clone(),
            parent_id.map(str::to_string),
            name.to_string(),
            index,
        );
        records.insert(id.clone(), record.clone());
        self.backend.save_records(&records)?;

        tracing::debug!(%id, parent = ?parent_id, folder_name = name, "created folder");
        self.emit(&FolderEvent::Created(record));
        Ok(id)
    }

    /// Creates a link to `target_id` inside the folder `parent_id` and returns the link id.
    pub fn create_link(
        &self,
        parent_id: &str,
        link_type: LinkType,
        target_id: &str,
    ) -> Result<String> {
        let mut records = self.backend.load_records()?;
        require_parent_folder(&records, parent_id)?;

        let id = Uuid::new_v4().to_string();
        let index = next_sibling_index(&records, Some(parent_id));
        let record = FolderRecord::link(
            id.clone(),
            parent_id.to_string(),
            link_type,
            target_id.to_string(),
            index,
        );
        records.insert(id.clone(), record.clone());
        self.backend.save_records(&records)?;

        tracing::debug!(%id, parent = parent_id, kind = %record.node_type, target = target_id, "created link");
        self.emit(&FolderEvent::Created(record));
        Ok(id)
    }

    /// Deletes a folder together with everything below it.
    ///
    /// Walks the subtree with an explicit stack. Returns the removed ids,
    /// each parent listed before its children.
    pub fn remove_folder(&self, folder_id: &str) -> Result<Vec<String>> {
        let mut records = self.backend.load_records()?;
        match records.get(folder_id) {
            Some(info) if info.is_folder() => {}
            _ => return Err(FolioError::not_found("Folder not found")),
        }

        let mut removed = Vec::new();
        let mut stack = vec![folder_id.to_string()];
        while let Some(current) = stack.pop() {
            let Some(record) = records.remove(&current) else {
                continue;
            };
            if record.is_folder() {
                stack.extend(
                    records
                        .values()
                        .filter(|r| r.parent_id.as_deref() == Some(current.as_str()))
                        .map(|r| r.id.clone()),
                );
            }
            removed.push(current);
        }
        self.backend.save_records(&records)?;

        tracing::debug!(id = folder_id, count = removed.len(), "removed folder subtree");
        self.emit(&FolderEvent::Removed(removed.clone()));
        Ok(removed)
    }

    pub fn remove_link(&self, link_id: &str) -> Result<()> {
        let mut records = self.backend.load_records()?;
        match records.get(link_id) {
            Some(link) if !link.is_folder() => {}
            _ => return Err(FolioError::not_found("Link not found")),
        }
        records.remove(link_id);
        self.backend.save_records(&records)?;

        tracing::debug!(id = link_id, "removed link");
        self.emit(&FolderEvent::Removed(vec![link_id.to_string()]));
        Ok(())
    }

    pub fn rename_folder(&self, folder_id: &str, name: &str) -> Result<()> {
        let mut records = self.backend.load_records()?;
        let record = match records.get_mut(folder_id) {
            Some(record) if record.is_folder() => record,
            _ => return Err(FolioError::not_found("Folder not found")),
        };
        record.data = name.to_string();
        let updated = record.clone();
        self.backend.save_records(&records)?;

        tracing::debug!(id = folder_id, folder_name = name, "renamed folder");
        self.emit(&FolderEvent::Updated(updated));
        Ok(())
    }

    /// Overrides the sort key of a record.
    pub fn set_index(&self, node_id: &str, index: &str) -> Result<()> {
        let mut records = self.backend.load_records()?;
        let record = records
            .get_mut(node_id)
            .ok_or_else(|| FolioError::not_found("Node not found"))?;
        record.index = index.to_string();
        let updated = record.clone();
        self.backend.save_records(&records)?;

        self.emit(&FolderEvent::Updated(updated));
        Ok(())
    }

    /// Registers a callback invoked after every mutation.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FolderEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    fn emit(&self, event: &FolderEvent) {
        // Snapshot so callbacks may subscribe or unsubscribe while we iterate.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in subscribers {
            callback(event);
        }
    }
}

fn require_parent_folder(records: &FolderTable, parent_id: &str) -> Result<()> {
    match records.get(parent_id) {
        Some(parent) if parent.is_folder() => Ok(()),
        _ => Err(FolioError::not_found("Parent folder not found")),
    }
}

fn next_sibling_index(records: &FolderTable, parent_id: Option<&str>) -> String {
    let last = records
        .values()
        .filter(|r| r.parent_id.as_deref() == parent_id)
        .map(|r| r.index.as_str())
        .max();
    index_after(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;
    use crate::store::mem_backend::MemBackend;
    use crate::store::memory::InMemoryFolderStore;

    #[test]
    fn creates_top_level_folder() {
        let store = InMemoryFolderStore::new();
        let id = store.create_folder(None, "Projects").unwrap();

        let info = store.watch_node_info(&id).unwrap().unwrap();
        assert_eq!(info.node_type, NodeType::Folder);
        assert_eq!(info.data, "Projects");
        assert_eq!(info.parent_id, None);
    }

    #[test]
    fn create_folder_requires_existing_parent() {
        let store = InMemoryFolderStore::new();
        let err = store.create_folder(Some("missing"), "X").unwrap_err();
        assert_eq!(err.to_string(), "Parent folder not found");
    }

    #[test]
    fn create_folder_rejects_link_parent() {
        let store = InMemoryFolderStore::new();
        let folder = store.create_folder(None, "A").unwrap();
        let link = store.create_link(&folder, LinkType::Doc, "doc-1").unwrap();

        let err = store.create_folder(Some(&link), "X").unwrap_err();
        assert_eq!(err.to_string(), "Parent folder not found");
    }

    #[test]
    fn create_link_stores_target_in_data() {
        let store = InMemoryFolderStore::new();
        let folder = store.create_folder(None, "A").unwrap();
        let link = store.create_link(&folder, LinkType::Tag, "tag-7").unwrap();

        let info = store.watch_node_info(&link).unwrap().unwrap();
        assert_eq!(info.node_type, NodeType::Tag);
        assert_eq!(info.data, "tag-7");
        assert_eq!(info.parent_id.as_deref(), Some(folder.as_str()));
    }

    #[test]
    fn same_target_can_be_linked_twice() {
        let store = InMemoryFolderStore::new();
        let a = store.create_folder(None, "A").unwrap();
        let b = store.create_folder(None, "B").unwrap();
        let l1 = store.create_link(&a, LinkType::Doc, "doc-1").unwrap();
        let l2 = store.create_link(&b, LinkType::Doc, "doc-1").unwrap();
        assert_ne!(l1, l2);
        assert_eq!(store.backend().len(), 4);
    }

    #[test]
    fn children_are_ordered_by_index() {
        let store = InMemoryFolderStore::new();
        let first = store.create_folder(None, "first").unwrap();
        let second = store.create_folder(None, "second").unwrap();
        let third = store.create_folder(None, "third").unwrap();

        let names: Vec<String> = store
            .watch_node_children(None)
            .unwrap()
            .into_iter()
            .map(|r| r.data)
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);

        // Move "first" to the end
        store.set_index(&first, "zz").unwrap();
        let ids: Vec<String> = store
            .watch_node_children(None)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![second, third, first]);
    }

    #[test]
    fn remove_folder_deletes_descendants() {
        let store = InMemoryFolderStore::new();
        let keep = store.create_folder(None, "keep").unwrap();
        let root = store.create_folder(None, "root").unwrap();
        let child = store.create_folder(Some(&root), "child").unwrap();
        let grandchild = store.create_folder(Some(&child), "grandchild").unwrap();
        store.create_link(&root, LinkType::Doc, "d1").unwrap();
        store.create_link(&grandchild, LinkType::Collection, "c1").unwrap();
        store.create_link(&keep, LinkType::Doc, "d2").unwrap();

        let removed = store.remove_folder(&root).unwrap();
        assert_eq!(removed.len(), 5);
        assert_eq!(removed[0], root);

        let remaining = store.backend().load_records().unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.values().all(|r| r.id == keep
            || r.parent_id.as_deref() == Some(keep.as_str())));
    }

    #[test]
    fn remove_folder_rejects_links_and_missing() {
        let store = InMemoryFolderStore::new();
        let folder = store.create_folder(None, "A").unwrap();
        let link = store.create_link(&folder, LinkType::Doc, "d").unwrap();

        assert_eq!(
            store.remove_folder(&link).unwrap_err().to_string(),
            "Folder not found"
        );
        assert_eq!(
            store.remove_folder("nope").unwrap_err().to_string(),
            "Folder not found"
        );
    }

    #[test]
    fn remove_link_rejects_folders() {
        let store = InMemoryFolderStore::new();
        let folder = store.create_folder(None, "A").unwrap();
        let err = store.remove_link(&folder).unwrap_err();
        assert_eq!(err.to_string(), "Link not found");

        let link = store.create_link(&folder, LinkType::Doc, "d").unwrap();
        store.remove_link(&link).unwrap();
        assert!(store.watch_node_info(&link).unwrap().is_none());
    }

    #[test]
    fn rename_folder_updates_data() {
        let store = InMemoryFolderStore::new();
        let folder = store.create_folder(None, "Old").unwrap();
        store.rename_folder(&folder, "New").unwrap();
        assert_eq!(store.watch_node_info(&folder).unwrap().unwrap().data, "New");
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let store = InMemoryFolderStore::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let sub = store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let folder = store.create_folder(None, "A").unwrap();
        let link = store.create_link(&folder, LinkType::Doc, "d").unwrap();
        store.remove_folder(&folder).unwrap();

        {
            let events = events.borrow();
            assert_eq!(events.len(), 3);
            assert!(matches!(&events[0], FolderEvent::Created(r) if r.id == folder));
            assert!(matches!(&events[1], FolderEvent::Created(r) if r.id == link));
            assert_eq!(events[2], FolderEvent::Removed(vec![folder.clone(), link.clone()]));
        }

        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.create_folder(None, "B").unwrap();
        assert_eq!(events.borrow().len(), 3);
    }

    #[test]
    fn failed_write_emits_nothing() {
        let store = FolderStore::with_backend(MemBackend::new());
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.backend().set_simulate_write_error(true);
        assert!(store.create_folder(None, "A").is_err());
        assert_eq!(count.get(), 0);
        assert!(store.backend().is_empty());
    }
}
