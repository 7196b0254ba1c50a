use crate::error::{FolioError, Result};
use crate::model::{FolderRecord, LinkType, NodeType};
use crate::store::{FolderStore, StorageBackend};
use std::rc::Rc;

/// One entry of the organize tree.
///
/// A node only remembers its id; type, name, index and children are derived
/// from the store on every call, so they always reflect the latest mutation.
/// The node with id `None` is the root.
pub struct Node<B: StorageBackend> {
    id: Option<String>,
    store: Rc<FolderStore<B>>,
}

impl<B: StorageBackend> Clone for Node<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            store: Rc::clone(&self.store),
        }
    }
}

impl<B: StorageBackend> std::fmt::Debug for Node<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node").field("id", &self.id).finish()
    }
}

impl<B: StorageBackend> Node<B> {
    pub(crate) fn new(id: Option<String>, store: Rc<FolderStore<B>>) -> Self {
        Self { id, store }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }

    /// The backing record. The root has none.
    pub fn info(&self) -> Result<Option<FolderRecord>> {
        match &self.id {
            Some(id) => self.store.watch_node_info(id),
            None => Ok(None),
        }
    }

    /// The root is always a folder; a node whose record is gone has no type.
    pub fn node_type(&self) -> Result<Option<NodeType>> {
        if self.is_root() {
            return Ok(Some(NodeType::Folder));
        }
        Ok(self.info()?.map(|info| info.node_type))
    }

    pub fn is_folder(&self) -> Result<bool> {
        Ok(self.node_type()? == Some(NodeType::Folder))
    }

    /// Folder name, empty for links.
    pub fn name(&self) -> Result<String> {
        Ok(self
            .info()?
            .filter(FolderRecord::is_folder)
            .map(|info| info.data)
            .unwrap_or_default())
    }

    pub fn index(&self) -> Result<String> {
        Ok(self.info()?.map(|info| info.index).unwrap_or_default())
    }

    /// Link target id, `None` for folders.
    pub fn target(&self) -> Result<Option<String>> {
        Ok(self
            .info()?
            .filter(|info| !info.is_folder())
            .map(|info| info.data))
    }

    /// Children of a folder; links and missing nodes have none.
    ///
    /// The root only yields folders: stray links at the top level are skipped.
    pub fn children(&self) -> Result<Vec<Node<B>>> {
        if !self.is_folder()? {
            return Ok(Vec::new());
        }
        let children = self.store.watch_node_children(self.id.as_deref())?;
        Ok(children
            .into_iter()
            .filter(|child| self.accepts_child(child))
            .map(|child| Node::new(Some(child.id), Rc::clone(&self.store)))
            .collect())
    }

    fn accepts_child(&self, child: &FolderRecord) -> bool {
        !(self.is_root() && !child.is_folder())
    }

    pub fn create_folder(&self, name: &str) -> Result<Node<B>> {
        if !self.is_folder()? {
            return Err(FolioError::invalid(
                "Cannot create folder on non-folder node",
            ));
        }
        let id = self.store.create_folder(self.id.as_deref(), name)?;
        Ok(Node::new(Some(id), Rc::clone(&self.store)))
    }

    pub fn create_link(&self, link_type: LinkType, target_id: &str) -> Result<Node<B>> {
        let Some(id) = self.id.as_deref() else {
            return Err(FolioError::invalid("Cannot create link on root node"));
        };
        if !self.is_folder()? {
            return Err(FolioError::invalid("Cannot create link on non-folder node"));
        }
        let link_id = self.store.create_link(id, link_type, target_id)?;
        Ok(Node::new(Some(link_id), Rc::clone(&self.store)))
    }

    /// Removes a direct child. Folders take their whole subtree with them.
    /// Returns the ids of every removed record, parents first.
    pub fn remove_child(&self, child: &Node<B>) -> Result<Vec<String>> {
        let Some(child_id) = child.id() else {
            return Err(FolioError::not_found("Child not found"));
        };
        if !self.children()?.iter().any(|c| c.id() == Some(child_id)) {
            return Err(FolioError::not_found("Child not found"));
        }
        if child.is_folder()? {
            self.store.remove_folder(child_id)
        } else {
            self.store.remove_link(child_id)?;
            Ok(vec![child_id.to_string()])
        }
    }

    /// The folder this node lives in: the root for top-level nodes, `None`
    /// for the root itself or a node whose record is gone.
    pub fn parent(&self) -> Result<Option<Node<B>>> {
        let Some(info) = self.info()? else {
            return Ok(None);
        };
        Ok(Some(Node::new(info.parent_id, Rc::clone(&self.store))))
    }

    pub fn rename(&self, name: &str) -> Result<()> {
        let Some(id) = self.id.as_deref() else {
            return Err(FolioError::invalid("Cannot rename root node"));
        };
        if !self.is_folder()? {
            return Err(FolioError::invalid("Cannot rename non-folder node"));
        }
        self.store.rename_folder(id, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organize::OrganizeService;
    use crate::store::memory::fixtures::TreeFixture;
    use crate::store::memory::InMemoryFolderStore;
    use crate::store::mem_backend::MemBackend;

    fn service() -> OrganizeService<MemBackend> {
        OrganizeService::new(InMemoryFolderStore::new())
    }

    #[test]
    fn root_is_a_folder_without_record() {
        let service = service();
        let root = service.root_folder();
        assert!(root.is_root());
        assert_eq!(root.node_type().unwrap(), Some(NodeType::Folder));
        assert_eq!(root.name().unwrap(), "");
        assert!(root.info().unwrap().is_none());
        assert!(root.children().unwrap().is_empty());
    }

    #[test]
    fn created_folder_shows_up_in_children() {
        let service = service();
        let root = service.root_folder();
        let folder = root.create_folder("Inbox").unwrap();

        let children = root.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].id(), folder.id());
        assert_eq!(children[0].name().unwrap(), "Inbox");
        assert_eq!(children[0].node_type().unwrap(), Some(NodeType::Folder));
        assert!(!children[0].index().unwrap().is_empty());
    }

    #[test]
    fn root_children_are_folders_only() {
        let fixture = TreeFixture::new();
        // A link written straight into the top level, bypassing Node checks.
        let mut records = fixture.store.backend().load_records().unwrap();
        records.insert(
            "stray".into(),
            FolderRecord {
                id: "stray".into(),
                parent_id: None,
                node_type: NodeType::Doc,
                data: "doc-x".into(),
                index: "a0".into(),
            },
        );
        crate::store::StorageBackend::save_records(fixture.store.backend(), &records).unwrap();

        let service = OrganizeService::new(fixture.store);
        let children = service.root_folder().children().unwrap();
        assert_eq!(children.len(), 2);
        for child in children {
            assert_eq!(child.node_type().unwrap(), Some(NodeType::Folder));
        }
    }

    #[test]
    fn links_have_no_children_and_no_name() {
        let service = service();
        let folder = service.root_folder().create_folder("F").unwrap();
        let link = folder.create_link(LinkType::Doc, "doc-1").unwrap();

        assert_eq!(link.node_type().unwrap(), Some(NodeType::Doc));
        assert_eq!(link.name().unwrap(), "");
        assert_eq!(link.target().unwrap().as_deref(), Some("doc-1"));
        assert!(link.children().unwrap().is_empty());
    }

    #[test]
    fn cannot_create_link_on_root() {
        let service = service();
        let err = service
            .root_folder()
            .create_link(LinkType::Doc, "doc-1")
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot create link on root node");
    }

    #[test]
    fn cannot_create_under_link() {
        let service = service();
        let folder = service.root_folder().create_folder("F").unwrap();
        let link = folder.create_link(LinkType::Collection, "c1").unwrap();

        let err = link.create_folder("nested").unwrap_err();
        assert_eq!(err.to_string(), "Cannot create folder on non-folder node");

        let err = link.create_link(LinkType::Doc, "d").unwrap_err();
        assert_eq!(err.to_string(), "Cannot create link on non-folder node");
    }

    #[test]
    fn remove_child_folder_removes_subtree() {
        let fixture = TreeFixture::new();
        let service = OrganizeService::new(fixture.store);
        let root = service.root_folder();
        let work = service.node(&fixture.work);

        let removed = root.remove_child(&work).unwrap();
        assert_eq!(removed.len(), 4);
        assert_eq!(removed[0], fixture.work);

        for id in [&fixture.work, &fixture.archive, &fixture.doc_link, &fixture.tag_link] {
            assert!(service.node(id).info().unwrap().is_none());
        }
        let remaining = root.children().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), Some(fixture.personal.as_str()));
    }

    #[test]
    fn remove_child_link() {
        let fixture = TreeFixture::new();
        let service = OrganizeService::new(fixture.store);
        let work = service.node(&fixture.work);
        let link = service.node(&fixture.doc_link);

        assert_eq!(work.remove_child(&link).unwrap(), vec![fixture.doc_link.clone()]);
        assert_eq!(work.children().unwrap().len(), 1);
        assert!(link.node_type().unwrap().is_none());
    }

    #[test]
    fn parent_resolves_containing_folder() {
        let fixture = TreeFixture::new();
        let service = OrganizeService::new(fixture.store);

        let work = service.node(&fixture.work).parent().unwrap().unwrap();
        assert!(work.is_root());

        let archive = service.node(&fixture.tag_link).parent().unwrap().unwrap();
        assert_eq!(archive.id(), Some(fixture.archive.as_str()));

        assert!(service.root_folder().parent().unwrap().is_none());
        assert!(service.node("missing").parent().unwrap().is_none());
    }

    #[test]
    fn remove_child_requires_direct_child() {
        let fixture = TreeFixture::new();
        let service = OrganizeService::new(fixture.store);
        let root = service.root_folder();

        // Grandchild of root
        let archive = service.node(&fixture.archive);
        assert_eq!(
            root.remove_child(&archive).unwrap_err().to_string(),
            "Child not found"
        );

        // The root itself
        assert_eq!(
            root.remove_child(&service.root_folder()).unwrap_err().to_string(),
            "Child not found"
        );
        assert!(archive.info().unwrap().is_some());
    }

    #[test]
    fn rename_folder_node() {
        let service = service();
        let folder = service.root_folder().create_folder("Old").unwrap();
        folder.rename("New").unwrap();
        assert_eq!(folder.name().unwrap(), "New");

        let link = folder.create_link(LinkType::Tag, "t").unwrap();
        assert!(link.rename("x").is_err());
        assert!(service.root_folder().rename("x").is_err());
    }

    #[test]
    fn derived_state_follows_store_changes() {
        let service = service();
        let root = service.root_folder();
        let folder = root.create_folder("A").unwrap();
        let handle = service.node(folder.id().unwrap());

        service.store().rename_folder(folder.id().unwrap(), "B").unwrap();
        assert_eq!(handle.name().unwrap(), "B");

        service.store().remove_folder(folder.id().unwrap()).unwrap();
        assert_eq!(handle.node_type().unwrap(), None);
        assert!(handle.children().unwrap().is_empty());
    }
}
