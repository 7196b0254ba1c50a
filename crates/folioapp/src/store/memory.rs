use super::folder_store::FolderStore;
use super::mem_backend::MemBackend;

pub type InMemoryFolderStore = FolderStore<MemBackend>;

impl Default for InMemoryFolderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryFolderStore {
    pub fn new() -> Self {
        FolderStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::LinkType;

    /// Builds a small tree:
    ///
    /// ```text
    /// Work/
    ///   doc-a (doc)
    ///   Archive/
    ///     tag-b (tag)
    /// Personal/
    /// ```
    pub struct TreeFixture {
        pub store: InMemoryFolderStore,
        pub work: String,
        pub archive: String,
        pub personal: String,
        pub doc_link: String,
        pub tag_link: String,
    }

    impl Default for TreeFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TreeFixture {
        pub fn new() -> Self {
            let store = InMemoryFolderStore::new();
            let work = store.create_folder(None, "Work").unwrap();
            let doc_link = store.create_link(&work, LinkType::Doc, "doc-a").unwrap();
            let archive = store.create_folder(Some(&work), "Archive").unwrap();
            let tag_link = store.create_link(&archive, LinkType::Tag, "tag-b").unwrap();
            let personal = store.create_folder(None, "Personal").unwrap();
            Self {
                store,
                work,
                archive,
                personal,
                doc_link,
                tag_link,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::TreeFixture;
    use crate::model::NodeType;

    #[test]
    fn fixture_builds_expected_tree() {
        let fixture = TreeFixture::new();
        let top = fixture.store.watch_node_children(None).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].data, "Work");
        assert_eq!(top[1].data, "Personal");

        let work_children = fixture
            .store
            .watch_node_children(Some(&fixture.work))
            .unwrap();
        assert_eq!(work_children.len(), 2);
        assert_eq!(work_children[0].node_type, NodeType::Doc);
        assert_eq!(work_children[1].id, fixture.archive);
    }
}
