use crate::init::{initialize, FolioContext};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// A fresh context over this environment's data directory, as a new
    /// process would see it.
    pub fn context(&self, key: &str) -> FolioContext {
        initialize(Some(self.root.clone()), Some(key.to_string())).expect("failed to initialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkType;
    use crate::workbench::{OpenOptions, WorkbenchPosition, WorkbenchStateProvider};

    #[test]
    fn state_survives_reinitialization() {
        let env = TestEnv::new();
        {
            let mut ctx = env.context("main");
            let folder = ctx.organize.root_folder().create_folder("Work").unwrap();
            folder.create_link(LinkType::Doc, "doc-1").unwrap();
            ctx.workbench
                .open_doc("doc-1", None, OpenOptions::at(WorkbenchPosition::Beside))
                .unwrap();
        }

        let ctx = env.context("main");
        let rows = ctx.organize.walk().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(ctx.workbench.views().len(), 2);
        assert_eq!(ctx.workbench.active_view_index(), 1);
        assert_eq!(ctx.workbench.location().pathname, "/doc-1");
    }

    #[test]
    fn windows_keep_separate_workbenches() {
        let env = TestEnv::new();
        {
            let mut main = env.context("main");
            main.workbench.open_all(OpenOptions::default()).unwrap();
        }
        let side = env.context("side");
        assert_eq!(side.workbench.views().len(), 1);
        assert_eq!(side.workbench.location().pathname, "/");

        let doc = side.workbench.provider().tab_views_meta().value().unwrap();
        assert_eq!(doc.workbenches.len(), 2);
        assert_eq!(doc.active_workbench_key.as_deref(), Some("main"));

        let main = env.context("main");
        assert_eq!(main.workbench.location().pathname, "/all");
        assert_eq!(main.workbench.provider().views().unwrap().len(), 1);
    }
}
