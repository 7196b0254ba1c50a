use crate::model::{ModuleName, ViewMeta, ViewPath};

/// Relative size a view starts with, and is reset to by `close_others`.
pub const DEFAULT_VIEW_SIZE: f64 = 100.0;

/// In-memory navigation stack of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<ViewPath>,
    index: usize,
}

impl History {
    pub fn new(initial: ViewPath) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn location(&self) -> &ViewPath {
        &self.entries[self.index]
    }

    /// Navigates to `to`, dropping any forward entries.
    pub fn push(&mut self, to: ViewPath) {
        self.entries.truncate(self.index + 1);
        self.entries.push(to);
        self.index += 1;
    }

    /// Swaps the current entry for `to`.
    pub fn replace(&mut self, to: ViewPath) {
        self.entries[self.index] = to;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Returns false when already at the oldest entry.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One navigable pane of the workbench.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    id: String,
    history: History,
    size: f64,
    title: Option<String>,
}

impl View {
    pub fn new(id: impl Into<String>, default_location: Option<ViewPath>) -> Self {
        Self {
            id: id.into(),
            history: History::new(default_location.unwrap_or_else(ViewPath::root)),
            size: DEFAULT_VIEW_SIZE,
            title: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> &ViewPath {
        self.history.location()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Snapshot for the state provider.
    pub fn meta(&self) -> ViewMeta {
        let path = self.location().clone();
        ViewMeta {
            id: self.id.clone(),
            module_name: ModuleName::from_path(&path),
            path: Some(path),
            title: self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_view_defaults_to_root() {
        let view = View::new("v1", None);
        assert_eq!(view.location().pathname, "/");
        assert_eq!(view.size(), DEFAULT_VIEW_SIZE);
        assert_eq!(view.history().len(), 1);
    }

    #[test]
    fn push_then_back_and_forward() {
        let mut history = History::new(ViewPath::parse("/all"));
        history.push(ViewPath::parse("/doc-1"));
        history.push(ViewPath::parse("/doc-2"));
        assert_eq!(history.location().pathname, "/doc-2");

        assert!(history.back());
        assert!(history.back());
        assert!(!history.back());
        assert_eq!(history.location().pathname, "/all");

        assert!(history.forward());
        assert_eq!(history.location().pathname, "/doc-1");
    }

    #[test]
    fn push_drops_forward_entries() {
        let mut history = History::new(ViewPath::parse("/a"));
        history.push(ViewPath::parse("/b"));
        history.back();
        history.push(ViewPath::parse("/c"));

        assert_eq!(history.len(), 2);
        assert!(!history.can_go_forward());
        assert_eq!(history.location().pathname, "/c");
    }

    #[test]
    fn replace_keeps_length() {
        let mut history = History::new(ViewPath::parse("/a"));
        history.push(ViewPath::parse("/b"));
        history.replace(ViewPath::parse("/c"));
        assert_eq!(history.len(), 2);
        history.back();
        assert_eq!(history.location().pathname, "/a");
    }

    #[test]
    fn meta_carries_module_and_path() {
        let mut view = View::new("v1", Some(ViewPath::parse("/tag/t1")));
        view.set_title(Some("Tags".into()));
        let meta = view.meta();
        assert_eq!(meta.id, "v1");
        assert_eq!(meta.module_name, Some(ModuleName::Tag));
        assert_eq!(meta.path.unwrap().pathname, "/tag/t1");
        assert_eq!(meta.title.as_deref(), Some("Tags"));
    }
}
