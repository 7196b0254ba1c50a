//! # Domain Model
//!
//! Records and value types shared by the organize tree and the workbench.
//!
//! ## Folder Records
//!
//! The organize tree is stored as a flat table of [`FolderRecord`]s. Each
//! record points at its parent (`None` for top-level records) and carries a
//! [`NodeType`]:
//!
//! - `folder`: `data` holds the folder name, may have children
//! - `doc` / `tag` / `collection`: links, `data` holds the target id
//!
//! `index` is a lexicographic sort key among siblings, see [`index_after`].
//!
//! ## View Paths
//!
//! A [`ViewPath`] is a location split into `pathname`, `search` and `hash`
//! the way browser history does it: `search` keeps its leading `?` and
//! `hash` its leading `#`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FolioError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Folder,
    Doc,
    Tag,
    Collection,
}

impl NodeType {
    pub fn is_folder(self) -> bool {
        matches!(self, NodeType::Folder)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Folder => "folder",
            NodeType::Doc => "doc",
            NodeType::Tag => "tag",
            NodeType::Collection => "collection",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kinds of record a link may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Doc,
    Tag,
    Collection,
}

impl From<LinkType> for NodeType {
    fn from(link: LinkType) -> Self {
        match link {
            LinkType::Doc => NodeType::Doc,
            LinkType::Tag => NodeType::Tag,
            LinkType::Collection => NodeType::Collection,
        }
    }
}

impl FromStr for LinkType {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc" => Ok(LinkType::Doc),
            "tag" => Ok(LinkType::Tag),
            "collection" => Ok(LinkType::Collection),
            other => Err(FolioError::Api(format!(
                "Unknown link type '{}' (expected doc, tag or collection)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub id: String,
    pub parent_id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub data: String,
    pub index: String,
}

impl FolderRecord {
    pub fn folder(id: String, parent_id: Option<String>, name: String, index: String) -> Self {
        Self {
            id,
            parent_id,
            node_type: NodeType::Folder,
            data: name,
            index,
        }
    }

    pub fn link(
        id: String,
        parent_id: String,
        link_type: LinkType,
        target_id: String,
        index: String,
    ) -> Self {
        Self {
            id,
            parent_id: Some(parent_id),
            node_type: link_type.into(),
            data: target_id,
            index,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.node_type.is_folder()
    }
}

const INDEX_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Returns a sort key that orders strictly after `prev`.
///
/// Bumps the last character when it has a successor in the alphabet and
/// appends one otherwise. Every key produced this way is greater than `prev`
/// and, when `prev` is the largest sibling key, greater than all siblings.
pub fn index_after(prev: Option<&str>) -> String {
    let Some(prev) = prev.filter(|p| !p.is_empty()) else {
        return "a0".to_string();
    };

    let mut key = prev.to_string();
    let last = key.as_bytes()[key.len() - 1];
    match INDEX_ALPHABET.iter().position(|&c| c == last) {
        Some(pos) if pos + 1 < INDEX_ALPHABET.len() => {
            key.pop();
            key.push(INDEX_ALPHABET[pos + 1] as char);
        }
        _ => key.push('1'),
    }
    key
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewPath {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl ViewPath {
    /// Splits a location such as `/doc-1?mode=page#block` into its parts.
    pub fn parse(to: &str) -> Self {
        let (rest, hash) = match to.find('#') {
            Some(pos) => (&to[..pos], &to[pos..]),
            None => (to, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        Self {
            pathname: if pathname.is_empty() {
                "/".to_string()
            } else {
                pathname.to_string()
            },
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    pub fn root() -> Self {
        Self::parse("/")
    }
}

impl From<&str> for ViewPath {
    fn from(to: &str) -> Self {
        Self::parse(to)
    }
}

impl fmt::Display for ViewPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Route module a view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleName {
    Trash,
    All,
    Collection,
    Tag,
    Doc,
    Journal,
}

impl ModuleName {
    /// Infers the module from the first path segment, treating any unknown
    /// segment as a document id.
    pub fn from_path(path: &ViewPath) -> Option<Self> {
        let segment = path.pathname.trim_start_matches('/').split('/').next()?;
        match segment {
            "" => None,
            "trash" => Some(ModuleName::Trash),
            "all" => Some(ModuleName::All),
            "collection" => Some(ModuleName::Collection),
            "tag" => Some(ModuleName::Tag),
            "journals" | "journal" => Some(ModuleName::Journal),
            _ => Some(ModuleName::Doc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMeta {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<ViewPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<ModuleName>,
}

impl ViewMeta {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            title: None,
            module_name: None,
        }
    }

    pub fn with_path(mut self, path: ViewPath) -> Self {
        self.path = Some(path);
        self
    }
}
