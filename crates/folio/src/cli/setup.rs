use clap::{Parser, Subcommand};
use folioapp::model::LinkType;
use folioapp::workbench::WorkbenchPosition;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    bin_name = "folio",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Organize folders and workbench views from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $FOLIO_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Window whose workbench to use (defaults to the tab_view_key setting)
    #[arg(short, long, global = true, value_name = "KEY", help_heading = "Options")]
    pub window: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the organize tree
    #[command(display_order = 1)]
    Tree,

    /// Create, rename or remove folders
    #[command(display_order = 2)]
    Folder {
        #[command(subcommand)]
        action: FolderCommands,
    },

    /// Add or remove links to docs, tags and collections
    #[command(display_order = 3)]
    Link {
        #[command(subcommand)]
        action: LinkCommands,
    },

    /// List the open views of this window
    #[command(alias = "ls", display_order = 10)]
    Views,

    /// Navigate a view to a location, e.g. /all or /collection/c1
    #[command(display_order = 11)]
    Open {
        to: String,

        /// Which view: active, beside, head, tail or an index
        #[arg(long, default_value = "active")]
        at: WorkbenchPosition,

        /// Replace the current history entry instead of pushing
        #[arg(long)]
        replace: bool,
    },

    /// Open a document, optionally scrolled to a block
    #[command(display_order = 12)]
    OpenDoc {
        doc: String,

        #[arg(long)]
        block: Option<String>,

        /// Which view: active, beside, head, tail or an index
        #[arg(long, default_value = "active")]
        at: WorkbenchPosition,

        /// Replace the current history entry instead of pushing
        #[arg(long)]
        replace: bool,
    },

    /// Make the view at INDEX active
    #[command(display_order = 13)]
    Activate { index: usize },

    /// Close a view (the last one is kept)
    #[command(display_order = 14)]
    Close { view: String },

    /// Close every view except this one
    #[command(display_order = 15)]
    CloseOthers { view: String },

    /// Swap the views at FROM and TO
    #[command(name = "move", display_order = 16)]
    MoveView { from: usize, to: usize },

    /// Move the border after view INDEX by a fraction of the total width
    #[command(display_order = 17)]
    Resize {
        index: usize,

        /// Between -1 and 1, e.g. 0.25 or -0.1
        #[arg(allow_negative_numbers = true)]
        fraction: f64,
    },

    /// Show or set this window's basename
    #[command(display_order = 20)]
    Basename { value: Option<String> },

    /// Pin this window's workbench
    #[command(display_order = 21)]
    Pin,

    /// Unpin this window's workbench
    #[command(display_order = 22)]
    Unpin,

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder (top level unless --parent is given)
    Create {
        name: String,

        /// Id of the parent folder
        #[arg(long, short)]
        parent: Option<String>,
    },

    /// Rename a folder
    Rename { id: String, name: String },

    /// Remove a folder and everything inside it
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LinkCommands {
    /// Link a doc, tag or collection into a folder
    Create {
        /// Id of the folder to add the link to
        parent: String,

        /// doc, tag or collection
        link_type: LinkType,

        /// Id of the linked record
        target: String,
    },

    /// Remove a link
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate a config file with every key and its default
    Gen {
        /// Write to this path instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print one resolved value
    Get { key: String },

    /// Set a value in the data directory's folio.toml
    Set { key: String, value: String },
}
