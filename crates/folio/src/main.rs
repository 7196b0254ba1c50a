//! # Folio CLI
//!
//! The binary is thin: argument parsing, rendering and process exit live in
//! `src/cli/`, everything else is the `folioapp` library.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/folio/src/cli/)                    │
//! │  - clap argument parsing (setup.rs)                   │
//! │  - context wiring + dispatch (commands.rs)            │
//! │  - terminal output via console (render.rs)            │
//! └───────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  Library (crates/folioapp/)                           │
//! │  - OrganizeService / Node over a FolderStore          │
//! │  - Workbench over a DesktopWorkbenchState             │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Each invocation is one short-lived session: it loads the organize tree and
//! this window's workbench from the data directory, applies one command, and
//! writes the result back. Per-view history and pane sizes are not part of the
//! persisted document, so they only last for the invocation.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
