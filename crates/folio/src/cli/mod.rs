//! # CLI Behavior
//!
//! This is one possible client for folio. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution
//!
//! Running `folio` with no arguments prints the organize tree followed by the
//! open views of the current window.
//!
//! ## Windows
//!
//! Every window has its own persisted workbench, selected by key
//! (`--window`, else the `tab_view_key` config value). A window that has never
//! been used gets a workbench with a single view on first access.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: context wiring, dispatch, logging setup
//! - `render`: output formatting

mod commands;
mod render;
pub mod setup;

pub use commands::run;
