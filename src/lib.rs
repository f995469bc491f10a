//! Collapsible organization hierarchy with account drag-and-drop move requests.
//!
//! Layers, from the inside out:
//! - [`domain`]: tree store, view-state engine and drag-drop mediator
//! - [`application`]: snapshot loading and interaction sessions
//! - [`infrastructure`]: I/O boundary traits and service wiring
//! - [`cli`]: argument parsing, dispatch and terminal rendering

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
