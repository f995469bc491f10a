//! I/O boundary traits for testability
//!
//! These traits abstract reading snapshots and delivering move requests,
//! allowing services to be tested with in-memory implementations.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::domain::MoveRequested;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Consumer of move requests emitted by the drag-drop mediator.
///
/// Applying the move to a backing store is the handler's business; the
/// hierarchy itself is never changed by emitting the event.
pub trait MoveRequestHandler: Send + Sync {
    fn handle(&self, event: &MoveRequested);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Keeps every received move request, in order.
#[derive(Debug, Default)]
pub struct RecordingMoveHandler {
    events: Mutex<Vec<MoveRequested>>,
}

impl RecordingMoveHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<MoveRequested> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl MoveRequestHandler for RecordingMoveHandler {
    fn handle(&self, event: &MoveRequested) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
