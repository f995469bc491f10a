//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::{SessionService, SnapshotService};
use crate::application::{parse_script, ApplicationResult, Interaction, IoResultExt};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, MoveRequestHandler, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Receiver of move requests
    pub handler: Arc<dyn MoveRequestHandler>,

    /// Snapshot loader
    pub snapshots: SnapshotService,
}

impl ServiceContainer {
    /// Create a service container on the real filesystem; move requests go
    /// to `handler`.
    pub fn new(settings: Settings, handler: Arc<dyn MoveRequestHandler>) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), handler)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        handler: Arc<dyn MoveRequestHandler>,
    ) -> Self {
        let settings = Arc::new(settings);
        let snapshots = SnapshotService::new(fs.clone());

        Self {
            settings,
            fs,
            handler,
            snapshots,
        }
    }

    /// Load a snapshot and open an interaction session on it.
    pub fn open_session(&self, snapshot: &Path) -> ApplicationResult<SessionService> {
        let store = self.snapshots.load(snapshot)?;
        Ok(SessionService::new(store, self.handler.clone()))
    }

    /// Read and parse an interaction script.
    pub fn load_script(&self, path: &Path) -> ApplicationResult<Vec<(usize, Interaction)>> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read script", path)?;
        parse_script(&content)
    }
}
