//! Snapshot loading service
//!
//! Reads a hierarchy document (JSON or TOML) and builds the tree store.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::error_ext::not_found;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{DomainError, OrgArena, OrganizationSnapshot, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Document encodings accepted for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    /// `.toml` selects TOML, everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SnapshotFormat::Toml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// Service loading hierarchy snapshots into tree stores.
pub struct SnapshotService {
    fs: Arc<dyn FileSystem>,
}

impl SnapshotService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and validate the snapshot at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<OrgArena> {
        if !self.fs.is_file(path) {
            return Err(not_found("snapshot", path));
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read snapshot", path)?;
        let store = self.parse(&content, SnapshotFormat::from_path(path))?;
        debug!("load: {} organizations from {}", store.len(), path.display());
        Ok(store)
    }

    /// Decode and validate snapshot content.
    pub fn parse(&self, content: &str, format: SnapshotFormat) -> ApplicationResult<OrgArena> {
        let snapshot = Self::decode(content, format)?;
        Ok(TreeBuilder::new().build(&snapshot)?)
    }

    /// Decode without building; syntax errors are reported as malformed hierarchy.
    pub fn decode(content: &str, format: SnapshotFormat) -> ApplicationResult<OrganizationSnapshot> {
        let decoded = match format {
            SnapshotFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            SnapshotFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        decoded.map_err(|reason| DomainError::malformed("<document>", reason).into())
    }
}
