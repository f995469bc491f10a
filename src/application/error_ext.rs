//! I/O error conversion with path context

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Turns `io::Result` into `ApplicationResult`, naming the action and path.
pub trait IoResultExt<T> {
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read snapshot", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| path_error(action, path, e))
    }
}

/// Missing input file, reported like a failed read.
pub fn not_found(what: &str, path: &Path) -> ApplicationError {
    path_error(
        &format!("{} not found", what),
        path,
        io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", what)),
    )
}

fn path_error(action: &str, path: &Path, source: io::Error) -> ApplicationError {
    ApplicationError::OperationFailed {
        context: format!("{}: {}", action, path.display()),
        source: Box::new(source),
    }
}
