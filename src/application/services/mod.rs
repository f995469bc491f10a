//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, MoveRequestHandler)
//! but are themselves concrete structs, not traits.

mod session;
mod snapshot;

pub use session::{Outcome, SessionService};
pub use snapshot::{SnapshotFormat, SnapshotService};
