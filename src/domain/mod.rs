//! Domain layer: hierarchy store, view-state engine and drag-drop mediator
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod dnd;
pub mod entities;
pub mod error;
pub mod view;

pub use arena::{NodeId, OrgArena, OrgData, OrgNode};
pub use builder::TreeBuilder;
pub use dnd::{DragDropMediator, DragItem, DragKind, DragState, DropAffordance, MoveRequested};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use view::{AccountCard, LeafPair, NodeView, OrgCard, ProductCard, RenderEntry, ViewEngine};
