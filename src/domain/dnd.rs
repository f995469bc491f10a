//! Drag-and-drop mediation between account cards and organization cards.
//!
//! State machine: `Idle` -> `Dragging` -> (`HoveringTarget` <-> `Dragging`)*
//! -> `Idle`. Only a drop while hovering an accepting organization produces
//! a `MoveRequested`; the tree store is never written.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::arena::{NodeId, OrgArena};
use crate::domain::error::{DomainError, DomainResult};

/// Payload kinds a card can be dragged as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Account,
}

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragItem {
    pub name: String,
    pub kind: DragKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        item: DragItem,
    },
    HoveringTarget {
        item: DragItem,
        target: NodeId,
        target_name: String,
    },
}

/// Per-card styling hint while a drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAffordance {
    None,
    /// A drag is in flight and this card would accept it
    CanDrop,
    /// The pointer is over this card and it accepts the payload
    HoveringValid,
}

/// Request to re-parent an account; applying it is up to the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequested {
    pub account_name: String,
    pub target_trading_name: String,
}

impl std::fmt::Display for MoveRequested {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You moved {} to {}",
            self.account_name, self.target_trading_name
        )
    }
}

/// Coordinates a single in-flight drag.
#[derive(Debug, Default)]
pub struct DragDropMediator {
    state: DragState,
}

impl DragDropMediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    fn item(&self) -> Option<&DragItem> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { item } | DragState::HoveringTarget { item, .. } => Some(item),
        }
    }

    /// Whether `account_name` is the current drag source.
    pub fn is_dragging(&self, account_name: &str) -> bool {
        self.item().is_some_and(|item| item.name == account_name)
    }

    /// Organization cards accept every account payload, including a drop on
    /// the account's current owner.
    pub fn can_accept(&self, store: &OrgArena, target: NodeId, kind: DragKind) -> bool {
        store.node(target).is_some() && kind == DragKind::Account
    }

    #[instrument(level = "debug", skip(self, store))]
    pub fn begin_drag(&mut self, store: &OrgArena, account_name: &str) -> DomainResult<()> {
        if let Some(active) = self.item() {
            return Err(DomainError::DragInProgress {
                active: active.name.clone(),
            });
        }
        if store.owner_of(account_name).is_none() {
            return Err(DomainError::AccountNotFound(account_name.to_string()));
        }
        self.state = DragState::Dragging {
            item: DragItem {
                name: account_name.to_string(),
                kind: DragKind::Account,
            },
        };
        debug!(account = account_name, "drag started");
        Ok(())
    }

    /// Pointer moved over `target` (`None`: over nothing that accepts drops).
    pub fn hover(&mut self, store: &OrgArena, target: Option<NodeId>) {
        let item = match std::mem::take(&mut self.state) {
            DragState::Idle => return,
            DragState::Dragging { item } | DragState::HoveringTarget { item, .. } => item,
        };

        self.state = match target {
            Some(target) if self.can_accept(store, target, item.kind) => {
                let target_name = store
                    .trading_name(target)
                    .map(str::to_string)
                    .unwrap_or_default();
                DragState::HoveringTarget {
                    item,
                    target,
                    target_name,
                }
            }
            _ => DragState::Dragging { item },
        };
    }

    pub fn leave(&mut self) {
        if let DragState::HoveringTarget { item, .. } = std::mem::take(&mut self.state) {
            self.state = DragState::Dragging { item };
        }
    }

    /// End the drag. Emits a move request only when hovering a valid target.
    #[instrument(level = "debug", skip(self))]
    pub fn drop(&mut self) -> Option<MoveRequested> {
        match std::mem::take(&mut self.state) {
            DragState::HoveringTarget {
                item, target_name, ..
            } => {
                let event = MoveRequested {
                    account_name: item.name,
                    target_trading_name: target_name,
                };
                info!(
                    account = %event.account_name,
                    target = %event.target_trading_name,
                    "move requested"
                );
                Some(event)
            }
            DragState::Dragging { item } => {
                debug!(account = %item.name, "dropped outside any target");
                None
            }
            DragState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(item) = self.item() {
            debug!(account = %item.name, "drag canceled");
        }
        self.state = DragState::Idle;
    }

    /// Styling hint for the card of `node`.
    pub fn affordance(&self, node: NodeId) -> DropAffordance {
        match &self.state {
            DragState::Idle => DropAffordance::None,
            DragState::HoveringTarget { target, .. } if *target == node => {
                DropAffordance::HoveringValid
            }
            DragState::Dragging { .. } | DragState::HoveringTarget { .. } => {
                DropAffordance::CanDrop
            }
        }
    }
}
