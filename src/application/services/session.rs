//! Interaction session service
//!
//! Owns one tree store together with the view engine and the drag-drop
//! mediator. Interactions run strictly one after another, so every toggle or
//! drop is fully applied before the next render is computed.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::interaction::Interaction;
use crate::application::ApplicationResult;
use crate::domain::{DragDropMediator, DragState, MoveRequested, NodeView, OrgArena, ViewEngine};
use crate::infrastructure::traits::MoveRequestHandler;

/// Result of applying one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Toggled { trading_name: String, collapsed: bool },
    DragStarted { account_name: String },
    Hovering { target: Option<String> },
    Left,
    Moved(MoveRequested),
    DroppedOutside,
    Canceled,
    AllExpanded,
    AllCollapsed,
    Rendered(NodeView),
}

/// Single-threaded interaction session over one hierarchy.
pub struct SessionService {
    store: OrgArena,
    engine: ViewEngine,
    mediator: DragDropMediator,
    handler: Arc<dyn MoveRequestHandler>,
}

impl SessionService {
    pub fn new(store: OrgArena, handler: Arc<dyn MoveRequestHandler>) -> Self {
        Self {
            store,
            engine: ViewEngine::new(),
            mediator: DragDropMediator::new(),
            handler,
        }
    }

    pub fn store(&self) -> &OrgArena {
        &self.store
    }

    pub fn mediator(&self) -> &DragDropMediator {
        &self.mediator
    }

    pub fn render(&self) -> ApplicationResult<NodeView> {
        Ok(self.engine.render_root(&self.store)?)
    }

    /// Toggle the named organization; returns its new collapsed flag.
    pub fn toggle(&mut self, trading_name: &str) -> ApplicationResult<bool> {
        Ok(self.engine.toggle_named(&mut self.store, trading_name)?)
    }

    pub fn expand_all(&mut self) -> ApplicationResult<()> {
        Ok(self.engine.expand_all(&mut self.store)?)
    }

    pub fn collapse_all(&mut self) -> ApplicationResult<()> {
        Ok(self.engine.collapse_all(&mut self.store)?)
    }

    pub fn begin_drag(&mut self, account_name: &str) -> ApplicationResult<()> {
        Ok(self.mediator.begin_drag(&self.store, account_name)?)
    }

    /// Move the pointer over the named card; unknown names count as empty space.
    pub fn hover(&mut self, trading_name: Option<&str>) {
        let target = trading_name.and_then(|name| self.store.find(name));
        self.mediator.hover(&self.store, target);
    }

    pub fn leave(&mut self) {
        self.mediator.leave();
    }

    /// Drop the dragged account; a resulting move request goes to the handler.
    pub fn drop(&mut self) -> Option<MoveRequested> {
        let event = self.mediator.drop()?;
        self.handler.handle(&event);
        Some(event)
    }

    pub fn cancel(&mut self) {
        self.mediator.cancel();
    }

    /// Drag `account_name` onto `target` and drop it there.
    pub fn move_account(
        &mut self,
        account_name: &str,
        target: &str,
    ) -> ApplicationResult<Option<MoveRequested>> {
        self.begin_drag(account_name)?;
        self.hover(Some(target));
        Ok(self.drop())
    }

    #[instrument(level = "debug", skip(self, interaction), fields(interaction = %interaction))]
    pub fn apply(&mut self, interaction: &Interaction) -> ApplicationResult<Outcome> {
        let outcome = match interaction {
            Interaction::Toggle(name) => Outcome::Toggled {
                trading_name: name.clone(),
                collapsed: self.toggle(name)?,
            },
            Interaction::Drag(name) => {
                self.begin_drag(name)?;
                Outcome::DragStarted {
                    account_name: name.clone(),
                }
            }
            Interaction::Hover(name) => {
                self.hover(Some(name));
                let target = match self.mediator.state() {
                    DragState::HoveringTarget { target_name, .. } => Some(target_name.clone()),
                    _ => None,
                };
                Outcome::Hovering { target }
            }
            Interaction::Leave => {
                self.leave();
                Outcome::Left
            }
            Interaction::Drop => match self.drop() {
                Some(event) => Outcome::Moved(event),
                None => Outcome::DroppedOutside,
            },
            Interaction::Cancel => {
                self.cancel();
                Outcome::Canceled
            }
            Interaction::ExpandAll => {
                self.expand_all()?;
                Outcome::AllExpanded
            }
            Interaction::CollapseAll => {
                self.collapse_all()?;
                Outcome::AllCollapsed
            }
            Interaction::Render => Outcome::Rendered(self.render()?),
        };
        debug!(?outcome, "applied");
        Ok(outcome)
    }

    /// Apply interactions in order, stopping at the first failure; errors carry
    /// the script line.
    pub fn run(&mut self, interactions: &[(usize, Interaction)]) -> ApplicationResult<Vec<Outcome>> {
        interactions
            .iter()
            .map(|(line, interaction)| self.apply(interaction).map_err(|e| e.at_line(*line)))
            .collect()
    }
}
