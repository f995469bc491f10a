//! View-state engine: decides which part of the hierarchy is rendered and
//! owns the only write path to the collapsed flags.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{NodeId, OrgArena};
use crate::domain::error::{DomainError, DomainResult};

/// Card of an organization node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgCard {
    #[serde(skip)]
    pub id: NodeId,
    pub trading_name: String,
    /// Number of direct child organizations (visual affordance only)
    pub badge_count: usize,
    pub collapsed: bool,
    pub is_root: bool,
}

impl OrgCard {
    /// The count badge is only shown while the subtree is hidden.
    pub fn badge_visible(&self) -> bool {
        self.collapsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountCard {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub name: String,
}

/// Account card with its product card rendered underneath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafPair {
    pub account: AccountCard,
    pub product: ProductCard,
}

/// Render descriptor for one organization and its visible subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeView {
    pub card: OrgCard,
    pub leaves: Vec<LeafPair>,
    pub children: Vec<NodeView>,
}

/// Flattened render entry with its nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderEntry<'a> {
    Organization { depth: usize, card: &'a OrgCard },
    Account { depth: usize, card: &'a AccountCard },
    Product { depth: usize, card: &'a ProductCard },
}

impl RenderEntry<'_> {
    pub fn depth(&self) -> usize {
        match self {
            RenderEntry::Organization { depth, .. }
            | RenderEntry::Account { depth, .. }
            | RenderEntry::Product { depth, .. } => *depth,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RenderEntry::Organization { card, .. } => &card.trading_name,
            RenderEntry::Account { card, .. } => &card.name,
            RenderEntry::Product { card, .. } => &card.name,
        }
    }
}

impl NodeView {
    /// All entries in render order: own card, leaf pairs, then child subtrees.
    pub fn entries(&self) -> Vec<RenderEntry<'_>> {
        let mut out = Vec::new();
        self.collect_entries(0, &mut out);
        out
    }

    fn collect_entries<'a>(&'a self, depth: usize, out: &mut Vec<RenderEntry<'a>>) {
        out.push(RenderEntry::Organization {
            depth,
            card: &self.card,
        });
        for leaf in &self.leaves {
            out.push(RenderEntry::Account {
                depth: depth + 1,
                card: &leaf.account,
            });
            out.push(RenderEntry::Product {
                depth: depth + 2,
                card: &leaf.product,
            });
        }
        for child in &self.children {
            child.collect_entries(depth + 1, out);
        }
    }

    pub fn visible_count(&self) -> usize {
        1 + 2 * self.leaves.len() + self.children.iter().map(NodeView::visible_count).sum::<usize>()
    }

    /// Descendant descriptor by trading name, searching the rendered part only.
    pub fn find(&self, trading_name: &str) -> Option<&NodeView> {
        if self.card.trading_name == trading_name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(trading_name))
    }
}

/// Walks the tree store per render pass and toggles collapsed state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewEngine;

impl ViewEngine {
    pub fn new() -> Self {
        Self
    }

    /// Render the whole hierarchy starting at the root.
    #[instrument(level = "debug", skip(self, store))]
    pub fn render_root(&self, store: &OrgArena) -> DomainResult<NodeView> {
        let root = store
            .root()
            .ok_or_else(|| DomainError::NodeNotFound("<root>".to_string()))?;
        self.render(store, root, true)
    }

    /// Render `node`; a collapsed node yields its own card only.
    pub fn render(&self, store: &OrgArena, node: NodeId, is_root: bool) -> DomainResult<NodeView> {
        let org = store.get(node)?;
        let card = OrgCard {
            id: node,
            trading_name: org.data.trading_name.clone(),
            badge_count: org.children.len(),
            collapsed: org.is_collapsed(),
            is_root,
        };
        trace!(node = %card.trading_name, collapsed = card.collapsed, "render");

        if card.collapsed {
            return Ok(NodeView {
                card,
                leaves: Vec::new(),
                children: Vec::new(),
            });
        }

        let leaves = org
            .accounts
            .iter()
            .map(|a| LeafPair {
                account: AccountCard {
                    name: a.name.clone(),
                },
                product: ProductCard {
                    name: a.product.name.clone(),
                },
            })
            .collect();
        let children = org
            .children
            .iter()
            .map(|&child| self.render(store, child, false))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(NodeView {
            card,
            leaves,
            children,
        })
    }

    /// Flip the collapsed flag of `node`; returns the new value.
    #[instrument(level = "debug", skip(self, store))]
    pub fn toggle(&self, store: &mut OrgArena, node: NodeId) -> DomainResult<bool> {
        let collapsed = !store.is_collapsed(node)?;
        store.set_collapsed(node, collapsed)?;
        debug!(node = %store.trading_name(node)?, collapsed, "toggled");
        Ok(collapsed)
    }

    /// Toggle by trading name.
    pub fn toggle_named(&self, store: &mut OrgArena, trading_name: &str) -> DomainResult<bool> {
        let node = store.require(trading_name)?;
        self.toggle(store, node)
    }

    pub fn expand_all(&self, store: &mut OrgArena) -> DomainResult<()> {
        self.set_all(store, false)
    }

    pub fn collapse_all(&self, store: &mut OrgArena) -> DomainResult<()> {
        self.set_all(store, true)
    }

    fn set_all(&self, store: &mut OrgArena, collapsed: bool) -> DomainResult<()> {
        let ids: Vec<NodeId> = store.iter().map(|(id, _)| id).collect();
        for id in ids {
            store.set_collapsed(id, collapsed)?;
        }
        debug!(collapsed, nodes = store.len(), "set all");
        Ok(())
    }
}
