//! Terminal rendering of view descriptors
//!
//! Converts a `NodeView` into a `termtree::Tree` for display. Drop affordances
//! of an in-flight drag are shown as colors.

use colored::Colorize;
use termtree::Tree;

use crate::config::DisplayConfig;
use crate::domain::{DragDropMediator, DropAffordance, LeafPair, NodeView, OrgCard};

/// Rendering inputs besides the descriptor itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle<'a> {
    pub display: &'a DisplayConfig,
    pub mediator: Option<&'a DragDropMediator>,
}

impl<'a> RenderStyle<'a> {
    pub fn new(display: &'a DisplayConfig) -> Self {
        Self {
            display,
            mediator: None,
        }
    }

    pub fn with_mediator(mut self, mediator: &'a DragDropMediator) -> Self {
        self.mediator = Some(mediator);
        self
    }

    fn affordance(&self, card: &OrgCard) -> DropAffordance {
        self.mediator
            .map(|m| m.affordance(card.id))
            .unwrap_or(DropAffordance::None)
    }

    fn is_dragging(&self, account: &str) -> bool {
        self.mediator.is_some_and(|m| m.is_dragging(account))
    }
}

pub trait ToTermTree {
    fn to_term_tree(&self, style: &RenderStyle<'_>) -> Tree<String>;
}

impl ToTermTree for NodeView {
    fn to_term_tree(&self, style: &RenderStyle<'_>) -> Tree<String> {
        let mut tree = Tree::new(org_label(&self.card, style));
        for leaf in &self.leaves {
            tree.push(leaf_tree(leaf, style));
        }
        for child in &self.children {
            tree.push(child.to_term_tree(style));
        }
        tree
    }
}

fn org_label(card: &OrgCard, style: &RenderStyle<'_>) -> String {
    let marker = if card.collapsed { "▸" } else { "▾" };
    let mut label = format!("{} {}", marker, card.trading_name);
    if style.display.show_badges && card.badge_visible() {
        label.push_str(&format!(" ({})", card.badge_count));
    }

    let label = match style.affordance(card) {
        DropAffordance::HoveringValid => label.green().bold(),
        DropAffordance::CanDrop => label.yellow(),
        DropAffordance::None if card.is_root => label.bold(),
        DropAffordance::None => label.normal(),
    };
    label.to_string()
}

fn leaf_tree(leaf: &LeafPair, style: &RenderStyle<'_>) -> Tree<String> {
    let name = &leaf.account.name;
    let account = if style.is_dragging(name) {
        name.dimmed()
    } else {
        name.cyan()
    };

    let mut tree = Tree::new(account.to_string());
    if style.display.show_products {
        tree.push(Tree::new(leaf.product.name.italic().to_string()));
    }
    tree
}
