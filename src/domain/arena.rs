use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{Account, OrganizationSnapshot};
use crate::domain::error::{DomainError, DomainResult};

/// Handle of an organization node inside an `OrgArena`.
pub type NodeId = Index;

/// Data payload for organization nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgData {
    /// Display identity, also the drop-target identifier
    pub trading_name: String,
}

impl fmt::Display for OrgData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trading_name)
    }
}

/// Organization node in the arena-based hierarchy.
#[derive(Debug)]
pub struct OrgNode {
    pub data: OrgData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<NodeId>,
    /// Indices of child organizations, in rendering order
    pub children: Vec<NodeId>,
    /// Accounts owned by this organization, in rendering order
    pub accounts: Vec<Account>,
    collapsed: bool,
}

impl OrgNode {
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

/// Arena-backed tree store for one organization hierarchy.
///
/// Structure is fixed once `TreeBuilder` has produced the store. The only
/// mutation afterwards is the per-node collapsed flag, written by the view
/// engine through `set_collapsed`.
#[derive(Debug)]
pub struct OrgArena {
    arena: Arena<OrgNode>,
    root: Option<NodeId>,
    by_name: HashMap<String, NodeId>,
    owners: HashMap<String, NodeId>,
}

impl Default for OrgArena {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgArena {
    pub(crate) fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            by_name: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Insert a node below `parent` (or as root). Name uniqueness is checked
    /// by the builder before calling this.
    #[instrument(level = "trace", skip(self, accounts))]
    pub(crate) fn insert_node(
        &mut self,
        data: OrgData,
        accounts: Vec<Account>,
        collapsed: bool,
        parent: Option<NodeId>,
    ) -> NodeId {
        let name = data.trading_name.clone();
        let account_names: Vec<String> = accounts.iter().map(|a| a.name.clone()).collect();
        let node = OrgNode {
            data,
            parent,
            children: Vec::new(),
            accounts,
            collapsed,
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        self.by_name.insert(name, node_idx);
        for account in account_names {
            self.owners.insert(account, node_idx);
        }
        node_idx
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, idx: NodeId) -> Option<&OrgNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Look up a node or fail with `NodeNotFound`.
    pub fn get(&self, idx: NodeId) -> DomainResult<&OrgNode> {
        self.arena
            .get(idx)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{:?}", idx)))
    }

    pub fn children(&self, idx: NodeId) -> DomainResult<&[NodeId]> {
        Ok(&self.get(idx)?.children)
    }

    pub fn accounts(&self, idx: NodeId) -> DomainResult<&[Account]> {
        Ok(&self.get(idx)?.accounts)
    }

    pub fn parent(&self, idx: NodeId) -> DomainResult<Option<NodeId>> {
        Ok(self.get(idx)?.parent)
    }

    pub fn trading_name(&self, idx: NodeId) -> DomainResult<&str> {
        Ok(&self.get(idx)?.data.trading_name)
    }

    pub fn is_collapsed(&self, idx: NodeId) -> DomainResult<bool> {
        Ok(self.get(idx)?.collapsed)
    }

    #[instrument(level = "debug", skip(self))]
    pub(crate) fn set_collapsed(&mut self, idx: NodeId, value: bool) -> DomainResult<()> {
        let node = self
            .arena
            .get_mut(idx)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{:?}", idx)))?;
        node.collapsed = value;
        Ok(())
    }

    /// Find an organization by trading name.
    pub fn find(&self, trading_name: &str) -> Option<NodeId> {
        self.by_name.get(trading_name).copied()
    }

    /// Like `find`, failing with `NodeNotFound`.
    pub fn require(&self, trading_name: &str) -> DomainResult<NodeId> {
        self.find(trading_name)
            .ok_or_else(|| DomainError::NodeNotFound(trading_name.to_string()))
    }

    /// Organization currently owning the named account.
    pub fn owner_of(&self, account_name: &str) -> Option<NodeId> {
        self.owners.get(account_name).copied()
    }

    pub fn iter(&self) -> OrgIterator<'_> {
        OrgIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Trading names of organizations without child organizations, left to right.
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.trading_name.clone())
            .collect()
    }

    /// Export the current tree, collapsed flags included.
    pub fn to_snapshot(&self) -> Option<OrganizationSnapshot> {
        self.root.and_then(|root| self.snapshot_of(root))
    }

    fn snapshot_of(&self, idx: NodeId) -> Option<OrganizationSnapshot> {
        let node = self.node(idx)?;
        Some(OrganizationSnapshot {
            trading_name: node.data.trading_name.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&child| self.snapshot_of(child))
                .collect(),
            accounts: node.accounts.clone(),
            collapsed: node.collapsed,
        })
    }
}

/// Pre-order, left-to-right traversal over all organizations.
pub struct OrgIterator<'a> {
    arena: &'a OrgArena,
    stack: Vec<NodeId>,
}

impl<'a> OrgIterator<'a> {
    fn new(arena: &'a OrgArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for OrgIterator<'a> {
    type Item = (NodeId, &'a OrgNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> OrgData {
        OrgData {
            trading_name: name.to_string(),
        }
    }

    //      HQ
    //     /  \
    //  East  West
    //    |
    //  Depot
    fn sample() -> OrgArena {
        let mut arena = OrgArena::new();
        let hq = arena.insert_node(data("HQ"), vec![], false, None);
        let east = arena.insert_node(data("East"), vec![Account::new("A1", "P1")], true, Some(hq));
        arena.insert_node(data("West"), vec![], false, Some(hq));
        arena.insert_node(data("Depot"), vec![], false, Some(east));
        arena
    }

    #[test]
    fn given_inserted_nodes_when_iterating_then_visits_pre_order() {
        let arena = sample();

        let names: Vec<_> = arena
            .iter()
            .map(|(_, n)| n.data.trading_name.as_str())
            .collect();

        assert_eq!(names, vec!["HQ", "East", "Depot", "West"]);
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.depth(), 3);
        assert_eq!(arena.leaf_nodes(), vec!["Depot", "West"]);
    }

    #[test]
    fn given_account_when_looking_up_owner_then_returns_containing_node() {
        let arena = sample();

        let east = arena.find("East").unwrap();

        assert_eq!(arena.owner_of("A1"), Some(east));
        assert_eq!(arena.owner_of("missing"), None);
        assert_eq!(arena.parent(east).unwrap(), arena.root());
    }

    #[test]
    fn given_node_when_setting_collapsed_then_only_flag_changes() {
        let mut arena = sample();
        let before = arena.to_snapshot();
        let west = arena.find("West").unwrap();

        arena.set_collapsed(west, true).unwrap();

        assert!(arena.is_collapsed(west).unwrap());
        let mut after = arena.to_snapshot().unwrap();
        after.children[1].collapsed = false;
        assert_eq!(Some(after), before);
    }

    #[test]
    fn given_unknown_name_when_requiring_then_returns_node_not_found() {
        let arena = sample();

        let result = arena.require("Nowhere");

        assert_eq!(result, Err(DomainError::NodeNotFound("Nowhere".into())));
    }
}
