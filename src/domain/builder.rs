//! Tree builder turning a hierarchy snapshot into an `OrgArena`.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeId, OrgArena, OrgData};
use crate::domain::entities::OrganizationSnapshot;
use crate::domain::error::{DomainError, DomainResult};

/// Validates a snapshot and constructs the tree store from it.
///
/// Refuses input that is not a proper tree: an organization without a
/// trading name, an organization or account name seen twice, or an account
/// without a name. Names are identities for toggles and drops, so padded
/// names are refused as well. Nothing is built in that case.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    visited_names: HashSet<String>,
    visited_accounts: HashSet<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self, snapshot), fields(root = %snapshot.trading_name))]
    pub fn build(&mut self, snapshot: &OrganizationSnapshot) -> DomainResult<OrgArena> {
        self.visited_names.clear();
        self.visited_accounts.clear();

        let mut tree = OrgArena::new();
        let root_path = display_path(None, &snapshot.trading_name);
        let mut stack: Vec<(&OrganizationSnapshot, Option<NodeId>, String)> =
            vec![(snapshot, None, root_path)];

        while let Some((current, parent_idx, path)) = stack.pop() {
            self.check_node(current, &path)?;

            let data = OrgData {
                trading_name: current.trading_name.clone(),
            };
            let current_idx =
                tree.insert_node(data, current.accounts.clone(), current.collapsed, parent_idx);

            // Reverse push keeps document order when popping
            for (i, child) in current.children.iter().enumerate().rev() {
                let child_path = if child.trading_name.trim().is_empty() {
                    format!("{}/children[{}]", path, i)
                } else {
                    display_path(Some(&path), &child.trading_name)
                };
                stack.push((child, Some(current_idx), child_path));
            }
        }

        debug!(nodes = tree.len(), depth = tree.depth(), "hierarchy built");
        Ok(tree)
    }

    fn check_node(&mut self, node: &OrganizationSnapshot, path: &str) -> DomainResult<()> {
        let name = node.trading_name.trim();
        if name.is_empty() {
            return Err(DomainError::malformed(path, "missing tradingName"));
        }
        if name != node.trading_name {
            return Err(DomainError::malformed(
                path,
                format!("tradingName '{}' has surrounding whitespace", node.trading_name),
            ));
        }
        if !self.visited_names.insert(node.trading_name.clone()) {
            return Err(DomainError::malformed(
                path,
                format!("organization '{}' appears more than once", node.trading_name),
            ));
        }

        for (i, account) in node.accounts.iter().enumerate() {
            if account.name.trim().is_empty() {
                return Err(DomainError::malformed(
                    format!("{}/account[{}]", path, i),
                    "missing account name",
                ));
            }
            if account.name.trim() != account.name {
                return Err(DomainError::malformed(
                    format!("{}/account[{}]", path, i),
                    format!("account name '{}' has surrounding whitespace", account.name),
                ));
            }
            if !self.visited_accounts.insert(account.name.clone()) {
                return Err(DomainError::malformed(
                    format!("{}/account[{}]", path, i),
                    format!("account '{}' appears more than once", account.name),
                ));
            }
        }
        Ok(())
    }
}

fn display_path(parent: Option<&str>, name: &str) -> String {
    let name = if name.trim().is_empty() { "<root>" } else { name };
    match parent {
        Some(parent) => format!("{}/{}", parent, name),
        None => name.to_string(),
    }
}
