//! Domain entities: snapshot data structures
//!
//! These mirror the shape of the hierarchy document handed over by a loader.
//! Key names follow the `org.json` layout (`tradingName`,
//! `organizationChildRelationship`, `account`); the plain names `children`
//! and `accounts` are accepted as aliases.

use serde::{Deserialize, Deserializer, Serialize};

/// Product attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Leaf entity owned by exactly one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Identity used as the drag payload
    #[serde(default)]
    pub name: String,
    /// Exactly one product per account
    pub product: Product,
}

impl Account {
    pub fn new(name: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product: Product::new(product),
        }
    }
}

/// Organization node as delivered by the initial snapshot.
///
/// The snapshot is a nested document; `TreeBuilder` validates it and turns it
/// into an arena-backed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSnapshot {
    /// Display identity, also the drop-target identifier
    #[serde(rename = "tradingName", default)]
    pub trading_name: String,
    /// Direct child organizations, in rendering order
    #[serde(
        rename = "organizationChildRelationship",
        alias = "children",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub children: Vec<OrganizationSnapshot>,
    /// Accounts owned directly by this organization
    #[serde(
        rename = "account",
        alias = "accounts",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub accounts: Vec<Account>,
    /// Initial view state
    #[serde(default)]
    pub collapsed: bool,
}

impl OrganizationSnapshot {
    pub fn new(trading_name: impl Into<String>) -> Self {
        Self {
            trading_name: trading_name.into(),
            children: Vec::new(),
            accounts: Vec::new(),
            collapsed: false,
        }
    }

    pub fn with_child(mut self, child: OrganizationSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }
}

/// `null` lists are treated like missing ones.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_org_json_keys_when_deserializing_then_maps_fields() {
        let json = r#"{
            "tradingName": "HQ",
            "organizationChildRelationship": [
                { "tradingName": "Branch", "collapsed": true,
                  "account": [ { "name": "Acct1", "product": { "name": "P1" } } ] }
            ]
        }"#;

        let snapshot: OrganizationSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.trading_name, "HQ");
        assert!(!snapshot.collapsed);
        assert!(snapshot.accounts.is_empty());
        assert_eq!(snapshot.children.len(), 1);
        let branch = &snapshot.children[0];
        assert!(branch.collapsed);
        assert_eq!(branch.accounts, vec![Account::new("Acct1", "P1")]);
    }

    #[test]
    fn given_plain_aliases_and_nulls_when_deserializing_then_accepts_them() {
        let json = r#"{
            "tradingName": "HQ",
            "children": null,
            "accounts": [ { "name": "A", "product": { "name": "P" } } ]
        }"#;

        let snapshot: OrganizationSnapshot = serde_json::from_str(json).unwrap();

        assert!(snapshot.children.is_empty());
        assert_eq!(snapshot.accounts.len(), 1);
    }

    #[test]
    fn given_snapshot_when_serializing_then_writes_org_json_keys() {
        let snapshot = OrganizationSnapshot::new("HQ").with_account(Account::new("A", "P"));

        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(json.contains("\"tradingName\":\"HQ\""));
        assert!(json.contains("\"organizationChildRelationship\":[]"));
        assert!(json.contains("\"account\":["));
    }
}
