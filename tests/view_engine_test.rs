//! Tests for ViewEngine rendering and toggling

use std::path::Path;
use std::sync::Arc;

use rstest::{fixture, rstest};

use orgtree::application::services::SnapshotService;
use orgtree::domain::{
    Account, DomainError, NodeView, OrgArena, OrganizationSnapshot, RenderEntry, TreeBuilder,
    ViewEngine,
};
use orgtree::infrastructure::traits::RealFileSystem;
use orgtree::util::testing;

#[fixture]
fn store() -> OrgArena {
    testing::init_test_setup();
    SnapshotService::new(Arc::new(RealFileSystem))
        .load(Path::new("tests/resources/org.json"))
        .expect("load fixture")
}

fn labels(view: &NodeView) -> Vec<String> {
    view.entries().iter().map(|e| e.label().to_string()).collect()
}

/// HQ with one collapsed child Branch owning Acct1/P1.
fn hq_branch() -> OrgArena {
    let snapshot = OrganizationSnapshot::new("HQ").with_child(
        OrganizationSnapshot::new("Branch")
            .with_collapsed(true)
            .with_account(Account::new("Acct1", "P1")),
    );
    TreeBuilder::new().build(&snapshot).unwrap()
}

// ============================================================
// Rendering
// ============================================================

#[rstest]
fn given_fixture_when_rendering_then_lists_visible_entries_in_order(store: OrgArena) {
    let view = ViewEngine::new().render_root(&store).unwrap();

    assert_eq!(
        labels(&view),
        vec!["HQ", "HQ-Ops", "Core", "Branch", "Acct1", "P1", "Acct2", "P2", "Depot", "East"]
    );
    assert_eq!(view.visible_count(), 10);
}

#[rstest]
fn given_fixture_when_rendering_then_entries_carry_nesting_depth(store: OrgArena) {
    let view = ViewEngine::new().render_root(&store).unwrap();
    let entries = view.entries();

    let depot = entries.iter().find(|e| e.label() == "Depot").unwrap();
    assert!(matches!(depot, RenderEntry::Organization { depth: 2, .. }));
    let product = entries.iter().find(|e| e.label() == "P1").unwrap();
    assert!(matches!(product, RenderEntry::Product { depth: 3, .. }));
}

#[rstest]
fn given_collapsed_node_when_rendering_then_prunes_descendants(store: OrgArena) {
    let view = ViewEngine::new().render_root(&store).unwrap();

    let depot = view.find("Depot").unwrap();
    assert!(depot.card.collapsed);
    assert!(depot.leaves.is_empty());
    assert!(depot.children.is_empty());
    assert_eq!(depot.card.badge_count, 1);
    assert!(depot.card.badge_visible());
    assert!(view.find("Warehouse").is_none());
}

#[rstest]
fn given_expanded_node_when_rendering_then_renders_every_child(store: OrgArena) {
    let view = ViewEngine::new().render_root(&store).unwrap();

    let children: Vec<&str> = view
        .children
        .iter()
        .map(|c| c.card.trading_name.as_str())
        .collect();
    assert_eq!(children, vec!["Branch", "East"]);
    assert!(!view.card.badge_visible());
    assert!(view.card.is_root);
    assert!(!view.children[0].card.is_root);
}

#[rstest]
fn given_collapsed_root_when_rendering_then_root_card_stays_visible(mut store: OrgArena) {
    let engine = ViewEngine::new();
    engine.toggle_named(&mut store, "HQ").unwrap();

    let view = engine.render_root(&store).unwrap();

    assert_eq!(labels(&view), vec!["HQ"]);
    assert!(view.card.collapsed);
    assert_eq!(view.card.badge_count, 2);
}

#[rstest]
fn given_leaf_organization_when_rendering_then_badge_is_zero(store: OrgArena) {
    let view = ViewEngine::new().render_root(&store).unwrap();

    let east = view.find("East").unwrap();
    assert_eq!(east.card.badge_count, 0);
    assert!(east.leaves.is_empty());
}

#[rstest]
fn given_same_flags_when_rendering_twice_then_descriptors_are_equal(store: OrgArena) {
    let engine = ViewEngine::new();
    assert_eq!(engine.render_root(&store).unwrap(), engine.render_root(&store).unwrap());
}

// ============================================================
// Toggling
// ============================================================

#[rstest]
#[case("HQ")]
#[case("Branch")]
#[case("Depot")]
#[case("East")]
fn given_any_node_when_toggled_twice_then_view_is_restored(
    mut store: OrgArena,
    #[case] name: &str,
) {
    let engine = ViewEngine::new();
    let before = engine.render_root(&store).unwrap();

    let first = engine.toggle_named(&mut store, name).unwrap();
    let second = engine.toggle_named(&mut store, name).unwrap();

    assert_eq!(first, !second);
    assert_eq!(engine.render_root(&store).unwrap(), before);
}

#[test]
fn given_collapsed_branch_when_toggled_then_accounts_appear_under_branch() {
    testing::init_test_setup();
    let mut store = hq_branch();
    let engine = ViewEngine::new();

    let initial = engine.render_root(&store).unwrap();
    assert_eq!(labels(&initial), vec!["HQ", "Branch"]);
    assert_eq!(initial.find("Branch").unwrap().card.badge_count, 0);

    let collapsed = engine.toggle_named(&mut store, "Branch").unwrap();

    assert!(!collapsed);
    let expanded = engine.render_root(&store).unwrap();
    assert_eq!(labels(&expanded), vec!["HQ", "Branch", "Acct1", "P1"]);
}

#[rstest]
fn given_unknown_name_when_toggling_then_node_not_found(mut store: OrgArena) {
    let err = ViewEngine::new()
        .toggle_named(&mut store, "Nowhere")
        .unwrap_err();

    assert_eq!(err, DomainError::NodeNotFound("Nowhere".to_string()));
}

#[rstest]
fn given_fixture_when_expanding_all_then_every_entry_is_visible(mut store: OrgArena) {
    let engine = ViewEngine::new();

    engine.expand_all(&mut store).unwrap();

    let view = engine.render_root(&store).unwrap();
    assert!(view.find("Warehouse").is_some());
    assert!(labels(&view).contains(&"Acct3".to_string()));
    assert!(store.iter().all(|(_, node)| !node.is_collapsed()));
}

#[rstest]
fn given_fixture_when_collapsing_all_then_only_root_is_visible(mut store: OrgArena) {
    let engine = ViewEngine::new();

    engine.collapse_all(&mut store).unwrap();

    assert_eq!(engine.render_root(&store).unwrap().visible_count(), 1);
}

#[rstest]
fn given_descriptor_when_serializing_then_omits_node_ids(store: OrgArena) {
    let view = ViewEngine::new().render_root(&store).unwrap();

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["card"]["trading_name"], "HQ");
    assert!(json["card"].get("id").is_none());
    assert_eq!(json["leaves"][0]["product"]["name"], "Core");
}
