//! Tests for SessionService and interaction scripts

use std::path::Path;
use std::sync::Arc;

use rstest::{fixture, rstest};

use orgtree::application::services::{Outcome, SessionService, SnapshotService};
use orgtree::application::{parse_script, ApplicationError, Interaction};
use orgtree::domain::{DomainError, MoveRequested};
use orgtree::infrastructure::traits::{RealFileSystem, RecordingMoveHandler};
use orgtree::util::testing;

struct Harness {
    session: SessionService,
    handler: Arc<RecordingMoveHandler>,
}

#[fixture]
fn harness() -> Harness {
    testing::init_test_setup();
    let store = SnapshotService::new(Arc::new(RealFileSystem))
        .load(Path::new("tests/resources/org.json"))
        .expect("load fixture");
    let handler = Arc::new(RecordingMoveHandler::new());
    Harness {
        session: SessionService::new(store, handler.clone()),
        handler,
    }
}

#[rstest]
fn given_move_script_when_running_then_handler_receives_request(mut harness: Harness) {
    let script = "\
# move Acct1 up to the head office
drag Acct1
hover HQ
drop
";
    let interactions = parse_script(script).unwrap();

    let outcomes = harness.session.run(&interactions).unwrap();

    let expected = MoveRequested {
        account_name: "Acct1".into(),
        target_trading_name: "HQ".into(),
    };
    assert_eq!(
        outcomes,
        vec![
            Outcome::DragStarted {
                account_name: "Acct1".into()
            },
            Outcome::Hovering {
                target: Some("HQ".into())
            },
            Outcome::Moved(expected.clone()),
        ]
    );
    assert_eq!(harness.handler.events(), vec![expected]);
}

#[rstest]
fn given_drop_outside_when_applying_then_handler_is_not_called(mut harness: Harness) {
    harness.session.apply(&Interaction::Drag("Acct2".into())).unwrap();
    let hovering = harness
        .session
        .apply(&Interaction::Hover("Nowhere".into()))
        .unwrap();
    let dropped = harness.session.apply(&Interaction::Drop).unwrap();

    assert_eq!(hovering, Outcome::Hovering { target: None });
    assert_eq!(dropped, Outcome::DroppedOutside);
    assert!(harness.handler.events().is_empty());
}

#[rstest]
fn given_toggle_when_rendering_next_then_sees_new_state(mut harness: Harness) {
    let toggled = harness
        .session
        .apply(&Interaction::Toggle("Depot".into()))
        .unwrap();
    let rendered = harness.session.apply(&Interaction::Render).unwrap();

    assert_eq!(
        toggled,
        Outcome::Toggled {
            trading_name: "Depot".into(),
            collapsed: false
        }
    );
    let Outcome::Rendered(view) = rendered else {
        panic!("expected a render, got {:?}", rendered);
    };
    assert!(view.find("Warehouse").is_some());
}

#[rstest]
fn given_move_when_done_then_tree_is_untouched(mut harness: Harness) {
    let before = harness.session.store().to_snapshot();

    let event = harness.session.move_account("Acct3", "East").unwrap();

    assert_eq!(event.unwrap().target_trading_name, "East");
    assert_eq!(harness.session.store().to_snapshot(), before);
    assert!(harness.session.mediator().is_idle());
}

#[rstest]
fn given_unknown_target_when_moving_then_nothing_is_requested(mut harness: Harness) {
    let event = harness.session.move_account("Acct1", "Nowhere").unwrap();

    assert_eq!(event, None);
    assert!(harness.handler.events().is_empty());
    assert!(harness.session.mediator().is_idle());
}

#[rstest]
fn given_unknown_organization_when_toggling_then_fails_with_node_not_found(mut harness: Harness) {
    let err = harness
        .session
        .apply(&Interaction::Toggle("Nowhere".into()))
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::NodeNotFound(ref name)) if name == "Nowhere"
    ));
}

#[rstest]
fn given_failing_step_when_running_then_stops_at_first_error(mut harness: Harness) {
    let interactions = parse_script("collapse-all\ntoggle Nowhere\nexpand-all\n").unwrap();

    let err = harness.session.run(&interactions).unwrap_err();

    assert!(matches!(err, ApplicationError::AtLine { line: 2, .. }));
    assert!(matches!(
        err.root(),
        ApplicationError::Domain(DomainError::NodeNotFound(name)) if name == "Nowhere"
    ));

    let view = harness.session.render().unwrap();
    assert_eq!(view.visible_count(), 1);
}

// ============================================================
// Script parsing
// ============================================================

#[rstest]
#[case("toggle", 1)]
#[case("drop now", 1)]
#[case("teleport HQ", 1)]
#[case("# header\n\nrender\nhover", 4)]
fn given_bad_line_when_parsing_then_reports_line_number(
    #[case] script: &str,
    #[case] expected_line: usize,
) {
    let err = parse_script(script).unwrap_err();

    match err {
        ApplicationError::InvalidInteraction { line, .. } => assert_eq!(line, expected_line),
        other => panic!("expected InvalidInteraction, got {:?}", other),
    }
}

#[test]
fn given_mixed_case_verbs_when_parsing_then_accepted() {
    let parsed = parse_script("Expand-All\nDRAG Acct 1\n").unwrap();

    assert_eq!(
        parsed,
        vec![
            (1, Interaction::ExpandAll),
            (2, Interaction::Drag("Acct 1".into())),
        ]
    );
}
