//! User-count correction over existing aggregates.

use redditalyzer_collector::testing::{identities, MockContributions};
use redditalyzer_collector::{attribute, correct_users, RunOptions};
use redditalyzer_common::{CommunityAggregate, CommunityStats};

const REF: &str = "LudwigAhgren";

fn source() -> MockContributions {
    MockContributions::new()
        .on_identity("a", &[REF, "x", "x"])
        .on_identity("b", &["x", "y"])
        .not_found("gone")
}

#[tokio::test]
async fn correction_only_touches_users() {
    let mut aggregate = CommunityAggregate::new();
    attribute(&source(), &identities(&["a", "b"]), &mut aggregate, &RunOptions::new(REF))
        .await
        .unwrap();
    let mut zeroed = aggregate.clone();
    zeroed.entry("x").users = 0;
    zeroed.entry("y").users = 0;

    correct_users(
        &source(),
        &identities(&["a", "b", "gone"]),
        &mut zeroed,
        &RunOptions::new(REF),
    )
    .await
    .unwrap();

    assert_eq!(zeroed, aggregate);
}

#[tokio::test]
async fn correction_fills_missing_users_field() {
    let mut aggregate: CommunityAggregate =
        serde_json::from_str(r#"{"x": {"activity": 3, "spillover": 1}, "LudwigAhgren": {"activity": 1, "spillover": 0}}"#)
            .unwrap();

    let run = correct_users(&source(), &identities(&["a"]), &mut aggregate, &RunOptions::new(REF))
        .await
        .unwrap();

    assert_eq!(
        aggregate.get("x"),
        Some(&CommunityStats {
            activity: 3,
            spillover: 1,
            users: 1
        })
    );
    assert_eq!(aggregate.get(REF).unwrap().users, 0);
    assert_eq!(run.identities_processed, 1);
}

#[tokio::test]
async fn correction_is_not_idempotent() {
    let names = identities(&["a", "b"]);
    let mut aggregate = CommunityAggregate::new();

    correct_users(&source(), &names, &mut aggregate, &RunOptions::new(REF))
        .await
        .unwrap();
    let once = aggregate.clone();
    correct_users(&source(), &names, &mut aggregate, &RunOptions::new(REF))
        .await
        .unwrap();

    for community in ["x", "y"] {
        assert!(aggregate.get(community).unwrap().users > once.get(community).unwrap().users);
    }
    assert_eq!(aggregate.get("x").unwrap().users, 4);
    assert_eq!(aggregate.get("x").unwrap().activity, 0);
}

#[tokio::test]
async fn skipped_identity_leaves_aggregate_alone() {
    let mut aggregate = CommunityAggregate::new();

    let run = correct_users(&source(), &identities(&["gone"]), &mut aggregate, &RunOptions::new(REF))
        .await
        .unwrap();

    assert!(aggregate.is_empty());
    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].identity, "gone");
}
