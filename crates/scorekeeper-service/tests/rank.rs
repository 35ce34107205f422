//! Global ranking integration tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn rank_reflects_descending_scores() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    for (i, value) in [100, 80, 80].iter().enumerate() {
        let account = harness.seed_account(&format!("0xacc{i}")).await;
        harness.seed_score(game.id, account.id, *value).await;
    }

    let top: serde_json::Value = harness.server.get("/rank/0xacc0").await.json();
    assert_eq!(top["code"], 200);
    assert_eq!(top["data"]["rank"], 1);
    assert_eq!(top["data"]["quantity"], 100);
    assert_eq!(top["data"]["distanceToNext"], 0);
    assert_eq!(top["data"]["address"], "0xacc0");

    // 100 - 80 = 20 points to the next-better rank.
    let second: serde_json::Value = harness.server.get("/rank/0xacc1").await.json();
    assert_eq!(second["data"]["rank"], 2);
    assert_eq!(second["data"]["quantity"], 80);
    assert_eq!(second["data"]["distanceToNext"], 20);

    let third: serde_json::Value = harness.server.get("/rank/0xacc2").await.json();
    assert_eq!(third["data"]["rank"], 3);
    assert_eq!(third["data"]["distanceToNext"], 20);
}

#[tokio::test]
async fn unranked_address_gets_zero_placeholder_not_error() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/rank/0xnobody").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["err"], "");
    assert_eq!(body["data"]["rank"], 0);
    assert_eq!(body["data"]["quantity"], 0);
    assert_eq!(body["data"]["distanceToNext"], 0);
    assert_eq!(body["data"]["propId"], 0);
    assert_eq!(body["data"]["address"], "0xnobody");
}

#[tokio::test]
async fn rank_spans_all_games() {
    let harness = TestHarness::new().await;
    let game_a = harness.seed_game("game_a").await;
    let game_b = harness.seed_game("game_b").await;
    let alice = harness.seed_account("0xalice").await;
    let bob = harness.seed_account("0xbob").await;
    harness.seed_score(game_a.id, alice.id, 10).await;
    harness.seed_score(game_b.id, bob.id, 99).await;

    // Alice ranks behind Bob even though they never played the same game.
    let body: serde_json::Value = harness.server.get("/rank/0xalice").await.json();
    assert_eq!(body["data"]["rank"], 2);
    assert_eq!(body["data"]["distanceToNext"], 89);
}

#[tokio::test]
async fn best_row_is_ranked_for_multi_score_addresses() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0xacc").await;
    harness.seed_score(game.id, account.id, 10).await;
    let best = harness.seed_score(game.id, account.id, 70).await;

    let body: serde_json::Value = harness.server.get("/rank/0xacc").await.json();
    assert_eq!(body["data"]["rank"], 1);
    assert_eq!(body["data"]["quantity"], 70);
    assert_eq!(body["data"]["propId"], best.id);
}
