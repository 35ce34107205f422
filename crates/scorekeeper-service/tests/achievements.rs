//! Achievement ledger integration tests.

mod common;

use common::TestHarness;
use serde_json::json;

// ============================================================================
// Recording completions
// ============================================================================

#[tokio::test]
async fn record_achievement_success() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let kind = harness.seed_achievement_type(game.id, "first_win").await;

    let response = harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": kind.id, "complete": true }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["complete"], true);
    assert!(!body["data"]["completeTime"].is_null());
}

#[tokio::test]
async fn record_achievement_twice_keeps_one_row() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let kind = harness.seed_achievement_type(game.id, "first_win").await;

    let first: serde_json::Value = harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": kind.id, "complete": true }))
        .await
        .json();

    let second: serde_json::Value = harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": kind.id, "complete": true }))
        .await
        .json();

    // Upsert, never a conflict: same row id both times.
    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["complete"], true);
}

#[tokio::test]
async fn marking_incomplete_clears_completion_time() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let kind = harness.seed_achievement_type(game.id, "first_win").await;

    harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": kind.id, "complete": true }))
        .await
        .assert_status_ok();

    let body: serde_json::Value = harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": kind.id, "complete": false }))
        .await
        .json();
    assert_eq!(body["data"]["complete"], false);
    assert!(body["data"]["completeTime"].is_null());
}

#[tokio::test]
async fn record_achievement_unknown_references_fail() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let kind = harness.seed_achievement_type(game.id, "first_win").await;

    harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": 999, "achievementId": kind.id, "complete": true }))
        .await
        .assert_status_not_found();

    harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": 999, "complete": true }))
        .await
        .assert_status_not_found();
}

// ============================================================================
// Checking completions
// ============================================================================

#[tokio::test]
async fn check_unknown_address_is_false_not_error() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/achievements/check")
        .json(&json!({ "address": "0xghost", "achievementId": 1 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"], false);
}

#[tokio::test]
async fn check_reflects_completion_state() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let kind = harness.seed_achievement_type(game.id, "first_win").await;

    // No record yet: false.
    let body: serde_json::Value = harness
        .server
        .post("/achievements/check")
        .json(&json!({ "address": "0x897575", "achievementId": kind.id }))
        .await
        .json();
    assert_eq!(body["data"], false);

    harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": kind.id, "complete": true }))
        .await
        .assert_status_ok();

    let body: serde_json::Value = harness
        .server
        .post("/achievements/check")
        .json(&json!({ "address": "0x897575", "achievementId": kind.id }))
        .await
        .json();
    assert_eq!(body["data"], true);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn list_achievement_types_filters_by_game() {
    let harness = TestHarness::new().await;
    let game_a = harness.seed_game("game_a").await;
    let game_b = harness.seed_game("game_b").await;
    harness.seed_achievement_type(game_a.id, "a1").await;
    harness.seed_achievement_type(game_b.id, "b1").await;

    let body: serde_json::Value = harness.server.get("/achievements").await.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let body: serde_json::Value = harness
        .server
        .get("/achievements")
        .add_query_param("gameId", game_a.id)
        .await
        .json();
    let types = body["data"].as_array().unwrap();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0]["name"], "a1");
}

#[tokio::test]
async fn user_checklist_includes_unattempted_achievements() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let won = harness.seed_achievement_type(game.id, "first_win").await;
    harness.seed_achievement_type(game.id, "ten_wins").await;

    harness
        .server
        .post("/achievements")
        .json(&json!({ "accountId": account.id, "achievementId": won.id, "complete": true }))
        .await
        .assert_status_ok();

    let body: serde_json::Value = harness
        .server
        .get("/achievements/user")
        .add_query_param("address", "0x897575")
        .add_query_param("gameId", game.id)
        .await
        .json();
    let checklist = body["data"].as_array().unwrap();
    assert_eq!(checklist.len(), 2);
    assert_eq!(checklist[0]["complete"], true);
    assert_eq!(checklist[1]["complete"], false);
    assert!(checklist[1]["completeTime"].is_null());
}

#[tokio::test]
async fn user_checklist_for_unknown_address_is_all_incomplete() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    harness.seed_achievement_type(game.id, "first_win").await;

    let response = harness
        .server
        .get("/achievements/user")
        .add_query_param("address", "0xghost")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let checklist = body["data"].as_array().unwrap();
    assert_eq!(checklist.len(), 1);
    assert_eq!(checklist[0]["complete"], false);
}
