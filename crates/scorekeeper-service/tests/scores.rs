//! Score CRUD, listing, and leaderboard integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

// ============================================================================
// Creation
// ============================================================================

#[tokio::test]
async fn create_score_success() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;

    let response = harness
        .server
        .post("/scores")
        .json(&json!({ "gameId": game.id, "accountId": account.id, "score": 40 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"]["score"], 40);
    assert_eq!(body["data"]["gameId"], game.id);
    assert_eq!(body["data"]["accountId"], account.id);
}

#[tokio::test]
async fn negative_score_is_rejected_without_a_write() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;

    let response = harness
        .server
        .post("/scores")
        .json(&json!({ "gameId": game.id, "accountId": account.id, "score": -5 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let listed: serde_json::Value = harness.server.get("/scores").await.json();
    assert_eq!(listed["data"]["total"], 0);
}

#[tokio::test]
async fn create_score_unknown_game_fails() {
    let harness = TestHarness::new().await;
    let account = harness.seed_account("0x897575").await;

    let response = harness
        .server
        .post("/scores")
        .json(&json!({ "gameId": 999, "accountId": account.id, "score": 1 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn create_score_unknown_account_fails() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;

    let response = harness
        .server
        .post("/scores")
        .json(&json!({ "gameId": game.id, "accountId": 999, "score": 1 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn create_score_by_address_creates_account() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;

    let response = harness
        .server
        .post("/scores/by-address")
        .json(&json!({ "gameId": game.id, "address": "0xfresh", "score": 12 }))
        .await;

    response.assert_status_ok();

    // The account now exists and can be ranked.
    let listed: serde_json::Value = harness.server.get("/accounts").await.json();
    let addresses: Vec<&str> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["address"].as_str().unwrap())
        .collect();
    assert!(addresses.contains(&"0xfresh"));
}

// ============================================================================
// Listing and filters
// ============================================================================

#[tokio::test]
async fn list_scores_joins_labels() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    harness.seed_score(game.id, account.id, 40).await;

    let body: serde_json::Value = harness.server.get("/scores").await.json();
    let rows = body["data"]["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["gameName"], "merge_game");
    assert_eq!(rows[0]["accountAddress"], "0x897575");
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn list_scores_filters_by_address_and_game() {
    let harness = TestHarness::new().await;
    let game_a = harness.seed_game("game_a").await;
    let game_b = harness.seed_game("game_b").await;
    let alice = harness.seed_account("0xalice").await;
    let bob = harness.seed_account("0xbob").await;
    harness.seed_score(game_a.id, alice.id, 10).await;
    harness.seed_score(game_a.id, bob.id, 20).await;
    harness.seed_score(game_b.id, alice.id, 30).await;

    let body: serde_json::Value = harness
        .server
        .get("/scores")
        .add_query_param("address", "0xalice")
        .await
        .json();
    assert_eq!(body["data"]["total"], 2);

    let body: serde_json::Value = harness
        .server
        .get("/scores")
        .add_query_param("address", "0xalice")
        .add_query_param("gameId", game_b.id)
        .await
        .json();
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["data"][0]["score"], 30);
}

#[tokio::test]
async fn list_scores_limit_caps_rows_but_not_total() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    for i in 0..5 {
        let account = harness.seed_account(&format!("0x{i}")).await;
        harness.seed_score(game.id, account.id, i).await;
    }

    let body: serde_json::Value = harness
        .server
        .get("/scores")
        .add_query_param("limit", 2)
        .await
        .json();
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total"], 5);
}

#[tokio::test]
async fn list_scores_accepts_epoch_and_iso_time_filters() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    harness.seed_score(game.id, account.id, 40).await;

    // A lower bound in the past keeps the row.
    let body: serde_json::Value = harness
        .server
        .get("/scores")
        .add_query_param("startTime", "2020-01-01T00:00:00Z")
        .await
        .json();
    assert_eq!(body["data"]["total"], 1);

    // An upper bound in the past (epoch milliseconds) excludes it.
    let body: serde_json::Value = harness
        .server
        .get("/scores")
        .add_query_param("endTime", "1577836800000")
        .await
        .json();
    assert_eq!(body["data"]["total"], 0);

    // Naive timestamps parse as UTC.
    let body: serde_json::Value = harness
        .server
        .get("/scores")
        .add_query_param("startTime", "2020-01-01 00:00:00")
        .await
        .json();
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn list_scores_rejects_malformed_time_filter() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/scores")
        .add_query_param("startTime", "not-a-time")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Single-row operations
// ============================================================================

#[tokio::test]
async fn get_update_delete_score() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let score = harness.seed_score(game.id, account.id, 40).await;

    let body: serde_json::Value = harness
        .server
        .get(&format!("/scores/{}", score.id))
        .await
        .json();
    assert_eq!(body["data"]["score"], 40);

    let response = harness
        .server
        .put(&format!("/scores/{}", score.id))
        .json(&json!({ "score": 55 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["score"], 55);

    harness
        .server
        .delete(&format!("/scores/{}", score.id))
        .await
        .assert_status_ok();
    harness
        .server
        .get(&format!("/scores/{}", score.id))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn update_score_rejects_negative_value() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0x897575").await;
    let score = harness.seed_score(game.id, account.id, 40).await;

    let response = harness
        .server
        .put(&format!("/scores/{}", score.id))
        .json(&json!({ "score": -1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_score_operations_fail_with_404() {
    let harness = TestHarness::new().await;

    harness
        .server
        .get("/scores/999")
        .await
        .assert_status_not_found();
    harness
        .server
        .put("/scores/999")
        .json(&json!({ "score": 1 }))
        .await
        .assert_status_not_found();
    harness
        .server
        .delete("/scores/999")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn update_by_address_upserts_current_score() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    harness.seed_account("0x897575").await;

    // First PUT inserts...
    let first: serde_json::Value = harness
        .server
        .put("/scores/by-address")
        .json(&json!({ "address": "0x897575", "gameId": game.id, "score": 10 }))
        .await
        .json();

    // ...second PUT updates the same row.
    let second: serde_json::Value = harness
        .server
        .put("/scores/by-address")
        .json(&json!({ "address": "0x897575", "gameId": game.id, "score": 25 }))
        .await
        .json();

    assert_eq!(first["data"]["id"], second["data"]["id"]);
    assert_eq!(second["data"]["score"], 25);

    let listed: serde_json::Value = harness.server.get("/scores").await.json();
    assert_eq!(listed["data"]["total"], 1);
}

#[tokio::test]
async fn update_by_address_unknown_account_fails() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;

    let response = harness
        .server
        .put("/scores/by-address")
        .json(&json!({ "address": "0xghost", "gameId": game.id, "score": 1 }))
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Leaderboard
// ============================================================================

#[tokio::test]
async fn rankings_are_descending_with_stable_ties() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    for (i, value) in [100, 80, 80].iter().enumerate() {
        let account = harness.seed_account(&format!("0xacc{i}")).await;
        harness.seed_score(game.id, account.id, *value).await;
    }

    let body: serde_json::Value = harness
        .server
        .get(&format!("/scores/rankings/{}", game.id))
        .await
        .json();
    let entries = body["data"].as_array().unwrap();
    let values: Vec<i64> = entries.iter().map(|e| e["score"].as_i64().unwrap()).collect();
    assert_eq!(values, vec![100, 80, 80]);
    assert_eq!(entries[1]["accountAddress"], "0xacc1");

    let capped: serde_json::Value = harness
        .server
        .get(&format!("/scores/rankings/{}", game.id))
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(capped["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rankings_unknown_game_fails() {
    let harness = TestHarness::new().await;

    harness
        .server
        .get("/scores/rankings/999")
        .await
        .assert_status_not_found();
}

// ============================================================================
// In-game rank
// ============================================================================

#[tokio::test]
async fn rank_in_game_locates_score_row() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let mut score_ids = Vec::new();
    for (i, value) in [100, 80, 80].iter().enumerate() {
        let account = harness.seed_account(&format!("0xacc{i}")).await;
        let score = harness.seed_score(game.id, account.id, *value).await;
        score_ids.push(score.id);
    }

    let body: serde_json::Value = harness
        .server
        .post(&format!("/scores/rank/{}", game.id))
        .json(&json!({ "propId": score_ids[1] }))
        .await
        .json();
    assert_eq!(body["data"]["rank"], 2);
    assert_eq!(body["data"]["quantity"], 80);
    assert_eq!(body["data"]["distanceToNext"], 20);
    assert_eq!(body["data"]["propId"], score_ids[1]);
}

#[tokio::test]
async fn rank_in_game_unknown_row_is_unranked_placeholder() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;

    let body: serde_json::Value = harness
        .server
        .post(&format!("/scores/rank/{}", game.id))
        .json(&json!({ "propId": 12345 }))
        .await
        .json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"]["rank"], 0);
    assert_eq!(body["data"]["distanceToNext"], 0);
}

#[tokio::test]
async fn rank_in_game_window_excludes_old_rows() {
    let harness = TestHarness::new().await;
    let game = harness.seed_game("merge_game").await;
    let account = harness.seed_account("0xacc").await;
    let score = harness.seed_score(game.id, account.id, 50).await;

    let body: serde_json::Value = harness
        .server
        .post(&format!("/scores/rank/{}", game.id))
        .json(&json!({ "propId": score.id, "endTime": "2020-01-01T00:00:00Z" }))
        .await
        .json();
    assert_eq!(body["data"]["rank"], 0);
}
