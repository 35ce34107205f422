//! Backup/restore integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

/// Seed the standard three-row scenario and return the score ids.
async fn seed_scores(harness: &TestHarness) -> Vec<i64> {
    let game = harness.seed_game("merge_game").await;
    let mut ids = Vec::new();
    for (i, value) in [100, 80, 50].iter().enumerate() {
        let account = harness.seed_account(&format!("0xacc{i}")).await;
        let score = harness.seed_score(game.id, account.id, *value).await;
        ids.push(score.id);
    }
    ids
}

#[tokio::test]
async fn reset_all_backs_up_then_zeroes() {
    let harness = TestHarness::new().await;
    seed_scores(&harness).await;

    let response = harness.server.post("/scores/reset-all").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["backedUpRowCount"], 3);
    assert_eq!(body["data"]["resetRowCount"], 3);
    let backup_file = body["data"]["backupFile"].as_str().unwrap().to_string();

    // Every score is zeroed in place, rows are not deleted.
    let listed: serde_json::Value = harness.server.get("/scores").await.json();
    assert_eq!(listed["data"]["total"], 3);
    for row in listed["data"]["data"].as_array().unwrap() {
        assert_eq!(row["score"], 0);
    }

    // The snapshot shows up in the listing.
    let backups: serde_json::Value = harness.server.get("/scores/backups").await.json();
    let files: Vec<&str> = backups["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["file"].as_str().unwrap())
        .collect();
    assert!(files.contains(&backup_file.as_str()));
}

#[tokio::test]
async fn reset_then_restore_round_trips_scores() {
    let harness = TestHarness::new().await;
    let ids = seed_scores(&harness).await;

    let before: serde_json::Value = harness.server.get("/scores").await.json();

    let reset: serde_json::Value = harness.server.post("/scores/reset-all").await.json();
    let backup_file = reset["data"]["backupFile"].as_str().unwrap().to_string();

    let response = harness
        .server
        .post("/scores/restore")
        .json(&json!({ "backupFile": backup_file }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["restoredCount"], 3);

    // Identical rows: same ids, scores, and timestamps.
    let after: serde_json::Value = harness.server.get("/scores").await.json();
    assert_eq!(after["data"], before["data"]);

    let restored_ids: Vec<i64> = after["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    for id in ids {
        assert!(restored_ids.contains(&id));
    }
}

#[tokio::test]
async fn restore_unknown_file_fails_without_touching_scores() {
    let harness = TestHarness::new().await;
    seed_scores(&harness).await;

    let before: serde_json::Value = harness.server.get("/scores").await.json();

    let response = harness
        .server
        .post("/scores/restore")
        .json(&json!({ "backupFile": "scores_20990101T000000Z.csv" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let after: serde_json::Value = harness.server.get("/scores").await.json();
    assert_eq!(after["data"], before["data"]);
}

#[tokio::test]
async fn restore_malformed_snapshot_fails_without_touching_scores() {
    let harness = TestHarness::new().await;
    seed_scores(&harness).await;

    let reset: serde_json::Value = harness.server.post("/scores/reset-all").await.json();
    let backup_file = reset["data"]["backupFile"].as_str().unwrap().to_string();

    // Append a truncated row to the snapshot on disk.
    let path = harness
        ._temp_dir
        .path()
        .join("backups")
        .join(&backup_file);
    let contents = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, format!("{contents}99,12,3\n")).unwrap();

    let before: serde_json::Value = harness.server.get("/scores").await.json();

    let response = harness
        .server
        .post("/scores/restore")
        .json(&json!({ "backupFile": backup_file }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    // Byte-for-byte the same table as before the failed restore.
    let after: serde_json::Value = harness.server.get("/scores").await.json();
    assert_eq!(after["data"], before["data"]);
}

#[tokio::test]
async fn restore_rejects_path_traversal_names() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/scores/restore")
        .json(&json!({ "backupFile": "../../../etc/passwd" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert!(body["err"].as_str().unwrap().contains("backup integrity"));
}

#[tokio::test]
async fn backups_list_is_newest_first() {
    let harness = TestHarness::new().await;
    seed_scores(&harness).await;

    harness
        .server
        .post("/scores/reset-all")
        .await
        .assert_status_ok();
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    harness
        .server
        .post("/scores/reset-all")
        .await
        .assert_status_ok();

    let body: serde_json::Value = harness.server.get("/scores/backups").await.json();
    let files: Vec<String> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["file"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(files.len(), 2);
    let mut sorted = files.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(files, sorted);
}

#[tokio::test]
async fn backups_list_is_empty_before_any_reset() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/scores/backups").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], 200);
    assert!(body["data"].as_array().unwrap().is_empty());
}
