// ABOUTME: Shared test helpers for creating isolated file-backed test databases
// ABOUTME: Each test gets its own SQLite file inside a tempdir kept alive for the test
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ironquest_server::database::Database;
use tempfile::TempDir;

/// Create an isolated test database; keep the returned tempdir alive
pub async fn create_test_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.db");
    let db = Database::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("test database");
    (db, dir)
}
