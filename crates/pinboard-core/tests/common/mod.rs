use pinboard_core::{Board, BoardBuilder};
use tempfile::TempDir;

/// Helper function to create a test board backed by a temp database
pub async fn create_test_board() -> (TempDir, Board) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let board = BoardBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create board");
    (temp_dir, board)
}
