//! Database schema initialization and migrations.

use crate::error::{Result, StoreResultExt};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .store_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .store_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if marked_done column exists in comments table
        let has_marked_done: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('comments') WHERE name = 'marked_done'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        // Add marked_done column if it doesn't exist
        if !has_marked_done {
            self.connection
                .execute(
                    "ALTER TABLE comments ADD COLUMN marked_done INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .store_context("Failed to add marked_done column to comments table")?;
        }

        Ok(())
    }
}
