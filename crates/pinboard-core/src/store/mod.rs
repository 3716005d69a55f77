//! Remote store access for plans and cards.
//!
//! This module is the boundary to the hosted relational backend. It is
//! realized as a bundled SQLite database behind an asynchronous client:
//! every operation opens a short-lived connection on the blocking pool,
//! and every successful mutation publishes a change notification that the
//! board engine consumes to refetch its mirrors.
//!
//! Only real cards ever reach the store; virtual cards are read-time
//! projections that the engine synthesizes from plans.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tokio::sync::broadcast;
use tokio::task;

use crate::error::{BoardError, Result, StoreResultExt};
use crate::models::{KanbanCard, Plan};

pub mod card_queries;
pub mod migrations;
pub mod plan_queries;
mod utils;

/// Capacity of the change-notification channel. Slow subscribers observe
/// a lag and fall back to a full refetch.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Table affected by a remote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// The plans table (including its slot/attachment children)
    Plans,
    /// The cards table (including checklist/comment/attachment children)
    Cards,
}

/// Change notification published after each successful mutation.
///
/// Writes to a child collection report the parent's table; subscribers
/// refetch per table, not per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Which table changed
    pub table: Table,
}

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).store_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Asynchronous client for the remote store.
///
/// Cloneable handle; all clones publish into one shared change channel, so
/// a subscriber sees mutations made through any of them.
#[derive(Clone)]
pub struct Store {
    db_path: PathBuf,
    changes: broadcast::Sender<ChangeEvent>,
}

impl Store {
    /// Opens the store, creating the database file and schema if needed.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        let init_path = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&init_path)?;
            Ok::<(), BoardError>(())
        })
        .await
        .map_err(join_error)??;

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self { db_path, changes })
    }

    /// Subscribes to the change-notification stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }

    /// Fetches all plans with their child collections.
    pub async fn fetch_plans(&self) -> Result<Vec<Plan>> {
        self.run(|db| db.fetch_plans()).await
    }

    /// Fetches all cards with their child collections.
    pub async fn fetch_cards(&self) -> Result<Vec<KanbanCard>> {
        self.run(|db| db.fetch_cards()).await
    }

    /// Inserts a plan; ids on the input are ignored and the stored plan
    /// with assigned ids is returned.
    pub async fn insert_plan(&self, plan: Plan) -> Result<Plan> {
        let created = self.run(move |db| db.insert_plan(&plan)).await?;
        self.notify(Table::Plans);
        Ok(created)
    }

    /// Updates a plan row and replaces its child collections.
    pub async fn update_plan(&self, plan: Plan) -> Result<()> {
        self.run(move |db| db.update_plan(&plan)).await?;
        self.notify(Table::Plans);
        Ok(())
    }

    /// Deletes a plan and its child collections.
    pub async fn delete_plan(&self, id: u64) -> Result<()> {
        self.run(move |db| db.delete_plan(id)).await?;
        self.notify(Table::Plans);
        Ok(())
    }

    /// Inserts a card; the key on the input is ignored and the stored card
    /// with its real key is returned.
    pub async fn insert_card(&self, card: KanbanCard) -> Result<KanbanCard> {
        let created = self.run(move |db| db.insert_card(&card)).await?;
        self.notify(Table::Cards);
        Ok(created)
    }

    /// Updates a card row and replaces its child collections.
    pub async fn update_card(&self, card: KanbanCard) -> Result<()> {
        self.run(move |db| db.update_card(&card)).await?;
        self.notify(Table::Cards);
        Ok(())
    }

    /// Deletes a card and its child collections.
    pub async fn delete_card(&self, id: u64) -> Result<()> {
        self.run(move |db| db.delete_card(id)).await?;
        self.notify(Table::Cards);
        Ok(())
    }

    /// Runs a database operation on the blocking pool with a fresh
    /// connection, the way all store traffic flows.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(join_error)?
    }

    fn notify(&self, table: Table) {
        // No subscribers is fine; the send result only reports that
        let _ = self.changes.send(ChangeEvent { table });
    }
}

fn join_error(e: task::JoinError) -> BoardError {
    BoardError::Configuration {
        message: format!("Task join error: {e}"),
    }
}
