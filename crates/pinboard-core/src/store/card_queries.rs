//! Card CRUD operations and queries.
//!
//! Time slots are deliberately absent here: they live on the plan side and
//! are overlaid onto linked cards during view derivation, so card rows
//! never carry them.

use jiff::Timestamp;
use rusqlite::{params, Transaction};

use super::utils::{parse_attachment_kind, parse_opt_date, parse_timestamp};
use crate::error::{BoardError, Result, StoreResultExt};
use crate::models::{Attachment, CardKey, CardStatus, ChecklistItem, Comment, KanbanCard};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_CARD_SQL: &str =
    "INSERT INTO cards (title, description, status, start_date, end_date, position, linked_plan_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_CARDS_SQL: &str =
    "SELECT id, title, description, status, start_date, end_date, position, linked_plan_id, created_at FROM cards ORDER BY id";
const UPDATE_CARD_SQL: &str =
    "UPDATE cards SET title = ?1, description = ?2, status = ?3, start_date = ?4, end_date = ?5, position = ?6, linked_plan_id = ?7 WHERE id = ?8";
const CHECK_CARD_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM cards WHERE id = ?1)";
const DELETE_CARD_SQL: &str = "DELETE FROM cards WHERE id = ?1";

const SELECT_CHECKLIST_SQL: &str =
    "SELECT id, text, done FROM checklist_items WHERE card_id = ?1 ORDER BY item_order";
const DELETE_CHECKLIST_SQL: &str = "DELETE FROM checklist_items WHERE card_id = ?1";
const INSERT_CHECKLIST_SQL: &str =
    "INSERT INTO checklist_items (card_id, text, done, item_order) VALUES (?1, ?2, ?3, ?4)";

const SELECT_COMMENTS_SQL: &str =
    "SELECT id, text, marked_done, created_at FROM comments WHERE card_id = ?1 ORDER BY comment_order";
const DELETE_COMMENTS_SQL: &str = "DELETE FROM comments WHERE card_id = ?1";
const INSERT_COMMENT_SQL: &str =
    "INSERT INTO comments (card_id, text, marked_done, created_at, comment_order) VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_CARD_ATTACHMENTS_SQL: &str =
    "SELECT id, kind, value FROM card_attachments WHERE card_id = ?1 ORDER BY id";
const DELETE_CARD_ATTACHMENTS_SQL: &str = "DELETE FROM card_attachments WHERE card_id = ?1";
const INSERT_CARD_ATTACHMENT_SQL: &str =
    "INSERT INTO card_attachments (card_id, kind, value) VALUES (?1, ?2, ?3)";

impl super::Database {
    /// Inserts a new card with its child collections. The key on the input
    /// is ignored; the stored card with its real key is returned.
    pub fn insert_card(&mut self, card: &KanbanCard) -> Result<KanbanCard> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        tx.execute(
            INSERT_CARD_SQL,
            params![
                card.title,
                card.description,
                card.status.as_str(),
                card.start_date.map(|d| d.to_string()),
                card.end_date.map(|d| d.to_string()),
                card.position,
                card.linked_plan_id.map(|id| id as i64),
                now.to_string(),
            ],
        )
        .map_err(|e| BoardError::store_error("Failed to insert card", e))?;

        let id = tx.last_insert_rowid() as u64;

        let checklist = Self::replace_checklist(&tx, id, &card.checklist)?;
        let comments = Self::replace_comments(&tx, id, &card.comments)?;
        let attachments = Self::replace_card_attachments(&tx, id, &card.attachments)?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(KanbanCard {
            id: CardKey::Real(id),
            title: card.title.clone(),
            description: card.description.clone(),
            status: card.status.clone(),
            start_date: card.start_date,
            end_date: card.end_date,
            time_slots: Vec::new(),
            checklist,
            comments,
            attachments,
            created_at: now,
            position: card.position,
            linked_plan_id: card.linked_plan_id,
        })
    }

    /// Fetches all cards with child collections eagerly loaded.
    pub fn fetch_cards(&self) -> Result<Vec<KanbanCard>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CARDS_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let mut cards: Vec<KanbanCard> = stmt
            .query_map([], |row| {
                let status: String = row.get(3)?;
                Ok(KanbanCard {
                    id: CardKey::Real(row.get::<_, i64>(0)? as u64),
                    title: row.get(1)?,
                    description: row.get(2)?,
                    status: CardStatus::from_name(&status),
                    start_date: parse_opt_date(4, row.get(4)?)?,
                    end_date: parse_opt_date(5, row.get(5)?)?,
                    time_slots: Vec::new(),
                    checklist: Vec::new(),
                    comments: Vec::new(),
                    attachments: Vec::new(),
                    created_at: parse_timestamp(8, &row.get::<_, String>(8)?)?,
                    position: row.get(6)?,
                    linked_plan_id: row.get::<_, Option<i64>>(7)?.map(|id| id as u64),
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query cards", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch cards", e))?;

        for card in &mut cards {
            let CardKey::Real(id) = card.id else { continue };
            card.checklist = self.get_checklist(id)?;
            card.comments = self.get_comments(id)?;
            card.attachments = self.get_card_attachments(id)?;
        }

        Ok(cards)
    }

    /// Updates a card row and replaces its child collections wholesale.
    /// Only real cards can be written; a virtual key is a caller bug
    /// surfaced as not-found.
    pub fn update_card(&mut self, card: &KanbanCard) -> Result<()> {
        let CardKey::Real(id) = card.id else {
            return Err(BoardError::CardNotFound { key: card.id });
        };

        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(
                UPDATE_CARD_SQL,
                params![
                    card.title,
                    card.description,
                    card.status.as_str(),
                    card.start_date.map(|d| d.to_string()),
                    card.end_date.map(|d| d.to_string()),
                    card.position,
                    card.linked_plan_id.map(|pid| pid as i64),
                    id as i64,
                ],
            )
            .map_err(|e| BoardError::store_error("Failed to update card", e))?;

        if rows_affected == 0 {
            return Err(BoardError::CardNotFound { key: card.id });
        }

        Self::replace_checklist(&tx, id, &card.checklist)?;
        Self::replace_comments(&tx, id, &card.comments)?;
        Self::replace_card_attachments(&tx, id, &card.attachments)?;

        tx.commit().store_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Permanently deletes a card and its child collections.
    pub fn delete_card(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_CARD_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| BoardError::store_error("Failed to check card existence", e))?;

        if !exists {
            return Err(BoardError::CardNotFound {
                key: CardKey::Real(id),
            });
        }

        // Foreign key cascades cover these, but stay explicit
        tx.execute(DELETE_CHECKLIST_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete card checklist", e))?;
        tx.execute(DELETE_COMMENTS_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete card comments", e))?;
        tx.execute(DELETE_CARD_ATTACHMENTS_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete card attachments", e))?;
        tx.execute(DELETE_CARD_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete card", e))?;

        tx.commit().store_context("Failed to commit transaction")?;
        Ok(())
    }

    fn get_checklist(&self, card_id: u64) -> Result<Vec<ChecklistItem>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CHECKLIST_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let items = stmt
            .query_map(params![card_id as i64], |row| {
                Ok(ChecklistItem {
                    id: row.get::<_, i64>(0)? as u64,
                    text: row.get(1)?,
                    done: row.get(2)?,
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query checklist", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch checklist", e))?;

        Ok(items)
    }

    fn get_comments(&self, card_id: u64) -> Result<Vec<Comment>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_COMMENTS_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let comments = stmt
            .query_map(params![card_id as i64], |row| {
                Ok(Comment {
                    id: row.get::<_, i64>(0)? as u64,
                    text: row.get(1)?,
                    marked_done: row.get(2)?,
                    created_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query comments", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch comments", e))?;

        Ok(comments)
    }

    fn get_card_attachments(&self, card_id: u64) -> Result<Vec<Attachment>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CARD_ATTACHMENTS_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let attachments = stmt
            .query_map(params![card_id as i64], |row| {
                Ok(Attachment {
                    id: row.get::<_, i64>(0)? as u64,
                    kind: parse_attachment_kind(1, &row.get::<_, String>(1)?)?,
                    value: row.get(2)?,
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query card attachments", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch card attachments", e))?;

        Ok(attachments)
    }

    /// Replaces a card's checklist (delete-all-then-reinsert semantics).
    fn replace_checklist(
        tx: &Transaction<'_>,
        card_id: u64,
        items: &[ChecklistItem],
    ) -> Result<Vec<ChecklistItem>> {
        tx.execute(DELETE_CHECKLIST_SQL, params![card_id as i64])
            .map_err(|e| BoardError::store_error("Failed to clear checklist", e))?;

        let mut stored = Vec::with_capacity(items.len());
        for (order, item) in items.iter().enumerate() {
            tx.execute(
                INSERT_CHECKLIST_SQL,
                params![card_id as i64, item.text, item.done, order as i64],
            )
            .map_err(|e| BoardError::store_error("Failed to insert checklist item", e))?;
            stored.push(ChecklistItem {
                id: tx.last_insert_rowid() as u64,
                text: item.text.clone(),
                done: item.done,
            });
        }
        Ok(stored)
    }

    /// Replaces a card's comments (delete-all-then-reinsert semantics).
    fn replace_comments(
        tx: &Transaction<'_>,
        card_id: u64,
        comments: &[Comment],
    ) -> Result<Vec<Comment>> {
        tx.execute(DELETE_COMMENTS_SQL, params![card_id as i64])
            .map_err(|e| BoardError::store_error("Failed to clear comments", e))?;

        let mut stored = Vec::with_capacity(comments.len());
        for (order, comment) in comments.iter().enumerate() {
            tx.execute(
                INSERT_COMMENT_SQL,
                params![
                    card_id as i64,
                    comment.text,
                    comment.marked_done,
                    comment.created_at.to_string(),
                    order as i64,
                ],
            )
            .map_err(|e| BoardError::store_error("Failed to insert comment", e))?;
            stored.push(Comment {
                id: tx.last_insert_rowid() as u64,
                text: comment.text.clone(),
                marked_done: comment.marked_done,
                created_at: comment.created_at,
            });
        }
        Ok(stored)
    }

    /// Replaces a card's attachments (delete-all-then-reinsert semantics).
    fn replace_card_attachments(
        tx: &Transaction<'_>,
        card_id: u64,
        attachments: &[Attachment],
    ) -> Result<Vec<Attachment>> {
        tx.execute(DELETE_CARD_ATTACHMENTS_SQL, params![card_id as i64])
            .map_err(|e| BoardError::store_error("Failed to clear card attachments", e))?;

        let mut stored = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            tx.execute(
                INSERT_CARD_ATTACHMENT_SQL,
                params![card_id as i64, attachment.kind.as_str(), attachment.value],
            )
            .map_err(|e| BoardError::store_error("Failed to insert card attachment", e))?;
            stored.push(Attachment {
                id: tx.last_insert_rowid() as u64,
                kind: attachment.kind,
                value: attachment.value.clone(),
            });
        }
        Ok(stored)
    }
}
