//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Transaction};

use super::utils::{parse_attachment_kind, parse_date, parse_opt_date, parse_time, parse_timestamp};
use crate::error::{BoardError, Result, StoreResultExt};
use crate::models::{Attachment, Plan, TimeSlot};

// Optimized SQL queries as const strings for compile-time optimization
const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (title, description, date, due_date, completed, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PLANS_SQL: &str =
    "SELECT id, title, description, date, due_date, completed, created_at FROM plans ORDER BY date, id";
const UPDATE_PLAN_SQL: &str =
    "UPDATE plans SET title = ?1, description = ?2, date = ?3, due_date = ?4, completed = ?5 WHERE id = ?6";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

const SELECT_SLOTS_SQL: &str =
    "SELECT id, time, description FROM time_slots WHERE plan_id = ?1 ORDER BY slot_order";
const DELETE_SLOTS_SQL: &str = "DELETE FROM time_slots WHERE plan_id = ?1";
const INSERT_SLOT_SQL: &str =
    "INSERT INTO time_slots (plan_id, time, description, slot_order) VALUES (?1, ?2, ?3, ?4)";

const SELECT_PLAN_ATTACHMENTS_SQL: &str =
    "SELECT id, kind, value FROM plan_attachments WHERE plan_id = ?1 ORDER BY id";
const DELETE_PLAN_ATTACHMENTS_SQL: &str = "DELETE FROM plan_attachments WHERE plan_id = ?1";
const INSERT_PLAN_ATTACHMENT_SQL: &str =
    "INSERT INTO plan_attachments (plan_id, kind, value) VALUES (?1, ?2, ?3)";

impl super::Database {
    /// Inserts a new plan with its time slots and attachments. The ids on
    /// the input are ignored; the stored plan with assigned ids and
    /// creation timestamp is returned.
    pub fn insert_plan(&mut self, plan: &Plan) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        tx.execute(
            INSERT_PLAN_SQL,
            params![
                plan.title,
                plan.description,
                plan.date.to_string(),
                plan.due_date.map(|d| d.to_string()),
                plan.completed,
                now.to_string(),
            ],
        )
        .map_err(|e| BoardError::store_error("Failed to insert plan", e))?;

        let id = tx.last_insert_rowid() as u64;

        let time_slots = Self::replace_slots(&tx, id, &plan.time_slots)?;
        let attachments = Self::replace_plan_attachments(&tx, id, &plan.attachments)?;

        tx.commit().store_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            title: plan.title.clone(),
            description: plan.description.clone(),
            date: plan.date,
            due_date: plan.due_date,
            time_slots,
            attachments,
            completed: plan.completed,
            created_at: now,
        })
    }

    /// Fetches all plans with child collections eagerly loaded.
    pub fn fetch_plans(&self) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANS_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let mut plans: Vec<Plan> = stmt
            .query_map([], |row| {
                Ok(Plan {
                    id: row.get::<_, i64>(0)? as u64,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    date: parse_date(3, &row.get::<_, String>(3)?)?,
                    due_date: parse_opt_date(4, row.get(4)?)?,
                    time_slots: Vec::new(),
                    attachments: Vec::new(),
                    completed: row.get(5)?,
                    created_at: parse_timestamp(6, &row.get::<_, String>(6)?)?,
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query plans", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch plans", e))?;

        for plan in &mut plans {
            plan.time_slots = self.get_time_slots(plan.id)?;
            plan.attachments = self.get_plan_attachments(plan.id)?;
        }

        Ok(plans)
    }

    /// Updates a plan row and replaces its child collections wholesale.
    pub fn update_plan(&mut self, plan: &Plan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let rows_affected = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    plan.title,
                    plan.description,
                    plan.date.to_string(),
                    plan.due_date.map(|d| d.to_string()),
                    plan.completed,
                    plan.id as i64,
                ],
            )
            .map_err(|e| BoardError::store_error("Failed to update plan", e))?;

        if rows_affected == 0 {
            return Err(BoardError::PlanNotFound { id: plan.id });
        }

        Self::replace_slots(&tx, plan.id, &plan.time_slots)?;
        Self::replace_plan_attachments(&tx, plan.id, &plan.attachments)?;

        tx.commit().store_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Permanently deletes a plan and its child collections.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .store_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| BoardError::store_error("Failed to check plan existence", e))?;

        if !exists {
            return Err(BoardError::PlanNotFound { id });
        }

        // Foreign key cascades cover these, but stay explicit
        tx.execute(DELETE_SLOTS_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete plan time slots", e))?;
        tx.execute(DELETE_PLAN_ATTACHMENTS_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete plan attachments", e))?;
        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .map_err(|e| BoardError::store_error("Failed to delete plan", e))?;

        tx.commit().store_context("Failed to commit transaction")?;
        Ok(())
    }

    fn get_time_slots(&self, plan_id: u64) -> Result<Vec<TimeSlot>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SLOTS_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let slots = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok(TimeSlot {
                    id: row.get::<_, i64>(0)? as u64,
                    time: parse_time(1, &row.get::<_, String>(1)?)?,
                    description: row.get(2)?,
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query time slots", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch time slots", e))?;

        Ok(slots)
    }

    fn get_plan_attachments(&self, plan_id: u64) -> Result<Vec<Attachment>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_ATTACHMENTS_SQL)
            .map_err(|e| BoardError::store_error("Failed to prepare query", e))?;

        let attachments = stmt
            .query_map(params![plan_id as i64], |row| {
                Ok(Attachment {
                    id: row.get::<_, i64>(0)? as u64,
                    kind: parse_attachment_kind(1, &row.get::<_, String>(1)?)?,
                    value: row.get(2)?,
                })
            })
            .map_err(|e| BoardError::store_error("Failed to query plan attachments", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| BoardError::store_error("Failed to fetch plan attachments", e))?;

        Ok(attachments)
    }

    /// Replaces a plan's time slots (delete-all-then-reinsert semantics).
    fn replace_slots(tx: &Transaction<'_>, plan_id: u64, slots: &[TimeSlot]) -> Result<Vec<TimeSlot>> {
        tx.execute(DELETE_SLOTS_SQL, params![plan_id as i64])
            .map_err(|e| BoardError::store_error("Failed to clear time slots", e))?;

        let mut stored = Vec::with_capacity(slots.len());
        for (order, slot) in slots.iter().enumerate() {
            tx.execute(
                INSERT_SLOT_SQL,
                params![
                    plan_id as i64,
                    slot.time.to_string(),
                    slot.description,
                    order as i64,
                ],
            )
            .map_err(|e| BoardError::store_error("Failed to insert time slot", e))?;
            stored.push(TimeSlot {
                id: tx.last_insert_rowid() as u64,
                time: slot.time,
                description: slot.description.clone(),
            });
        }
        Ok(stored)
    }

    /// Replaces a plan's attachments (delete-all-then-reinsert semantics).
    fn replace_plan_attachments(
        tx: &Transaction<'_>,
        plan_id: u64,
        attachments: &[Attachment],
    ) -> Result<Vec<Attachment>> {
        tx.execute(DELETE_PLAN_ATTACHMENTS_SQL, params![plan_id as i64])
            .map_err(|e| BoardError::store_error("Failed to clear plan attachments", e))?;

        let mut stored = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            tx.execute(
                INSERT_PLAN_ATTACHMENT_SQL,
                params![plan_id as i64, attachment.kind.as_str(), attachment.value],
            )
            .map_err(|e| BoardError::store_error("Failed to insert plan attachment", e))?;
            stored.push(Attachment {
                id: tx.last_insert_rowid() as u64,
                kind: attachment.kind,
                value: attachment.value.clone(),
            });
        }
        Ok(stored)
    }
}
