// crates/db/src/queries/logs.rs
// Log record CRUD: insert with auto id, merge-update, list, delete, bulk import.

use branchlog_core::{LogDraft, LogRecord};

use crate::{Database, DbResult};

type LogRow = (
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn into_record(row: LogRow) -> LogRecord {
    let (
        id,
        branch_name,
        date_of_request,
        date_of_delivery,
        material_created,
        channel_of_request,
        status,
        survey_completed,
        cost,
        survey_rating,
    ) = row;
    LogRecord {
        id,
        branch_name,
        date_of_request,
        date_of_delivery,
        material_created,
        channel_of_request,
        status,
        survey_completed,
        cost,
        survey_rating,
    }
}

const LOG_COLUMNS: &str = "id, branch_name, date_of_request, date_of_delivery, material_created, \
     channel_of_request, status, survey_completed, cost, survey_rating";

/// One row parsed out of an imported spreadsheet: an optional explicit id
/// plus the field values. Rows with an id replace that id; rows without one
/// insert as new records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedLog {
    pub id: Option<i64>,
    pub draft: LogDraft,
}

impl Database {
    /// Insert a new log record, letting SQLite assign the id.
    pub async fn insert_log(&self, draft: &LogDraft) -> DbResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO logs (
                branch_name, date_of_request, date_of_delivery, material_created,
                channel_of_request, status, survey_completed, cost, survey_rating
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&draft.branch_name)
        .bind(&draft.date_of_request)
        .bind(&draft.date_of_delivery)
        .bind(&draft.material_created)
        .bind(&draft.channel_of_request)
        .bind(&draft.status)
        .bind(&draft.survey_completed)
        .bind(&draft.cost)
        .bind(&draft.survey_rating)
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Merge the draft's fields into an existing record.
    ///
    /// Returns `false` (and leaves the store untouched) when the id does
    /// not exist.
    pub async fn update_log(&self, id: i64, draft: &LogDraft) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE logs SET
                branch_name = ?2,
                date_of_request = ?3,
                date_of_delivery = ?4,
                material_created = ?5,
                channel_of_request = ?6,
                status = ?7,
                survey_completed = ?8,
                cost = ?9,
                survey_rating = ?10
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.branch_name)
        .bind(&draft.date_of_request)
        .bind(&draft.date_of_delivery)
        .bind(&draft.material_created)
        .bind(&draft.channel_of_request)
        .bind(&draft.status)
        .bind(&draft.survey_completed)
        .bind(&draft.cost)
        .bind(&draft.survey_rating)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_log(&self, id: i64) -> DbResult<Option<LogRecord>> {
        let row: Option<LogRow> =
            sqlx::query_as(&format!("SELECT {LOG_COLUMNS} FROM logs WHERE id = ?1"))
                .bind(id)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(into_record))
    }

    /// All log records in stable id order.
    pub async fn list_logs(&self) -> DbResult<Vec<LogRecord>> {
        let rows: Vec<LogRow> =
            sqlx::query_as(&format!("SELECT {LOG_COLUMNS} FROM logs ORDER BY id"))
                .fetch_all(self.pool())
                .await?;
        Ok(rows.into_iter().map(into_record).collect())
    }

    /// Delete by id. A missing id is a no-op (`false`).
    pub async fn delete_log(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM logs WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bulk-upsert imported rows in one transaction: rows carrying an id
    /// replace that id (colliding with an unrelated record overwrites it,
    /// matching the original import semantics), rows without one insert
    /// fresh. An empty slice touches nothing.
    pub async fn bulk_put_logs(&self, rows: &[ImportedLog]) -> DbResult<usize> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool().begin().await?;
        for row in rows {
            match row.id {
                Some(id) => {
                    sqlx::query(
                        r#"
                        INSERT OR REPLACE INTO logs (
                            id, branch_name, date_of_request, date_of_delivery, material_created,
                            channel_of_request, status, survey_completed, cost, survey_rating
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                        "#,
                    )
                    .bind(id)
                    .bind(&row.draft.branch_name)
                    .bind(&row.draft.date_of_request)
                    .bind(&row.draft.date_of_delivery)
                    .bind(&row.draft.material_created)
                    .bind(&row.draft.channel_of_request)
                    .bind(&row.draft.status)
                    .bind(&row.draft.survey_completed)
                    .bind(&row.draft.cost)
                    .bind(&row.draft.survey_rating)
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO logs (
                            branch_name, date_of_request, date_of_delivery, material_created,
                            channel_of_request, status, survey_completed, cost, survey_rating
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                        "#,
                    )
                    .bind(&row.draft.branch_name)
                    .bind(&row.draft.date_of_request)
                    .bind(&row.draft.date_of_delivery)
                    .bind(&row.draft.material_created)
                    .bind(&row.draft.channel_of_request)
                    .bind(&row.draft.status)
                    .bind(&row.draft.survey_completed)
                    .bind(&row.draft.cost)
                    .bind(&row.draft.survey_rating)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }
        tx.commit().await?;

        Ok(rows.len())
    }
}
