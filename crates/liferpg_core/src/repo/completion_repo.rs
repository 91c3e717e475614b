//! Completion log repository contract and SQLite implementation.
//!
//! # Invariants
//! - The log is append-only: no update or delete operations exist here.

use crate::model::completion::{CompletionId, CompletionRecord};
use crate::model::user::UserId;
use crate::repo::store::SqliteStore;
use crate::repo::{datetime_to_db, parse_datetime, parse_uuid, RepoResult};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const COMPLETION_SELECT_SQL: &str = "SELECT
    uuid,
    task_uuid,
    user_uuid,
    completed_at,
    xp_earned,
    streak_bonus
FROM task_completions";

/// Repository interface for the append-only completion log.
pub trait CompletionRepository {
    fn append_completion(&self, completion: &CompletionRecord) -> RepoResult<CompletionId>;
    fn count_completions(&self, user_uuid: UserId) -> RepoResult<u64>;
    /// Completions at or after `since`, newest first.
    fn list_completions_since(
        &self,
        user_uuid: UserId,
        since: DateTime<Utc>,
        limit: Option<u32>,
    ) -> RepoResult<Vec<CompletionRecord>>;
}

impl CompletionRepository for SqliteStore<'_> {
    fn append_completion(&self, completion: &CompletionRecord) -> RepoResult<CompletionId> {
        completion.validate()?;

        self.conn().execute(
            "INSERT INTO task_completions (
                uuid,
                task_uuid,
                user_uuid,
                completed_at,
                xp_earned,
                streak_bonus
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                completion.uuid.to_string(),
                completion.task_uuid.to_string(),
                completion.user_uuid.to_string(),
                datetime_to_db(completion.completed_at),
                completion.xp_earned,
                completion.streak_bonus,
            ],
        )?;

        Ok(completion.uuid)
    }

    fn count_completions(&self, user_uuid: UserId) -> RepoResult<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM task_completions WHERE user_uuid = ?1;",
            [user_uuid.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn list_completions_since(
        &self,
        user_uuid: UserId,
        since: DateTime<Utc>,
        limit: Option<u32>,
    ) -> RepoResult<Vec<CompletionRecord>> {
        let mut sql = format!(
            "{COMPLETION_SELECT_SQL}
             WHERE user_uuid = ? AND completed_at >= ?
             ORDER BY completed_at DESC, uuid ASC"
        );
        let mut bind_values: Vec<Value> = vec![
            Value::Text(user_uuid.to_string()),
            Value::Integer(datetime_to_db(since)),
        ];

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut completions = Vec::new();

        while let Some(row) = rows.next()? {
            completions.push(parse_completion_row(row)?);
        }

        Ok(completions)
    }
}

fn parse_completion_row(row: &Row<'_>) -> RepoResult<CompletionRecord> {
    let uuid_text: String = row.get("uuid")?;
    let task_text: String = row.get("task_uuid")?;
    let user_text: String = row.get("user_uuid")?;

    let completion = CompletionRecord {
        uuid: parse_uuid(&uuid_text, "task_completions.uuid")?,
        task_uuid: parse_uuid(&task_text, "task_completions.task_uuid")?,
        user_uuid: parse_uuid(&user_text, "task_completions.user_uuid")?,
        completed_at: parse_datetime(row.get("completed_at")?, "task_completions.completed_at")?,
        xp_earned: row.get("xp_earned")?,
        streak_bonus: row.get("streak_bonus")?,
    };
    completion.validate()?;
    Ok(completion)
}
