//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Every read and delete is scoped by the owning user; unknown and
//!   unowned tasks are indistinguishable to callers.
//! - List ordering is deterministic: `created_at ASC, uuid ASC`.

use crate::model::category::CategoryId;
use crate::model::task::{Frequency, Task, TaskId, TaskStatus};
use crate::model::user::UserId;
use crate::repo::store::SqliteStore;
use crate::repo::{
    bool_to_int, datetime_to_db, parse_bool, parse_counter, parse_datetime, parse_uuid,
    RecordKind, RepoError, RepoResult,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    user_uuid,
    category_uuid,
    title,
    description,
    frequency,
    status,
    xp_reward,
    difficulty,
    current_streak,
    best_streak,
    created_at,
    due_date,
    last_completed,
    is_active
FROM tasks";

/// Filter options for listing a user's tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskListQuery {
    pub frequency: Option<Frequency>,
    pub status: Option<TaskStatus>,
    pub category: Option<CategoryId>,
    /// Deactivated tasks are hidden unless set.
    pub include_inactive: bool,
}

/// Repository interface for task records.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, user_uuid: UserId, uuid: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self, user_uuid: UserId, query: &TaskListQuery) -> RepoResult<Vec<Task>>;
    /// Hard delete, reserved for the record-store owner; the engine
    /// deactivates instead.
    fn delete_task(&self, user_uuid: UserId, uuid: TaskId) -> RepoResult<()>;
}

impl TaskRepository for SqliteStore<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn().execute(
            "INSERT INTO tasks (
                uuid,
                user_uuid,
                category_uuid,
                title,
                description,
                frequency,
                status,
                xp_reward,
                difficulty,
                current_streak,
                best_streak,
                created_at,
                due_date,
                last_completed,
                is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                task.uuid.to_string(),
                task.user_uuid.to_string(),
                task.category_uuid.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                frequency_to_db(task.frequency),
                status_to_db(task.status),
                task.xp_reward,
                task.difficulty,
                i64::from(task.current_streak),
                i64::from(task.best_streak),
                datetime_to_db(task.created_at),
                task.due_date.map(datetime_to_db),
                task.last_completed.map(datetime_to_db),
                bool_to_int(task.is_active),
            ],
        )?;

        Ok(task.uuid)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn().execute(
            "UPDATE tasks
             SET
                category_uuid = ?1,
                title = ?2,
                description = ?3,
                frequency = ?4,
                status = ?5,
                xp_reward = ?6,
                difficulty = ?7,
                current_streak = ?8,
                best_streak = ?9,
                due_date = ?10,
                last_completed = ?11,
                is_active = ?12
             WHERE uuid = ?13 AND user_uuid = ?14;",
            params![
                task.category_uuid.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                frequency_to_db(task.frequency),
                status_to_db(task.status),
                task.xp_reward,
                task.difficulty,
                i64::from(task.current_streak),
                i64::from(task.best_streak),
                task.due_date.map(datetime_to_db),
                task.last_completed.map(datetime_to_db),
                bool_to_int(task.is_active),
                task.uuid.to_string(),
                task.user_uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Task,
                uuid: task.uuid,
            });
        }

        Ok(())
    }

    fn get_task(&self, user_uuid: UserId, uuid: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self.conn().prepare(&format!(
            "{TASK_SELECT_SQL}
             WHERE uuid = ?1 AND user_uuid = ?2;"
        ))?;

        let mut rows = stmt.query(params![uuid.to_string(), user_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self, user_uuid: UserId, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        let mut sql = format!("{TASK_SELECT_SQL} WHERE user_uuid = ?");
        let mut bind_values: Vec<Value> = vec![Value::Text(user_uuid.to_string())];

        if !query.include_inactive {
            sql.push_str(" AND is_active = 1");
        }

        if let Some(frequency) = query.frequency {
            sql.push_str(" AND frequency = ?");
            bind_values.push(Value::Text(frequency_to_db(frequency).to_string()));
        }

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status_to_db(status).to_string()));
        }

        if let Some(category) = query.category {
            sql.push_str(" AND category_uuid = ?");
            bind_values.push(Value::Text(category.to_string()));
        }

        sql.push_str(" ORDER BY created_at ASC, uuid ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn delete_task(&self, user_uuid: UserId, uuid: TaskId) -> RepoResult<()> {
        let changed = self.conn().execute(
            "DELETE FROM tasks WHERE uuid = ?1 AND user_uuid = ?2;",
            params![uuid.to_string(), user_uuid.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Task,
                uuid,
            });
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;
    let category_text: String = row.get("category_uuid")?;

    let frequency_text: String = row.get("frequency")?;
    let frequency = parse_frequency(&frequency_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid frequency `{frequency_text}` in tasks.frequency"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    let due_date = match row.get::<_, Option<i64>>("due_date")? {
        Some(millis) => Some(parse_datetime(millis, "tasks.due_date")?),
        None => None,
    };
    let last_completed = match row.get::<_, Option<i64>>("last_completed")? {
        Some(millis) => Some(parse_datetime(millis, "tasks.last_completed")?),
        None => None,
    };

    let task = Task {
        uuid: parse_uuid(&uuid_text, "tasks.uuid")?,
        user_uuid: parse_uuid(&user_text, "tasks.user_uuid")?,
        category_uuid: parse_uuid(&category_text, "tasks.category_uuid")?,
        title: row.get("title")?,
        description: row.get("description")?,
        frequency,
        status,
        xp_reward: row.get("xp_reward")?,
        difficulty: row.get("difficulty")?,
        current_streak: parse_counter(row.get("current_streak")?, "tasks.current_streak")?,
        best_streak: parse_counter(row.get("best_streak")?, "tasks.best_streak")?,
        created_at: parse_datetime(row.get("created_at")?, "tasks.created_at")?,
        due_date,
        last_completed,
        is_active: parse_bool(row.get("is_active")?, "tasks.is_active")?,
    };
    task.validate()?;
    Ok(task)
}

fn frequency_to_db(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Daily => "daily",
        Frequency::Weekly => "weekly",
        Frequency::Monthly => "monthly",
        Frequency::Once => "once",
    }
}

fn parse_frequency(value: &str) -> Option<Frequency> {
    match value {
        "daily" => Some(Frequency::Daily),
        "weekly" => Some(Frequency::Weekly),
        "monthly" => Some(Frequency::Monthly),
        "once" => Some(Frequency::Once),
        _ => None,
    }
}

fn status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Completed => "completed",
    }
}

fn parse_status(value: &str) -> Option<TaskStatus> {
    match value {
        "pending" => Some(TaskStatus::Pending),
        "in_progress" => Some(TaskStatus::InProgress),
        "completed" => Some(TaskStatus::Completed),
        _ => None,
    }
}
