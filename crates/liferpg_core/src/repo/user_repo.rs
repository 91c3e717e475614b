//! User repository contract and SQLite implementation.

use crate::model::user::{User, UserId};
use crate::repo::store::SqliteStore;
use crate::repo::{
    datetime_to_db, parse_counter, parse_datetime, parse_uuid, RecordKind, RepoError, RepoResult,
};
use rusqlite::{params, Row};

const USER_SELECT_SQL: &str = "SELECT
    uuid,
    username,
    level,
    current_xp,
    total_xp,
    title,
    created_at
FROM users";

/// Repository interface for user progression records.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<UserId>;
    fn update_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, uuid: UserId) -> RepoResult<Option<User>>;
}

impl UserRepository for SqliteStore<'_> {
    fn create_user(&self, user: &User) -> RepoResult<UserId> {
        user.validate()?;

        self.conn().execute(
            "INSERT INTO users (
                uuid,
                username,
                level,
                current_xp,
                total_xp,
                title,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                user.uuid.to_string(),
                user.username.as_str(),
                i64::from(user.level),
                user.current_xp,
                user.total_xp,
                user.title.as_str(),
                datetime_to_db(user.created_at),
            ],
        )?;

        Ok(user.uuid)
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        user.validate()?;

        let changed = self.conn().execute(
            "UPDATE users
             SET
                username = ?1,
                level = ?2,
                current_xp = ?3,
                total_xp = ?4,
                title = ?5
             WHERE uuid = ?6;",
            params![
                user.username.as_str(),
                i64::from(user.level),
                user.current_xp,
                user.total_xp,
                user.title.as_str(),
                user.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::User,
                uuid: user.uuid,
            });
        }

        Ok(())
    }

    fn get_user(&self, uuid: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{USER_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let uuid_text: String = row.get("uuid")?;

    let user = User {
        uuid: parse_uuid(&uuid_text, "users.uuid")?,
        username: row.get("username")?,
        level: parse_counter(row.get("level")?, "users.level")?,
        current_xp: row.get("current_xp")?,
        total_xp: row.get("total_xp")?,
        title: row.get("title")?,
        created_at: parse_datetime(row.get("created_at")?, "users.created_at")?,
    };
    user.validate()?;
    Ok(user)
}
