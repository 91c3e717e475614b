//! Category repository contract and SQLite implementation.

use crate::model::category::{Category, CategoryId};
use crate::repo::store::SqliteStore;
use crate::repo::{parse_uuid, RepoResult};
use rusqlite::Row;

const CATEGORY_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    description,
    icon,
    color,
    base_xp
FROM categories";

/// Repository interface for category records.
pub trait CategoryRepository {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId>;
    fn get_category(&self, uuid: CategoryId) -> RepoResult<Option<Category>>;
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn count_categories(&self) -> RepoResult<u64>;
}

impl CategoryRepository for SqliteStore<'_> {
    fn create_category(&self, category: &Category) -> RepoResult<CategoryId> {
        category.validate()?;

        self.conn().execute(
            "INSERT INTO categories (
                uuid,
                name,
                description,
                icon,
                color,
                base_xp
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            rusqlite::params![
                category.uuid.to_string(),
                category.name.as_str(),
                category.description.as_str(),
                category.icon.as_str(),
                category.color.as_str(),
                category.base_xp,
            ],
        )?;

        Ok(category.uuid)
    }

    fn get_category(&self, uuid: CategoryId) -> RepoResult<Option<Category>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{CATEGORY_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_category_row(row)?));
        }

        Ok(None)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY name ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn count_categories(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM categories;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;

    let category = Category {
        uuid: parse_uuid(&uuid_text, "categories.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        icon: row.get("icon")?,
        color: row.get("color")?,
        base_xp: row.get("base_xp")?,
    };
    category.validate()?;
    Ok(category)
}
