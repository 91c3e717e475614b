//! Task category record.

use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Stable identifier for a category record.
pub type CategoryId = Uuid;

/// Grouping for tasks, carrying UI hints and a default reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uuid: CategoryId,
    /// Unique display name.
    pub name: String,
    pub description: String,
    /// Icon name consumed by the UI layer; opaque to the engine.
    pub icon: String,
    /// `#RRGGBB` hex color for UI rendering.
    pub color: String,
    /// Default `xp_reward` for tasks created without an explicit one.
    pub base_xp: i64,
}

impl Category {
    /// Creates a category with a generated stable ID.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        base_xp: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            color: color.into(),
            base_xp,
        }
    }

    /// Checks record invariants; called on every repository write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankField("name"));
        }
        if !HEX_COLOR_RE.is_match(&self.color) {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        if self.base_xp <= 0 {
            return Err(ValidationError::NonPositiveBaseXp(self.base_xp));
        }
        Ok(())
    }
}
