//! User progression record.
//!
//! # Responsibility
//! - Track level, title and experience counters for one account.
//!
//! # Invariants
//! - `total_xp` is monotonically non-decreasing across completions.
//! - `level` satisfies `threshold_for(level) <= total_xp` and, unless the
//!   resolver is mid-walk, `total_xp < threshold_for(level + 1)`.

use crate::model::ValidationError;
use crate::rules::progression;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user record.
pub type UserId = Uuid;

/// Progression state for one authenticated account.
///
/// Credentials and token issuance live with the external identity
/// verifier; the engine only ever sees the handle and the counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable global ID supplied by the identity collaborator.
    pub uuid: UserId,
    pub username: String,
    pub level: u32,
    /// Experience accumulated since the account started; informational,
    /// never reset on level-up.
    pub current_xp: i64,
    /// Lifetime experience; drives level resolution.
    pub total_xp: i64,
    /// Display title derived from `level` via the title tiers.
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a fresh level-1 account with the lowest-tier title.
    pub fn new(username: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), username, created_at)
    }

    /// Creates a level-1 account with a caller-provided stable ID.
    pub fn with_id(uuid: UserId, username: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            uuid,
            username: username.into(),
            level: 1,
            current_xp: 0,
            total_xp: 0,
            title: progression::title_for(1).to_string(),
            created_at,
        }
    }

    /// Checks record invariants; called on every repository write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::BlankField("username"));
        }
        if self.level == 0 {
            return Err(ValidationError::ZeroLevel);
        }
        if self.current_xp < 0 {
            return Err(ValidationError::NegativeXp {
                field: "current_xp",
                value: self.current_xp,
            });
        }
        if self.total_xp < 0 {
            return Err(ValidationError::NegativeXp {
                field: "total_xp",
                value: self.total_xp,
            });
        }
        Ok(())
    }
}
