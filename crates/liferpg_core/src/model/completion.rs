//! Completion log entry.
//!
//! # Invariants
//! - Records are append-only: never updated or deleted by the engine.
//! - `0 <= streak_bonus <= xp_earned`.

use crate::model::task::TaskId;
use crate::model::user::UserId;
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a completion record.
pub type CompletionId = Uuid;

/// One completed period of a task, with the experience it granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub uuid: CompletionId,
    /// Task that was completed; its owner must be `user_uuid`.
    pub task_uuid: TaskId,
    pub user_uuid: UserId,
    pub completed_at: DateTime<Utc>,
    /// Total experience granted, streak bonus included.
    pub xp_earned: i64,
    /// Portion of `xp_earned` contributed by the streak bonus.
    pub streak_bonus: i64,
}

impl CompletionRecord {
    /// Creates a log entry with a generated stable ID.
    pub fn new(
        task_uuid: TaskId,
        user_uuid: UserId,
        completed_at: DateTime<Utc>,
        xp_earned: i64,
        streak_bonus: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            task_uuid,
            user_uuid,
            completed_at,
            xp_earned,
            streak_bonus,
        }
    }

    /// Checks record invariants; called when the entry is appended.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() || self.task_uuid.is_nil() || self.user_uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        if self.xp_earned < 0 {
            return Err(ValidationError::NegativeXp {
                field: "xp_earned",
                value: self.xp_earned,
            });
        }
        if self.streak_bonus < 0 {
            return Err(ValidationError::NegativeXp {
                field: "streak_bonus",
                value: self.streak_bonus,
            });
        }
        if self.streak_bonus > self.xp_earned {
            return Err(ValidationError::BonusExceedsEarned {
                bonus: self.streak_bonus,
                earned: self.xp_earned,
            });
        }
        Ok(())
    }
}
