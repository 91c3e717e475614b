//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by the rules engine and query services.
//! - Provide lifecycle helpers for activation state.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another task.
//! - `best_streak >= current_streak` at all times.
//! - `due_date` is meaningful only for `Frequency::Once`.

use crate::model::category::CategoryId;
use crate::model::user::UserId;
use crate::model::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// How often a task becomes eligible for completion again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Resets when the UTC calendar date advances.
    Daily,
    /// Resets when the ISO week advances (or the calendar year does).
    Weekly,
    /// Resets when the calendar month advances (or the year does).
    Monthly,
    /// One-shot objective; never resets once completed.
    Once,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created or reset, waiting to be worked on.
    Pending,
    /// Explicitly started by the owner.
    InProgress,
    /// Completed for the current period.
    Completed,
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID.
    pub uuid: TaskId,
    /// Owning user; every read is scoped by this reference.
    pub user_uuid: UserId,
    /// Category supplying the default reward for new tasks.
    pub category_uuid: CategoryId,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub status: TaskStatus,
    /// Base experience granted per completion, before multipliers.
    pub xp_reward: i64,
    /// Reward multiplier; 1.0 = normal, 1.5 = hard, 2.0 = very hard.
    pub difficulty: f64,
    /// Consecutive completion periods without a missed reset cycle.
    pub current_streak: u32,
    /// High-water mark of `current_streak`.
    pub best_streak: u32,
    pub created_at: DateTime<Utc>,
    /// Target date for `Frequency::Once` objectives.
    pub due_date: Option<DateTime<Utc>>,
    /// Set on every completion; drives the reset policy.
    pub last_completed: Option<DateTime<Utc>>,
    /// Cleared instead of hard-deleting from the engine.
    pub is_active: bool,
}

impl Task {
    /// Creates a pending task with a generated stable ID.
    pub fn new(
        user_uuid: UserId,
        category_uuid: CategoryId,
        title: impl Into<String>,
        frequency: Frequency,
        xp_reward: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            user_uuid,
            category_uuid,
            title,
            frequency,
            xp_reward,
            created_at,
        )
    }

    /// Creates a pending task with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        uuid: TaskId,
        user_uuid: UserId,
        category_uuid: CategoryId,
        title: impl Into<String>,
        frequency: Frequency,
        xp_reward: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            uuid,
            user_uuid,
            category_uuid,
            title: title.into(),
            description: None,
            frequency,
            status: TaskStatus::Pending,
            xp_reward,
            difficulty: 1.0,
            current_streak: 0,
            best_streak: 0,
            created_at,
            due_date: None,
            last_completed: None,
            is_active: true,
        }
    }

    /// Checks record invariants; called on every repository write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uuid.is_nil() || self.user_uuid.is_nil() || self.category_uuid.is_nil() {
            return Err(ValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankField("title"));
        }
        if self.xp_reward <= 0 {
            return Err(ValidationError::NonPositiveXpReward(self.xp_reward));
        }
        if !(self.difficulty > 0.0) {
            return Err(ValidationError::NonPositiveDifficulty(self.difficulty));
        }
        if self.best_streak < self.current_streak {
            return Err(ValidationError::StreakRegression {
                current: self.current_streak,
                best: self.best_streak,
            });
        }
        Ok(())
    }

    /// Returns whether this task resets on a recurring cadence.
    pub fn is_recurring(&self) -> bool {
        self.frequency != Frequency::Once
    }

    /// Logical delete; the record stays for history and streak stats.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Clears the logical-delete flag.
    pub fn reactivate(&mut self) {
        self.is_active = true;
    }
}
