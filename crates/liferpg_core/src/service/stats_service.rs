//! Progression statistics service.
//!
//! # Invariants
//! - `best_streak` aggregates over all of the user's tasks, active or not;
//!   `current_streak` only over active ones.
//! - The daily series is zero-filled: every date from `since` through
//!   `now`'s date appears exactly once.

use crate::model::completion::CompletionRecord;
use crate::model::user::UserId;
use crate::repo::task_repo::TaskListQuery;
use crate::repo::{RecordKind, RepoError, Store};
use crate::rules::progression;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for statistics use-cases.
#[derive(Debug)]
pub enum StatsServiceError {
    UserNotFound(UserId),
    Repo(RepoError),
}

impl Display for StatsServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserNotFound(uuid) => write!(f, "user not found: {uuid}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StatsServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UserNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StatsServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                kind: RecordKind::User,
                uuid,
            } => Self::UserNotFound(uuid),
            other => Self::Repo(other),
        }
    }
}

/// Aggregated progression snapshot for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub level: u32,
    pub current_xp: i64,
    pub xp_to_next_level: i64,
    pub total_xp: i64,
    pub title: String,
    pub tasks_completed: u64,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// One day of the experience series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyXp {
    pub date: NaiveDate,
    pub xp: i64,
}

/// Use-case facade for progression statistics.
pub struct StatsService<S: Store> {
    store: S,
}

impl<S: Store> StatsService<S> {
    /// Creates a service using the provided record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Computes the caller's progression snapshot.
    pub fn user_stats(&self, user_uuid: UserId) -> Result<UserStats, StatsServiceError> {
        let Some(user) = self.store.get_user(user_uuid)? else {
            return Err(StatsServiceError::UserNotFound(user_uuid));
        };

        let tasks_completed = self.store.count_completions(user_uuid)?;
        let tasks = self.store.list_tasks(
            user_uuid,
            &TaskListQuery {
                include_inactive: true,
                ..TaskListQuery::default()
            },
        )?;

        let best_streak = tasks.iter().map(|task| task.best_streak).max().unwrap_or(0);
        let current_streak = tasks
            .iter()
            .filter(|task| task.is_active)
            .map(|task| task.current_streak)
            .max()
            .unwrap_or(0);

        let xp_to_next_level =
            (progression::threshold_for(user.level + 1) - user.total_xp).max(0);

        Ok(UserStats {
            level: user.level,
            current_xp: user.current_xp,
            xp_to_next_level,
            total_xp: user.total_xp,
            title: user.title,
            tasks_completed,
            current_streak,
            best_streak,
        })
    }

    /// Returns experience earned per UTC day from `since` through `now`'s
    /// date, zero-filled for days without completions.
    pub fn daily_xp_series(
        &self,
        user_uuid: UserId,
        since: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<DailyXp>, StatsServiceError> {
        let since_start = since.and_time(NaiveTime::MIN).and_utc();
        let completions = self
            .store
            .list_completions_since(user_uuid, since_start, None)?;

        let mut xp_by_day: HashMap<NaiveDate, i64> = HashMap::new();
        for completion in &completions {
            *xp_by_day
                .entry(completion.completed_at.date_naive())
                .or_insert(0) += completion.xp_earned;
        }

        let mut series = Vec::new();
        let end = now.date_naive();
        let mut day = since;
        while day <= end {
            series.push(DailyXp {
                date: day,
                xp: xp_by_day.get(&day).copied().unwrap_or(0),
            });
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }

        Ok(series)
    }

    /// Returns the caller's most recent completions since `since`,
    /// newest first.
    pub fn completion_history(
        &self,
        user_uuid: UserId,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<CompletionRecord>, StatsServiceError> {
        Ok(self
            .store
            .list_completions_since(user_uuid, since, Some(limit))?)
    }
}
