//! Task lifecycle and progression engine for LifeRPG.
//! This crate is the single source of truth for due/reset, reward and
//! level-up invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod rules;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::completion::{CompletionId, CompletionRecord};
pub use model::task::{Frequency, Task, TaskId, TaskStatus};
pub use model::user::{User, UserId};
pub use model::ValidationError;
pub use repo::task_repo::{TaskListQuery, TaskRepository};
pub use repo::{RecordKind, RepoError, RepoResult, SqliteStore, Store};
pub use rules::level::{apply_experience, LevelChange};
pub use rules::progression::{threshold_for, title_for};
pub use rules::reset::should_reset;
pub use rules::reward::{completion_reward, CompletionReward};
pub use service::category_service::{
    CategoryService, CategoryServiceError, CreateCategoryRequest,
};
pub use service::stats_service::{DailyXp, StatsService, StatsServiceError, UserStats};
pub use service::task_service::{
    CompletionOutcome, CreateTaskRequest, TaskService, TaskServiceError, TaskUpdate,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
