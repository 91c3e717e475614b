//! Task lifecycle use-case service.
//!
//! # Responsibility
//! - Task CRUD scoped to the authenticated owner.
//! - The query engine with read-time lazy reset.
//! - The completion flow: eligibility, reward, level resolution, logging.
//!
//! # Invariants
//! - Lazy reset is applied before due-today filtering and before completion
//!   eligibility is judged.
//! - A completion applies atomically (task, user, completion record) or not
//!   at all.

use crate::model::category::CategoryId;
use crate::model::completion::CompletionRecord;
use crate::model::task::{Frequency, Task, TaskId, TaskStatus};
use crate::model::user::{User, UserId};
use crate::model::ValidationError;
use crate::repo::task_repo::TaskListQuery;
use crate::repo::{RecordKind, RepoError, Store};
use crate::rules::level::apply_experience;
use crate::rules::reset::should_reset;
use crate::rules::reward::completion_reward;
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Task does not exist or does not belong to the caller.
    TaskNotFound(TaskId),
    /// Referenced category does not exist.
    CategoryNotFound(CategoryId),
    /// Caller identity does not resolve to a user record.
    UserNotFound(UserId),
    /// Task is already completed and its period has not elapsed.
    AlreadyCompleted(TaskId),
    /// Record-level validation failure.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(uuid) => write!(f, "task not found: {uuid}"),
            Self::CategoryNotFound(uuid) => write!(f, "category not found: {uuid}"),
            Self::UserNotFound(uuid) => write!(f, "user not found: {uuid}"),
            Self::AlreadyCompleted(uuid) => {
                write!(f, "task {uuid} is already completed for this period")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound {
                kind: RecordKind::Task,
                uuid,
            } => Self::TaskNotFound(uuid),
            RepoError::NotFound {
                kind: RecordKind::Category,
                uuid,
            } => Self::CategoryNotFound(uuid),
            RepoError::NotFound {
                kind: RecordKind::User,
                uuid,
            } => Self::UserNotFound(uuid),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    pub category: CategoryId,
    pub title: String,
    pub description: Option<String>,
    pub frequency: Frequency,
    /// Defaults to the category's `base_xp` when unset.
    pub xp_reward: Option<i64>,
    pub difficulty: f64,
    /// Target date for `Frequency::Once` objectives.
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with normal difficulty and the category reward.
    pub fn new(category: CategoryId, title: impl Into<String>, frequency: Frequency) -> Self {
        Self {
            category,
            title: title.into(),
            description: None,
            frequency,
            xp_reward: None,
            difficulty: 1.0,
            due_date: None,
        }
    }
}

/// Partial update for a task; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<CategoryId>,
    pub frequency: Option<Frequency>,
    pub xp_reward: Option<i64>,
    pub difficulty: Option<f64>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Everything one successful completion changed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub completion: CompletionRecord,
    pub task: Task,
    pub user: User,
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Use-case facade for the task lifecycle.
pub struct TaskService<S: Store> {
    store: S,
}

impl<S: Store> TaskService<S> {
    /// Creates a service using the provided record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a pending task owned by the caller.
    ///
    /// # Contract
    /// - The referenced category must exist.
    /// - `xp_reward` falls back to the category's `base_xp`.
    pub fn create_task(
        &self,
        user_uuid: UserId,
        request: &CreateTaskRequest,
        now: DateTime<Utc>,
    ) -> Result<Task, TaskServiceError> {
        let category = self
            .store
            .get_category(request.category)?
            .ok_or(TaskServiceError::CategoryNotFound(request.category))?;

        let mut task = Task::new(
            user_uuid,
            category.uuid,
            request.title.clone(),
            request.frequency,
            request.xp_reward.unwrap_or(category.base_xp),
            now,
        );
        task.description = request.description.clone();
        task.difficulty = request.difficulty;
        task.due_date = request.due_date;

        self.store.create_task(&task)?;
        Ok(task)
    }

    /// Applies a partial update to an owned task.
    pub fn update_task(
        &self,
        user_uuid: UserId,
        uuid: TaskId,
        update: &TaskUpdate,
    ) -> Result<Task, TaskServiceError> {
        let mut task = self.owned_task(user_uuid, uuid)?;

        if let Some(title) = &update.title {
            task.title = title.clone();
        }
        if let Some(description) = &update.description {
            task.description = Some(description.clone());
        }
        if let Some(category) = update.category {
            self.store
                .get_category(category)?
                .ok_or(TaskServiceError::CategoryNotFound(category))?;
            task.category_uuid = category;
        }
        if let Some(frequency) = update.frequency {
            task.frequency = frequency;
        }
        if let Some(xp_reward) = update.xp_reward {
            task.xp_reward = xp_reward;
        }
        if let Some(difficulty) = update.difficulty {
            task.difficulty = difficulty;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(is_active) = update.is_active {
            task.is_active = is_active;
        }

        self.store.update_task(&task)?;
        Ok(task)
    }

    /// Logically deletes an owned task by clearing its active flag.
    ///
    /// The record stays behind for completion history and streak stats;
    /// hard deletion belongs to the record-store owner.
    pub fn delete_task(&self, user_uuid: UserId, uuid: TaskId) -> Result<(), TaskServiceError> {
        let mut task = self.owned_task(user_uuid, uuid)?;
        task.deactivate();
        self.store.update_task(&task)?;
        Ok(())
    }

    /// Gets one owned task.
    pub fn get_task(&self, user_uuid: UserId, uuid: TaskId) -> Result<Task, TaskServiceError> {
        self.owned_task(user_uuid, uuid)
    }

    /// Lists the caller's tasks, applying lazy reset to each returned row.
    ///
    /// Repeated calls without intervening completions are idempotent: a
    /// reset task is pending afterwards and pending tasks never reset.
    pub fn list_tasks(
        &self,
        user_uuid: UserId,
        query: &TaskListQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, TaskServiceError> {
        let mut tasks = self.store.list_tasks(user_uuid, query)?;
        for task in &mut tasks {
            self.apply_lazy_reset(task, now)?;
        }
        Ok(tasks)
    }

    /// Returns the caller's tasks due today.
    ///
    /// Recurring tasks are shown through their whole period; once-tasks
    /// only until completed. Reset runs before the inclusion filter.
    pub fn today_tasks(
        &self,
        user_uuid: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vec<Task>, TaskServiceError> {
        let mut tasks = self
            .store
            .list_tasks(user_uuid, &TaskListQuery::default())?;
        for task in &mut tasks {
            self.apply_lazy_reset(task, now)?;
        }

        tasks.retain(|task| match task.frequency {
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly => true,
            Frequency::Once => task.status != TaskStatus::Completed,
        });
        Ok(tasks)
    }

    /// Marks an owned task as in progress.
    pub fn start_task(&self, user_uuid: UserId, uuid: TaskId) -> Result<Task, TaskServiceError> {
        let mut task = self.owned_task(user_uuid, uuid)?;
        task.status = TaskStatus::InProgress;
        self.store.update_task(&task)?;
        Ok(task)
    }

    /// Completes an owned task, awarding experience and resolving level-up.
    ///
    /// # Contract
    /// - Fails with `AlreadyCompleted` when the task is completed and its
    ///   period has not elapsed; once-tasks can never be completed twice.
    /// - Task mutation, user progression and the appended completion record
    ///   commit together or not at all.
    pub fn complete_task(
        &self,
        user_uuid: UserId,
        uuid: TaskId,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome, TaskServiceError> {
        let outcome = self.store.in_transaction(|store| {
            let Some(mut task) = store.get_task(user_uuid, uuid)? else {
                return Err(TaskServiceError::TaskNotFound(uuid));
            };

            if task.status == TaskStatus::Completed
                && (task.frequency == Frequency::Once || !should_reset(&task, now))
            {
                return Err(TaskServiceError::AlreadyCompleted(task.uuid));
            }

            let reward = completion_reward(&task);
            task.status = TaskStatus::Completed;
            task.last_completed = Some(now);
            task.current_streak = reward.new_current_streak;
            task.best_streak = reward.new_best_streak;
            store.update_task(&task)?;

            let Some(mut user) = store.get_user(user_uuid)? else {
                return Err(TaskServiceError::UserNotFound(user_uuid));
            };
            let change = apply_experience(&mut user, reward.xp_earned);
            store.update_user(&user)?;

            let completion =
                CompletionRecord::new(task.uuid, user.uuid, now, reward.xp_earned, reward.streak_bonus);
            store.append_completion(&completion)?;

            Ok(CompletionOutcome {
                completion,
                task,
                user,
                leveled_up: change.leveled_up,
                new_level: change.new_level,
            })
        })?;

        info!(
            "event=task_completed module=service status=ok task={} xp_earned={} streak={} leveled_up={}",
            outcome.task.uuid,
            outcome.completion.xp_earned,
            outcome.task.current_streak,
            outcome.leveled_up
        );
        Ok(outcome)
    }

    fn owned_task(&self, user_uuid: UserId, uuid: TaskId) -> Result<Task, TaskServiceError> {
        self.store
            .get_task(user_uuid, uuid)?
            .ok_or(TaskServiceError::TaskNotFound(uuid))
    }

    fn apply_lazy_reset(
        &self,
        task: &mut Task,
        now: DateTime<Utc>,
    ) -> Result<(), TaskServiceError> {
        if should_reset(task, now) {
            task.status = TaskStatus::Pending;
            self.store.update_task(task)?;
        }
        Ok(())
    }
}
