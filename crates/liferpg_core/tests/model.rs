use chrono::{TimeZone, Utc};
use liferpg_core::{
    Category, CompletionRecord, Frequency, Task, TaskStatus, User, ValidationError,
};
use uuid::Uuid;

fn created_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap()
}

#[test]
fn task_new_sets_defaults() {
    let user = Uuid::new_v4();
    let category = Uuid::new_v4();
    let task = Task::new(user, category, "run 5k", Frequency::Daily, 10, created_at());

    assert!(!task.uuid.is_nil());
    assert_eq!(task.user_uuid, user);
    assert_eq!(task.category_uuid, category);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.xp_reward, 10);
    assert_eq!(task.difficulty, 1.0);
    assert_eq!(task.current_streak, 0);
    assert_eq!(task.best_streak, 0);
    assert_eq!(task.last_completed, None);
    assert!(task.is_active);
    assert!(task.is_recurring());
}

#[test]
fn once_task_is_not_recurring() {
    let task = Task::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "file taxes",
        Frequency::Once,
        50,
        created_at(),
    );
    assert!(!task.is_recurring());
}

#[test]
fn deactivate_and_reactivate_toggle_active_flag() {
    let mut task = Task::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "meditate",
        Frequency::Daily,
        10,
        created_at(),
    );

    task.deactivate();
    assert!(!task.is_active);

    task.reactivate();
    assert!(task.is_active);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut task = Task::with_id(
        task_id,
        Uuid::new_v4(),
        Uuid::new_v4(),
        "stretch",
        Frequency::Weekly,
        15,
        created_at(),
    );
    task.status = TaskStatus::InProgress;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["uuid"], task_id.to_string());
    assert_eq!(json["frequency"], "weekly");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["xp_reward"], 15);
    assert_eq!(json["created_at"], "2026-01-05T08:00:00Z");
    assert_eq!(json["last_completed"], serde_json::Value::Null);
    assert_eq!(json["is_active"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn task_validate_rejects_bad_fields() {
    let template = Task::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        "write",
        Frequency::Daily,
        10,
        created_at(),
    );

    let mut blank = template.clone();
    blank.title = "   ".to_string();
    assert_eq!(blank.validate(), Err(ValidationError::BlankField("title")));

    let mut no_reward = template.clone();
    no_reward.xp_reward = 0;
    assert_eq!(
        no_reward.validate(),
        Err(ValidationError::NonPositiveXpReward(0))
    );

    let mut bad_difficulty = template.clone();
    bad_difficulty.difficulty = -1.5;
    assert_eq!(
        bad_difficulty.validate(),
        Err(ValidationError::NonPositiveDifficulty(-1.5))
    );

    let mut regressed = template.clone();
    regressed.current_streak = 4;
    regressed.best_streak = 2;
    assert_eq!(
        regressed.validate(),
        Err(ValidationError::StreakRegression {
            current: 4,
            best: 2
        })
    );

    let mut nil_owner = template;
    nil_owner.user_uuid = Uuid::nil();
    assert_eq!(nil_owner.validate(), Err(ValidationError::NilUuid));
}

#[test]
fn user_new_starts_at_level_one_with_lowest_title() {
    let user = User::new("alice", created_at());

    assert_eq!(user.level, 1);
    assert_eq!(user.current_xp, 0);
    assert_eq!(user.total_xp, 0);
    assert_eq!(user.title, "Novato");
    assert!(user.validate().is_ok());
}

#[test]
fn user_validate_rejects_inconsistent_counters() {
    let mut user = User::new("bob", created_at());
    user.level = 0;
    assert_eq!(user.validate(), Err(ValidationError::ZeroLevel));

    let mut negative = User::new("bob", created_at());
    negative.total_xp = -5;
    assert_eq!(
        negative.validate(),
        Err(ValidationError::NegativeXp {
            field: "total_xp",
            value: -5
        })
    );
}

#[test]
fn category_validate_enforces_hex_color() {
    let valid = Category::new("Salud", "bienestar", "fitness", "#4CAF50", 15);
    assert!(valid.validate().is_ok());

    let bad_color = Category::new("Salud", "bienestar", "fitness", "green", 15);
    assert_eq!(
        bad_color.validate(),
        Err(ValidationError::InvalidColor("green".to_string()))
    );

    let bad_xp = Category::new("Salud", "bienestar", "fitness", "#4CAF50", 0);
    assert_eq!(bad_xp.validate(), Err(ValidationError::NonPositiveBaseXp(0)));
}

#[test]
fn completion_validate_bounds_streak_bonus() {
    let valid = CompletionRecord::new(Uuid::new_v4(), Uuid::new_v4(), created_at(), 30, 10);
    assert!(valid.validate().is_ok());

    let oversized = CompletionRecord::new(Uuid::new_v4(), Uuid::new_v4(), created_at(), 10, 11);
    assert_eq!(
        oversized.validate(),
        Err(ValidationError::BonusExceedsEarned {
            bonus: 11,
            earned: 10
        })
    );

    let negative = CompletionRecord::new(Uuid::new_v4(), Uuid::new_v4(), created_at(), -1, 0);
    assert_eq!(
        negative.validate(),
        Err(ValidationError::NegativeXp {
            field: "xp_earned",
            value: -1
        })
    );
}
