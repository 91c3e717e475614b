//! Experience computation for one completion.

use crate::model::task::Task;

/// Streak bonus percentage granted per consecutive period.
pub const STREAK_BONUS_PERCENT_PER_PERIOD: u32 = 5;
/// Streak bonus percentage ceiling.
pub const STREAK_BONUS_PERCENT_CAP: u32 = 50;

/// Result of the completion calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionReward {
    /// Total experience granted, streak bonus included.
    pub xp_earned: i64,
    /// Portion of `xp_earned` contributed by the streak bonus.
    pub streak_bonus: i64,
    pub new_current_streak: u32,
    pub new_best_streak: u32,
}

/// Computes the experience one completion grants and the advanced streak
/// counters.
///
/// The bonus percentage reflects the streak as it stands before this
/// completion increments it, capped at `STREAK_BONUS_PERCENT_CAP`.
pub fn completion_reward(task: &Task) -> CompletionReward {
    let base = (task.xp_reward as f64 * task.difficulty).floor() as i64;
    let bonus_percent = i64::from(
        (task.current_streak * STREAK_BONUS_PERCENT_PER_PERIOD).min(STREAK_BONUS_PERCENT_CAP),
    );
    let streak_bonus = base * bonus_percent / 100;

    let new_current_streak = task.current_streak + 1;
    CompletionReward {
        xp_earned: base + streak_bonus,
        streak_bonus,
        new_current_streak,
        new_best_streak: task.best_streak.max(new_current_streak),
    }
}

#[cfg(test)]
mod tests {
    use super::completion_reward;
    use crate::model::task::{Frequency, Task};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn task(xp_reward: i64, difficulty: f64, current_streak: u32, best_streak: u32) -> Task {
        let mut task = Task::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "read",
            Frequency::Daily,
            xp_reward,
            Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
        );
        task.difficulty = difficulty;
        task.current_streak = current_streak;
        task.best_streak = best_streak;
        task
    }

    #[test]
    fn fresh_task_earns_base_reward_without_bonus() {
        let reward = completion_reward(&task(10, 1.0, 0, 0));
        assert_eq!(reward.xp_earned, 10);
        assert_eq!(reward.streak_bonus, 0);
        assert_eq!(reward.new_current_streak, 1);
        assert_eq!(reward.new_best_streak, 1);
    }

    #[test]
    fn long_streak_hits_the_bonus_cap() {
        // base = floor(10 * 2.0) = 20; bonus = min(20 * 5, 50)% = 50% = 10.
        let reward = completion_reward(&task(10, 2.0, 20, 20));
        assert_eq!(reward.xp_earned, 30);
        assert_eq!(reward.streak_bonus, 10);
        assert_eq!(reward.new_current_streak, 21);
        assert_eq!(reward.new_best_streak, 21);
    }

    #[test]
    fn partial_streak_bonus_floors_toward_zero() {
        // base = floor(7 * 1.5) = 10; bonus = 15% of 10 = 1 (floored).
        let reward = completion_reward(&task(7, 1.5, 3, 9));
        assert_eq!(reward.streak_bonus, 1);
        assert_eq!(reward.xp_earned, 11);
    }

    #[test]
    fn best_streak_is_preserved_when_ahead_of_current() {
        let reward = completion_reward(&task(10, 1.0, 2, 8));
        assert_eq!(reward.new_current_streak, 3);
        assert_eq!(reward.new_best_streak, 8);
    }
}
