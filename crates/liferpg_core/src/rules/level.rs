//! Level resolution against the threshold table.

use crate::model::user::User;
use crate::rules::progression;

/// Outcome of applying earned experience to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Adds earned experience to the user's counters and walks the threshold
/// table until the level is consistent with `total_xp`.
///
/// The walk is a loop, not a single comparison: one completion with a large
/// streak bonus can vault several thresholds at once.
pub fn apply_experience(user: &mut User, gained: i64) -> LevelChange {
    user.current_xp += gained;
    user.total_xp += gained;

    let starting_level = user.level;
    while user.total_xp >= progression::threshold_for(user.level + 1) {
        user.level += 1;
        user.title = progression::title_for(user.level).to_string();
    }

    LevelChange {
        leveled_up: user.level > starting_level,
        new_level: user.level,
    }
}

#[cfg(test)]
mod tests {
    use super::apply_experience;
    use crate::model::user::User;
    use chrono::{TimeZone, Utc};

    fn fresh_user() -> User {
        User::new("tester", Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn small_gain_keeps_level_unchanged() {
        let mut user = fresh_user();
        let change = apply_experience(&mut user, 50);

        assert!(!change.leveled_up);
        assert_eq!(change.new_level, 1);
        assert_eq!(user.level, 1);
        assert_eq!(user.total_xp, 50);
        assert_eq!(user.current_xp, 50);
        assert_eq!(user.title, "Novato");
    }

    #[test]
    fn crossing_one_threshold_levels_up_once() {
        let mut user = fresh_user();
        let change = apply_experience(&mut user, 100);

        assert!(change.leveled_up);
        assert_eq!(change.new_level, 2);
        assert_eq!(user.title, "Novato");
    }

    #[test]
    fn single_gain_can_vault_multiple_thresholds() {
        // 5000 total experience reaches exactly the level-12 threshold.
        let mut user = fresh_user();
        let change = apply_experience(&mut user, 5000);

        assert!(change.leveled_up);
        assert_eq!(change.new_level, 12);
        assert_eq!(user.level, 12);
        assert_eq!(user.title, "Aventurero");
    }

    #[test]
    fn resolution_walks_into_the_extrapolated_range() {
        let mut user = fresh_user();
        user.level = 19;
        user.total_xp = 18_500;
        user.current_xp = 18_500;

        // 27_000 total reaches exactly the level-21 threshold.
        let change = apply_experience(&mut user, 8_500);
        assert_eq!(change.new_level, 21);
        assert_eq!(user.title, "Maestro");

        let settled = apply_experience(&mut user, 1);
        assert!(!settled.leveled_up);
        assert_eq!(settled.new_level, 21);
    }

    #[test]
    fn total_xp_never_decreases_across_gains() {
        let mut user = fresh_user();
        let mut previous_total = user.total_xp;
        for gained in [0, 10, 250, 0, 9000] {
            apply_experience(&mut user, gained);
            assert!(user.total_xp >= previous_total);
            previous_total = user.total_xp;
        }
    }
}
