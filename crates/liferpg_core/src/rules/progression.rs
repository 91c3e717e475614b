//! Level threshold table and title tiers.
//!
//! # Invariants
//! - `threshold_for` is total over all levels >= 1 and strictly increasing,
//!   including across the table/extrapolation boundary.
//! - Threshold and title tables are configured independently; neither is
//!   derived from the other.

/// Cumulative experience required to reach level `index + 1`.
const LEVEL_THRESHOLDS: [i64; 20] = [
    0, 100, 250, 450, 700, 1000, 1400, 1900, 2500, 3200, 4000, 5000, 6200, 7600, 9200, 11000,
    13000, 15500, 18500, 22000,
];

const MAX_TABLE_LEVEL: u32 = 20;
const XP_PER_LEVEL_BEYOND_TABLE: i64 = 5000;

/// Title tiers by minimum level, ascending.
const TITLE_TIERS: [(u32, &str); 6] = [
    (1, "Novato"),
    (5, "Aprendiz"),
    (10, "Aventurero"),
    (15, "Veterano"),
    (20, "Maestro"),
    (25, "Leyenda"),
];

/// Returns the cumulative experience required to reach `level`.
///
/// Levels past the explicit table extrapolate linearly at
/// `XP_PER_LEVEL_BEYOND_TABLE` per level.
pub fn threshold_for(level: u32) -> i64 {
    if level <= 1 {
        return 0;
    }
    if level <= MAX_TABLE_LEVEL {
        return LEVEL_THRESHOLDS[(level - 1) as usize];
    }
    LEVEL_THRESHOLDS[(MAX_TABLE_LEVEL - 1) as usize]
        + i64::from(level - MAX_TABLE_LEVEL) * XP_PER_LEVEL_BEYOND_TABLE
}

/// Returns the highest-tier title whose level requirement is <= `level`.
///
/// Falls back to the lowest tier for levels below every requirement.
pub fn title_for(level: u32) -> &'static str {
    let mut title = TITLE_TIERS[0].1;
    for (min_level, tier_title) in TITLE_TIERS {
        if level >= min_level {
            title = tier_title;
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::{threshold_for, title_for};

    #[test]
    fn threshold_starts_at_zero_for_level_one() {
        assert_eq!(threshold_for(1), 0);
    }

    #[test]
    fn thresholds_are_strictly_increasing_across_extrapolation_boundary() {
        for level in 1..=40 {
            assert!(
                threshold_for(level) < threshold_for(level + 1),
                "threshold_for({level}) must be < threshold_for({})",
                level + 1
            );
        }
    }

    #[test]
    fn extrapolation_continues_from_table_maximum() {
        assert_eq!(threshold_for(20), 22000);
        assert_eq!(threshold_for(21), 27000);
        assert_eq!(threshold_for(25), 47000);
    }

    #[test]
    fn titles_match_tier_boundaries() {
        assert_eq!(title_for(1), "Novato");
        assert_eq!(title_for(4), "Novato");
        assert_eq!(title_for(5), "Aprendiz");
        assert_eq!(title_for(10), "Aventurero");
        assert_eq!(title_for(19), "Veterano");
        assert_eq!(title_for(20), "Maestro");
        assert_eq!(title_for(25), "Leyenda");
        assert_eq!(title_for(99), "Leyenda");
    }

    #[test]
    fn titles_never_regress_as_level_increases() {
        let prestige = |title: &str| {
            ["Novato", "Aprendiz", "Aventurero", "Veterano", "Maestro", "Leyenda"]
                .iter()
                .position(|candidate| *candidate == title)
                .expect("known title")
        };

        let mut previous = prestige(title_for(1));
        for level in 2..=60 {
            let current = prestige(title_for(level));
            assert!(current >= previous, "title regressed at level {level}");
            previous = current;
        }
    }
}
