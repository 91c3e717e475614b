//! Lazy reset policy for recurring tasks.

use crate::model::task::{Frequency, Task, TaskStatus};
use chrono::{DateTime, Datelike, Utc};

/// Returns whether a completed task's period has elapsed and its status
/// must be cleared back to pending.
///
/// Pure: applying the reset is the caller's responsibility and must happen
/// before due-today filtering or completion eligibility checks.
///
/// All calendar comparisons use the UTC calendar. For weekly tasks, any
/// calendar-year advance resets even when ISO week numbering carries week
/// 52/53 across the year boundary.
pub fn should_reset(task: &Task, now: DateTime<Utc>) -> bool {
    if task.status != TaskStatus::Completed {
        return false;
    }
    if task.frequency == Frequency::Once {
        return false;
    }
    let Some(last) = task.last_completed else {
        // Completed with no completion timestamp is inconsistent state;
        // repair it eagerly by resetting.
        return true;
    };

    match task.frequency {
        Frequency::Once => false,
        Frequency::Daily => now.date_naive() > last.date_naive(),
        Frequency::Weekly => {
            now.iso_week().week() > last.iso_week().week() || now.year() > last.year()
        }
        Frequency::Monthly => now.month() > last.month() || now.year() > last.year(),
    }
}
