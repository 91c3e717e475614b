//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `liferpg_core` end-to-end against an in-memory store.
//! - Keep output small for quick local sanity checks.

use chrono::Utc;
use liferpg_core::db::open_db_in_memory;
use liferpg_core::repo::user_repo::UserRepository;
use liferpg_core::seed::seed_default_categories;
use liferpg_core::{
    CategoryService, CreateTaskRequest, Frequency, SqliteStore, StatsService, TaskService, User,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("liferpg smoke run failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = std::env::temp_dir().join("liferpg-logs");
    if let Some(dir) = log_dir.to_str() {
        if let Err(err) = liferpg_core::init_logging(liferpg_core::default_log_level(), dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let now = Utc::now();
    let conn = open_db_in_memory()?;

    let store = SqliteStore::try_new(&conn)?;
    seed_default_categories(&store)?;

    let user = User::new("smoke", now);
    store.create_user(&user)?;

    let category = CategoryService::new(SqliteStore::try_new(&conn)?)
        .list_categories()?
        .into_iter()
        .next()
        .ok_or("seed produced no categories")?;

    let tasks = TaskService::new(store);
    let task = tasks.create_task(
        user.uuid,
        &CreateTaskRequest::new(category.uuid, "smoke task", Frequency::Daily),
        now,
    )?;
    let outcome = tasks.complete_task(user.uuid, task.uuid, now)?;

    let stats = StatsService::new(SqliteStore::try_new(&conn)?).user_stats(user.uuid)?;

    println!("liferpg_core version={}", liferpg_core::core_version());
    println!(
        "completed `{}` for {} xp (streak bonus {})",
        outcome.task.title, outcome.completion.xp_earned, outcome.completion.streak_bonus
    );
    println!(
        "user level={} title={} total_xp={} to_next={}",
        stats.level, stats.title, stats.total_xp, stats.xp_to_next_level
    );
    Ok(())
}
