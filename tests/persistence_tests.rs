use chrono::NaiveDate;
use tempfile::TempDir;

use streakrs::engine::Engine;
use streakrs::models::{Activity, ActivityType};
use streakrs::store::{DataFile, UserData};

/// A session's mutations survive a save/load cycle the way the CLI
/// performs it: load, mutate through the engine, save.
#[test]
fn test_session_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let file = DataFile::at(dir.path().join("data.json"));
    let engine = Engine::new();
    let today = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();

    // First session: log an activity
    let mut data = file.load().unwrap();
    assert_eq!(data, UserData::default());

    let mut run = Activity::new(ActivityType::Running, today);
    run.calories = Some(350);
    let outcome = engine.record_activity(
        data.activities.all(),
        &run,
        &data.goals,
        &mut data.streaks,
        &mut data.records,
        today,
    );
    assert!(!outcome.records_broken.is_empty());
    data.activities.append(run.clone());
    file.save(&data).unwrap();

    // Second session: state is back, removal rebuilds records
    let mut data = file.load().unwrap();
    assert_eq!(data.activities.len(), 1);
    assert!(data.records.highest_calories.is_some());

    data.activities.remove(run.id).unwrap();
    engine.remove_activity(data.activities.all(), &mut data.records);
    file.save(&data).unwrap();

    let data = file.load().unwrap();
    assert!(data.activities.is_empty());
    assert!(data.records.highest_calories.is_none());
}
