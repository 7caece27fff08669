use chrono::{Local, TimeZone};
use feedtimer::state::{State, with_state_lock};
use feedtimer::storage::FileStorage;
use feedtimer::timer::FixedClock;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_state_creation() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    State::default().save(&storage).unwrap();
    assert!(dir.path().join("state.json").exists());

    let loaded = State::load(&storage).unwrap();
    assert!(!loaded.timer.running);
}

#[test]
fn test_running_timer_survives_reload() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let clock = FixedClock(Local.with_ymd_and_hms(2026, 1, 7, 8, 0, 0).unwrap());

    with_state_lock(&storage, |state| {
        state.timer.start(&clock)?;
        state.timer.add_side();
        Ok(())
    })
    .unwrap();

    let loaded = State::load(&FileStorage::new(dir.path())).unwrap();
    assert!(loaded.timer.running);
    assert_eq!(loaded.timer.side_count, 1);
    assert_eq!(loaded.timer.start_epoch_ms, clock.0.timestamp_millis());
}

#[test]
fn test_failed_closure_does_not_save() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    let result: anyhow::Result<()> = with_state_lock(&storage, |state| {
        state.timer.add_side();
        anyhow::bail!("nope")
    });

    assert!(result.is_err());
    assert!(!dir.path().join("state.json").exists());
}

#[test]
fn test_concurrent_lock() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());

    State::default().save(&storage).unwrap();

    let storage_clone = storage.clone();
    let handle = thread::spawn(move || {
        with_state_lock(&storage_clone, |state| {
            state.timer.side_count = 7;
            thread::sleep(Duration::from_millis(500));
            Ok(())
        })
        .unwrap();
    });

    thread::sleep(Duration::from_millis(100));

    let start = std::time::Instant::now();
    with_state_lock(&storage, |state| {
        assert_eq!(state.timer.side_count, 7);
        state.timer.side_count = 8;
        Ok(())
    })
    .unwrap();

    assert!(
        start.elapsed().as_millis() >= 300,
        "Should have waited for lock"
    );

    handle.join().unwrap();

    let final_state = State::load(&storage).unwrap();
    assert_eq!(final_state.timer.side_count, 8);
}
