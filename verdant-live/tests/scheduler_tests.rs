//! Scheduler cadence and lifecycle tests on a paused clock

use chrono::NaiveDate;
use std::time::Duration;
use verdant::{LiveConfig, LiveState, LiveTask, TaskSchedule, TaskTiming};
use verdant_live::LiveView;

fn state(config: LiveConfig) -> LiveState {
    let anchor = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    LiveState::new(config, anchor).unwrap()
}

fn seeded() -> LiveConfig {
    LiveConfig::default().with_seed(21)
}

#[tokio::test(start_paused = true)]
async fn test_tasks_run_at_declared_cadence() {
    let view = LiveView::mount(state(seeded()));
    let shared = view.state();

    tokio::time::sleep(Duration::from_millis(10_500)).await;
    {
        let s = shared.read().await;
        assert_eq!(s.runs(LiveTask::Readouts), 3); // 0, 5, 10
        assert_eq!(s.runs(LiveTask::SeriesAppend), 6); // 0, 2, .., 10
        assert_eq!(s.runs(LiveTask::Heatmap), 3); // 2, 5, 8
        assert_eq!(s.runs(LiveTask::CriticalInjection), 10); // 1..=10
        assert_eq!(s.runs(LiveTask::Clock), 11); // 0..=10
        assert_eq!(s.runs(LiveTask::Gallery), 2); // 4, 8
    }

    view.unmount().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_unmount_stops_timers() {
    let view = LiveView::mount(state(seeded()));
    let shared = view.state();
    assert!(view.is_mounted());

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    view.unmount().await.unwrap();
    let before = shared.read().await.snapshot();

    tokio::time::sleep(Duration::from_secs(30)).await;
    let after = shared.read().await.snapshot();
    assert_eq!(before, after);
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_scheduler() {
    let view = LiveView::mount(state(seeded()));
    let shared = view.state();

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    drop(view);
    tokio::task::yield_now().await;
    let clock_runs = shared.read().await.runs(LiveTask::Clock);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(shared.read().await.runs(LiveTask::Clock), clock_runs);
}

#[tokio::test(start_paused = true)]
async fn test_custom_schedule_and_cap() {
    let schedule = TaskSchedule::default().with_timing(LiveTask::SeriesAppend, TaskTiming::every_ms(100));
    let config = seeded().with_schedule(schedule).with_series_cap(20);
    let view = LiveView::mount(state(config));

    tokio::time::sleep(Duration::from_millis(5_050)).await;
    let snapshot = view.snapshot().await;
    assert_eq!(snapshot.task_runs.get("series_append"), Some(&51));
    assert!(snapshot.series.iter().all(|s| s.len == 20));

    view.unmount().await.unwrap();
}
