//! Task timetable
//!
//! Pure bookkeeping of when each live task is next due, measured as an
//! offset from the moment the view was mounted. The runtime sleeps until
//! [`Timetable::next_due`], runs the task, then calls
//! [`Timetable::advance`].

use crate::config::TaskSchedule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A periodic mutation of the live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveTask {
    Readouts,
    SeriesAppend,
    Heatmap,
    CriticalInjection,
    Clock,
    Gallery,
}

impl LiveTask {
    /// Every task, in declaration order.
    pub const ALL: [LiveTask; 6] = [
        LiveTask::Readouts,
        LiveTask::SeriesAppend,
        LiveTask::Heatmap,
        LiveTask::CriticalInjection,
        LiveTask::Clock,
        LiveTask::Gallery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LiveTask::Readouts => "readouts",
            LiveTask::SeriesAppend => "series_append",
            LiveTask::Heatmap => "heatmap",
            LiveTask::CriticalInjection => "critical_injection",
            LiveTask::Clock => "clock",
            LiveTask::Gallery => "gallery",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    task: LiveTask,
    interval: Duration,
    due: Duration,
}

/// Next due offset for every task.
#[derive(Debug, Clone)]
pub struct Timetable {
    entries: Vec<Entry>,
}

impl Timetable {
    /// Each task is first due after its initial delay.
    pub fn new(schedule: &TaskSchedule) -> Self {
        let entries = LiveTask::ALL
            .iter()
            .map(|&task| {
                let timing = schedule.timing(task);
                Entry {
                    task,
                    interval: timing.interval(),
                    due: timing.initial_delay(),
                }
            })
            .collect();
        Self { entries }
    }

    /// Earliest due task. Ties go to the task declared first.
    pub fn next_due(&self) -> Option<(LiveTask, Duration)> {
        self.entries
            .iter()
            .min_by_key(|e| e.due)
            .map(|e| (e.task, e.due))
    }

    /// Reschedule `task` one interval after its last due time.
    pub fn advance(&mut self, task: LiveTask) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.task == task) {
            entry.due += entry.interval;
        }
    }

    /// Pop every run due at or before `now`, in execution order.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(LiveTask, Duration)> {
        let mut runs = Vec::new();
        while let Some((task, due)) = self.next_due() {
            if due > now {
                break;
            }
            runs.push((task, due));
            self.advance(task);
        }
        runs
    }

    /// Due offset of `task`.
    pub fn due(&self, task: LiveTask) -> Option<Duration> {
        self.entries.iter().find(|e| e.task == task).map(|e| e.due)
    }
}
