use std::collections::BTreeSet;

use crate::{ClockTime, DaySchedule, GroupFilter, Lesson};

/// A lesson accepted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayEntry {
    /// Ordinal among accepted entries, starting at 0.
    pub position: usize,
    pub lesson: Lesson,
    pub display_name: String,
    pub is_current: bool,
}

/// Output of [`select`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub entries: Vec<DisplayEntry>,
    /// No schedule was available at all (never fetched, no snapshot).
    pub schedule_absent: bool,
}

impl Selection {
    /// Nothing to show; the renderer prints the placeholder.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> Option<&DisplayEntry> {
        self.entries.iter().find(|e| e.is_current)
    }
}

/// Turns the resolved day into the bounded display set.
///
/// Lessons are visited in stored order. A lesson is skipped when its name is
/// excluded, when it carries a group tag outside `groups`, or when it ended
/// before `now`. Scanning stops once `capacity` lessons were accepted.
pub fn select(
    schedule: Option<&DaySchedule>,
    now: ClockTime,
    capacity: usize,
    groups: &GroupFilter,
    excluded: &BTreeSet<String>,
) -> Selection {
    let Some(schedule) = schedule else {
        return Selection {
            entries: vec![],
            schedule_absent: true,
        };
    };

    let mut entries = Vec::with_capacity(capacity.min(schedule.len()));
    for lesson in schedule.iter() {
        if entries.len() >= capacity {
            break;
        }
        if excluded.contains(&lesson.name) {
            continue;
        }
        if !groups.admits(lesson.distribution.as_deref()) {
            continue;
        }
        if lesson.time.ended_before(now) {
            continue;
        }
        entries.push(DisplayEntry {
            position: entries.len(),
            display_name: lesson.effective_name().to_string(),
            is_current: lesson.time.contains(now),
            lesson: lesson.clone(),
        });
    }

    Selection {
        entries,
        schedule_absent: false,
    }
}
