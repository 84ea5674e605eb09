use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::TimeRange;

/// Schedule change attached to a lesson by the school.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeInfo {
    #[default]
    Unchanged,
    /// Another subject is taught in this slot. The subject may be missing upstream.
    Substituted {
        #[serde(default)]
        subject: Option<String>,
    },
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: String,
    pub time: TimeRange,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    /// Student-group variant tag (language, PE group, ...).
    #[serde(default)]
    pub distribution: Option<String>,
    #[serde(default)]
    pub change: ChangeInfo,
}

impl Lesson {
    pub fn new(name: impl Into<String>, time: TimeRange) -> Self {
        Self {
            name: name.into(),
            time,
            teacher: None,
            room: None,
            distribution: None,
            change: ChangeInfo::Unchanged,
        }
    }

    /// Name to display: the substituted subject when it resolves, the original name otherwise.
    pub fn effective_name(&self) -> &str {
        match &self.change {
            ChangeInfo::Substituted { subject: Some(s) } if !s.trim().is_empty() => s,
            ChangeInfo::Substituted { .. } | ChangeInfo::Unchanged | ChangeInfo::Cancelled => &self.name,
        }
    }
}

/// Lessons of one calendar day in chronological order. Never re-sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySchedule {
    pub lessons: Vec<Lesson>,
}

impl DaySchedule {
    pub fn new(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lesson> {
        self.lessons.iter()
    }
}

impl FromIterator<Lesson> for DaySchedule {
    fn from_iter<I: IntoIterator<Item = Lesson>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Presentation size chosen by the caller. Drives the capacity limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Small,
    Medium,
    Large,
}

impl DisplayMode {
    pub fn capacity(&self) -> usize {
        match self {
            DisplayMode::Small => 3,
            DisplayMode::Medium => 4,
            DisplayMode::Large => 7,
        }
    }

    /// Medium and large layouts give the first entry its own panel.
    pub fn has_featured_panel(&self) -> bool {
        matches!(self, DisplayMode::Medium | DisplayMode::Large)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Small => "small",
            DisplayMode::Medium => "medium",
            DisplayMode::Large => "large",
        }
    }
}

impl std::str::FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(DisplayMode::Small),
            "medium" => Ok(DisplayMode::Medium),
            "large" => Ok(DisplayMode::Large),
            other => Err(format!("unknown display mode {other:?} (expected small, medium or large)")),
        }
    }
}

/// Distribution tags the student belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupFilter(BTreeSet<String>);

impl GroupFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Untagged lessons are for everyone.
    pub fn admits(&self, tag: Option<&str>) -> bool {
        match tag {
            None => true,
            Some(tag) => self.0.contains(tag),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for GroupFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
