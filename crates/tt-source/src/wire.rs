//! JSON shape served by the timetable API: an array of weekdays, Monday first,
//! each an array of lessons.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tt_core::{ChangeInfo, DaySchedule, Lesson, TimeRange};

use crate::SourceError;

const CHANGE_CANCELLED: i64 = 1;
const CHANGE_SUBSTITUTED: i64 = 2;

/// Days stay raw until one is picked, so a bad record on another day cannot fail today.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct WireWeek(pub Vec<Value>);

#[derive(Debug, Deserialize)]
pub struct WireLesson {
    pub name: String,
    pub time: String,
    #[serde(default)]
    pub teacher: Option<WireTeacher>,
    #[serde(default)]
    pub room: Option<WireRoom>,
    #[serde(default)]
    pub distribution: Option<WireDistribution>,
    #[serde(default)]
    pub change: Option<WireChange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTeacher {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireRoom {
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireDistribution {
    #[serde(default)]
    pub shortcut: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireChange {
    #[serde(default)]
    pub change: Option<WireChangeKind>,
    #[serde(default)]
    pub subject: Option<WireSubject>,
}

#[derive(Debug, Deserialize)]
pub struct WireChangeKind {
    #[serde(rename = "type", default)]
    pub kind: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WireSubject {
    #[serde(default)]
    pub name: Option<String>,
}

/// Room codes come as `"12"` or `12`; anything else is treated as absent.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl WireChange {
    fn into_change_info(self) -> ChangeInfo {
        match self.change.and_then(|c| c.kind) {
            Some(CHANGE_SUBSTITUTED) => ChangeInfo::Substituted {
                subject: self.subject.and_then(|s| s.name),
            },
            Some(CHANGE_CANCELLED) => ChangeInfo::Cancelled,
            _ => ChangeInfo::Unchanged,
        }
    }
}

impl WireLesson {
    fn into_lesson(self) -> Result<Lesson, String> {
        let time: TimeRange = self.time.parse().map_err(|e| format!("{e}"))?;
        Ok(Lesson {
            name: self.name,
            time,
            teacher: self.teacher.and_then(|t| t.display_name),
            room: self.room.and_then(|r| r.code),
            distribution: self.distribution.and_then(|d| d.shortcut),
            change: self.change.map(WireChange::into_change_info).unwrap_or_default(),
        })
    }
}

pub fn parse_week(bytes: &[u8]) -> Result<WireWeek, SourceError> {
    Ok(serde_json::from_slice(bytes)?)
}

impl WireWeek {
    /// Converts one day. A missing, null or empty day is `None`.
    pub fn into_day(self, day_index: usize) -> Result<Option<DaySchedule>, SourceError> {
        let raw = match self.0.into_iter().nth(day_index) {
            None | Some(Value::Null) => return Ok(None),
            Some(raw) => raw,
        };
        let records: Vec<Value> = serde_json::from_value(raw)?;
        if records.is_empty() {
            return Ok(None);
        }
        let lessons = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<WireLesson>(record)
                    .map_err(|e| e.to_string())
                    .and_then(WireLesson::into_lesson)
                    .map_err(|message| SourceError::MalformedLesson {
                        day: day_index,
                        index,
                        message,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(DaySchedule::new(lessons)))
    }
}
