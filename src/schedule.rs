use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Clock time an unset start-side boundary carries (00:00).
pub fn default_start_time() -> NaiveTime {
    NaiveTime::MIN
}

/// Clock time an unset end-side boundary carries (23:59).
pub fn default_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// A boundary as it is edited: calendar day and clock time held apart.
///
/// The day may be unset; the time always has a value. Combining takes the
/// day from `date` and the clock from `time`, and an unset day combines to
/// no instant at all.
///
/// On the wire an omitted `time` takes the side's default, so draft fields
/// read through [`start_side`] or [`end_side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeParts {
    pub date: Option<NaiveDate>,
    pub time: NaiveTime,
}

#[derive(Deserialize)]
struct PartsWire {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    time: Option<NaiveTime>,
}

fn start_side<'de, D>(deserializer: D) -> Result<DateTimeParts, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = PartsWire::deserialize(deserializer)?;
    Ok(DateTimeParts::new(
        wire.date,
        wire.time.unwrap_or_else(default_start_time),
    ))
}

fn end_side<'de, D>(deserializer: D) -> Result<DateTimeParts, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = PartsWire::deserialize(deserializer)?;
    Ok(DateTimeParts::new(
        wire.date,
        wire.time.unwrap_or_else(default_end_time),
    ))
}

impl DateTimeParts {
    pub fn new(date: Option<NaiveDate>, time: NaiveTime) -> Self {
        Self { date, time }
    }

    pub fn unset_start() -> Self {
        Self::new(None, default_start_time())
    }

    pub fn unset_end() -> Self {
        Self::new(None, default_end_time())
    }

    /// Day and clock both taken from `instant`.
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self::new(Some(instant.date()), instant.time())
    }

    /// Day taken from `day_of`, clock taken from `time_of`.
    pub fn split(day_of: NaiveDateTime, time_of: NaiveDateTime) -> Self {
        Self::new(Some(day_of.date()), time_of.time())
    }

    pub fn combine(&self) -> Option<NaiveDateTime> {
        self.date.map(|d| d.and_time(self.time))
    }
}

/// A (start, end) period. Unset when either end is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Window {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    /// Both ends present, or neither end counts.
    pub fn from_bounds(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        match (start, end) {
            (Some(s), Some(e)) => Self::new(s, e),
            _ => Self::unset(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// The course being duplicated. Dates may be left blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSchedule {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
}

/// One assignment of the source course, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSchedule {
    pub id: String,
    pub name: String,
    pub answer_start: NaiveDateTime,
    pub answer_end: NaiveDateTime,
    #[serde(default)]
    pub compare_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub compare_end: Option<NaiveDateTime>,
}

impl AssignmentSchedule {
    pub fn compare_window(&self) -> Window {
        Window::from_bounds(self.compare_start, self.compare_end)
    }
}

/// Editable course part of a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftCourse {
    pub year: i32,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(deserialize_with = "start_side")]
    pub start: DateTimeParts,
    #[serde(deserialize_with = "end_side")]
    pub end: DateTimeParts,
}

/// Editable assignment part of a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAssignment {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "start_side")]
    pub answer_start: DateTimeParts,
    #[serde(deserialize_with = "end_side")]
    pub answer_end: DateTimeParts,
    #[serde(deserialize_with = "start_side")]
    pub compare_start: DateTimeParts,
    #[serde(deserialize_with = "end_side")]
    pub compare_end: DateTimeParts,
    #[serde(default)]
    pub comparison_enabled: bool,
}

impl DraftAssignment {
    pub fn answer_window(&self) -> Window {
        Window::from_bounds(self.answer_start.combine(), self.answer_end.combine())
    }

    /// Comparison period as it would be submitted: always unset while the
    /// comparison is disabled, whatever the parts still hold.
    pub fn compare_window(&self) -> Window {
        if !self.comparison_enabled {
            return Window::unset();
        }
        Window::from_bounds(self.compare_start.combine(), self.compare_end.combine())
    }

    /// Copy with stale comparison days dropped when the comparison is off.
    pub fn normalized(&self) -> Self {
        let mut out = self.clone();
        if !out.comparison_enabled {
            out.compare_start.date = None;
            out.compare_end.date = None;
        }
        out
    }
}

/// A full duplicate candidate: what gets validated and submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateDraft {
    pub course: DraftCourse,
    #[serde(default)]
    pub assignments: Vec<DraftAssignment>,
}

/// Payload handed to the course service once a draft validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSubmission {
    pub year: i32,
    pub term: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub assignments: Vec<AssignmentSubmission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSubmission {
    pub id: String,
    pub answer_start: NaiveDateTime,
    pub answer_end: NaiveDateTime,
    pub compare_start: Option<NaiveDateTime>,
    pub compare_end: Option<NaiveDateTime>,
}
