use crate::schedule::{
    AssignmentSchedule, AssignmentSubmission, CourseSchedule, DateTimeParts, DraftAssignment,
    DraftCourse, DuplicateDraft, DuplicateSubmission,
};
use crate::temporal::{iso_week_start, shift_weeks, weeks_delta};
use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

/// Outcome of reprojecting a source course onto a new start.
///
/// `anchor` and `week_delta` are `None` when the source has neither a start
/// date nor assignments; the draft then carries no assignments and no end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RebaseResult {
    pub anchor: Option<NaiveDateTime>,
    pub week_delta: Option<i64>,
    #[serde(flatten)]
    pub draft: DuplicateDraft,
}

impl RebaseResult {
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none()
    }
}

/// Zero point for the shift: start of the ISO week holding the course start,
/// or holding the earliest answer start when the course has no start.
pub fn find_anchor(
    course: &CourseSchedule,
    assignments: &[AssignmentSchedule],
) -> Option<NaiveDateTime> {
    course
        .start_date
        .or_else(|| assignments.iter().map(|a| a.answer_start).min())
        .map(iso_week_start)
}

/// Day moved by `delta` weeks, clock kept from the source boundary.
fn reproject(source: NaiveDateTime, delta: i64) -> DateTimeParts {
    DateTimeParts::split(shift_weeks(source, delta), source)
}

fn reproject_assignment(source: &AssignmentSchedule, delta: i64) -> DraftAssignment {
    let compare = source.compare_window();
    let (compare_start, compare_end) = match (compare.start, compare.end) {
        (Some(cs), Some(ce)) => (reproject(cs, delta), reproject(ce, delta)),
        _ => (DateTimeParts::unset_start(), DateTimeParts::unset_end()),
    };
    DraftAssignment {
        id: source.id.clone(),
        name: source.name.clone(),
        answer_start: reproject(source.answer_start, delta),
        answer_end: reproject(source.answer_end, delta),
        compare_start,
        compare_end,
        comparison_enabled: compare.is_set(),
    }
}

/// Build a fresh duplicate schedule for a course starting at `proposed_start`.
///
/// `year` is the draft's academic year as chosen when the source course was
/// picked; moving the start never changes it. One week delta is computed per call and applied to every boundary. The
/// source is only read; calling again with a different start replaces the
/// previous result entirely.
pub fn rebase(
    course: &CourseSchedule,
    assignments: &[AssignmentSchedule],
    proposed_start: NaiveDateTime,
    year: i32,
) -> RebaseResult {
    let mut draft_course = DraftCourse {
        year,
        term: course.term.clone(),
        start: DateTimeParts::from_instant(proposed_start),
        end: DateTimeParts::unset_end(),
    };

    let Some(anchor) = find_anchor(course, assignments) else {
        log::debug!("event=rebase status=no_anchor");
        return RebaseResult {
            anchor: None,
            week_delta: None,
            draft: DuplicateDraft {
                course: draft_course,
                assignments: Vec::new(),
            },
        };
    };

    let delta = weeks_delta(proposed_start, anchor);
    if let Some(end) = course.end_date {
        draft_course.end = reproject(end, delta);
    }
    let drafts = assignments
        .iter()
        .map(|a| reproject_assignment(a, delta))
        .collect::<Vec<_>>();

    log::debug!(
        "event=rebase status=ok anchor_from={} week_delta={} assignments={}",
        if course.start_date.is_some() { "course" } else { "assignment" },
        delta,
        drafts.len()
    );

    RebaseResult {
        anchor: Some(anchor),
        week_delta: Some(delta),
        draft: DuplicateDraft {
            course: draft_course,
            assignments: drafts,
        },
    }
}

/// Initial duplicate course offered when a source course is picked: the
/// source dates moved into the current term, at the default clock times.
pub fn suggest_duplicate_course(course: &CourseSchedule, now: NaiveDateTime) -> DraftCourse {
    let mut draft = DraftCourse {
        year: now.year(),
        term: course.term.clone(),
        start: DateTimeParts::unset_start(),
        end: DateTimeParts::unset_end(),
    };
    if let Some(start) = course.start_date {
        let delta = weeks_delta(now, start);
        draft.start.date = Some(shift_weeks(start, delta).date());
        if let Some(end) = course.end_date {
            draft.end.date = Some(shift_weeks(end, delta).date());
        }
    }
    draft
}

/// Result of checking a draft: valid, or the first violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Valid,
    CoursePeriodConflict,
    AnswerPeriodInvalid(String),
    AnswerCompareOverlap(String),
    ComparePeriodInvalid(String),
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationVerdict::Valid => "valid",
            ValidationVerdict::CoursePeriodConflict => "course_period_conflict",
            ValidationVerdict::AnswerPeriodInvalid(_) => "answer_period_invalid",
            ValidationVerdict::AnswerCompareOverlap(_) => "answer_compare_overlap",
            ValidationVerdict::ComparePeriodInvalid(_) => "compare_period_invalid",
        }
    }

    pub fn assignment_name(&self) -> Option<&str> {
        match self {
            ValidationVerdict::Valid | ValidationVerdict::CoursePeriodConflict => None,
            ValidationVerdict::AnswerPeriodInvalid(name)
            | ValidationVerdict::AnswerCompareOverlap(name)
            | ValidationVerdict::ComparePeriodInvalid(name) => Some(name),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ValidationVerdict::Valid => "Valid".to_string(),
            ValidationVerdict::CoursePeriodConflict => "Course Period Conflict".to_string(),
            ValidationVerdict::AnswerPeriodInvalid(name) => {
                format!("Answer Period Error for {}", name)
            }
            ValidationVerdict::AnswerCompareOverlap(name)
            | ValidationVerdict::ComparePeriodInvalid(name) => {
                format!("Time Period Error for {}", name)
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ValidationVerdict::Valid => "",
            ValidationVerdict::CoursePeriodConflict => {
                "Course end date/time must be after course start date/time."
            }
            ValidationVerdict::AnswerPeriodInvalid(_) => {
                "Answer end time must be after answer start time."
            }
            ValidationVerdict::AnswerCompareOverlap(_) => {
                "Please double-check the answer and comparison period start and end times."
            }
            ValidationVerdict::ComparePeriodInvalid(_) => {
                "comparison end time must be after comparison start time."
            }
        }
    }
}

fn validate_assignment(a: &DraftAssignment) -> ValidationVerdict {
    let answer = a.answer_window();
    let (Some(answer_start), Some(answer_end)) = (answer.start, answer.end) else {
        return ValidationVerdict::AnswerPeriodInvalid(a.name.clone());
    };
    if answer_start >= answer_end {
        return ValidationVerdict::AnswerPeriodInvalid(a.name.clone());
    }
    if !a.comparison_enabled {
        return ValidationVerdict::Valid;
    }

    let compare_start = a.compare_start.combine();
    let compare_end = a.compare_end.combine();
    if let Some(cs) = compare_start {
        if answer_start > cs {
            return ValidationVerdict::AnswerCompareOverlap(a.name.clone());
        }
    }
    match (compare_start, compare_end) {
        (Some(cs), Some(ce)) if cs < ce => ValidationVerdict::Valid,
        _ => ValidationVerdict::ComparePeriodInvalid(a.name.clone()),
    }
}

/// First violation in the draft, course first then assignments in order.
pub fn validate(draft: &DuplicateDraft) -> ValidationVerdict {
    if let (Some(start), Some(end)) = (draft.course.start.combine(), draft.course.end.combine()) {
        if start >= end {
            return ValidationVerdict::CoursePeriodConflict;
        }
    }
    draft
        .assignments
        .iter()
        .map(validate_assignment)
        .find(|v| !v.is_valid())
        .unwrap_or(ValidationVerdict::Valid)
}

/// Validate, then combine the draft into the payload for the course
/// service. Comparison bounds are dropped for assignments without one.
pub fn prepare_submission(
    draft: &DuplicateDraft,
) -> Result<DuplicateSubmission, ValidationVerdict> {
    let verdict = validate(draft);
    if !verdict.is_valid() {
        return Err(verdict);
    }

    let mut assignments = Vec::with_capacity(draft.assignments.len());
    for a in draft.assignments.iter().map(DraftAssignment::normalized) {
        let answer = a.answer_window();
        let (Some(answer_start), Some(answer_end)) = (answer.start, answer.end) else {
            return Err(ValidationVerdict::AnswerPeriodInvalid(a.name.clone()));
        };
        let compare = a.compare_window();
        assignments.push(AssignmentSubmission {
            id: a.id.clone(),
            answer_start,
            answer_end,
            compare_start: compare.start,
            compare_end: compare.end,
        });
    }

    Ok(DuplicateSubmission {
        year: draft.course.year,
        term: draft.course.term.clone(),
        start_date: draft.course.start.combine(),
        end_date: draft.course.end.combine(),
        assignments,
    })
}
