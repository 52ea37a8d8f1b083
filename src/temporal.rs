use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

const MILLIS_PER_WEEK: i64 = 7 * 24 * 60 * 60 * 1000;
const DAYS_PER_WEEK: u64 = 7;

/// Whole weeks from `b` to `a`, floored toward negative infinity.
///
/// `a` half a week after `b` gives 0, `b` half a week after `a` gives -1.
pub fn weeks_delta(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    let millis = a.signed_duration_since(b).num_milliseconds();
    millis.div_euclid(MILLIS_PER_WEEK)
}

/// `original` moved by `weeks * 7` calendar days, clock time untouched.
///
/// Saturates at the representable range instead of panicking.
pub fn shift_weeks(original: NaiveDateTime, weeks: i64) -> NaiveDateTime {
    let days = Days::new(weeks.unsigned_abs().saturating_mul(DAYS_PER_WEEK));
    if weeks >= 0 {
        original
            .checked_add_days(days)
            .unwrap_or(NaiveDateTime::MAX)
    } else {
        original
            .checked_sub_days(days)
            .unwrap_or(NaiveDateTime::MIN)
    }
}

/// [`weeks_delta`] with missing instants standing in for `now`.
pub fn weeks_between(
    a: Option<NaiveDateTime>,
    b: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> i64 {
    weeks_delta(a.unwrap_or(now), b.unwrap_or(now))
}

/// [`shift_weeks`] with a missing instant standing in for `now` and a
/// missing week count meaning no shift.
pub fn shift_by_weeks(
    original: Option<NaiveDateTime>,
    weeks: Option<i64>,
    now: NaiveDateTime,
) -> NaiveDateTime {
    shift_weeks(original.unwrap_or(now), weeks.unwrap_or(0))
}

/// Midnight on the Monday of the ISO week containing `instant`.
pub fn iso_week_start(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let back = Days::new(u64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_days(back)
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
}

/// Parses `YYYY-MM-DDTHH:MM[:SS[.fff]]` (a space also separates), or a bare
/// `YYYY-MM-DD` taken as midnight.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(v) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(v);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
