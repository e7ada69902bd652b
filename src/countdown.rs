use crate::models::TimeRemaining;
use chrono::{Duration, NaiveDateTime, Timelike};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Days added to "now" when no target is supplied.
pub const DEFAULT_LEAD_DAYS: i64 = 30;

const TARGET_FORMAT: &str = "%Y-%m-%dT%H:%M";
const TARGET_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Splits `target - now` into days, hours, minutes and seconds.
///
/// A target at or before `now` yields the all-zero complete state.
pub fn calculate_time_left(target: NaiveDateTime, now: NaiveDateTime) -> TimeRemaining {
    time_left_from_millis((target - now).num_milliseconds())
}

pub fn time_left_from_millis(difference: i64) -> TimeRemaining {
    if difference <= 0 {
        return TimeRemaining::default();
    }

    TimeRemaining {
        days: (difference / MS_PER_DAY) as u64,
        hours: ((difference / MS_PER_HOUR) % 24) as u64,
        minutes: ((difference / MS_PER_MINUTE) % 60) as u64,
        seconds: ((difference / MS_PER_SECOND) % 60) as u64,
        total_milliseconds: difference,
    }
}

/// Parses a `datetime-local` style value: `YYYY-MM-DDTHH:mm`, optionally with `:ss`.
pub fn parse_target(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TARGET_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TARGET_FORMAT_SECONDS))
        .ok()
}

/// Like `parse_target`, but only for values already in canonical form:
/// zero-padded fields, no sign, no surrounding whitespace.
pub fn canonical_target(value: &str) -> Option<NaiveDateTime> {
    let target = NaiveDateTime::parse_from_str(value, TARGET_FORMAT)
        .ok()
        .filter(|target| target.format(TARGET_FORMAT).to_string() == value);
    target.or_else(|| {
        NaiveDateTime::parse_from_str(value, TARGET_FORMAT_SECONDS)
            .ok()
            .filter(|target| target.format(TARGET_FORMAT_SECONDS).to_string() == value)
    })
}

pub fn format_target(target: NaiveDateTime) -> String {
    target.format(TARGET_FORMAT).to_string()
}

/// Now plus the default lead, truncated to the minute like a formatted target.
pub fn default_target_at(now: NaiveDateTime) -> NaiveDateTime {
    let target = now + Duration::days(DEFAULT_LEAD_DAYS);
    target
        .date()
        .and_hms_opt(target.hour(), target.minute(), 0)
        .unwrap_or(target)
}

pub fn default_target(now: NaiveDateTime) -> String {
    format_target(default_target_at(now))
}

/// Human readable form shown under the countdown title.
pub fn format_long(target: NaiveDateTime) -> String {
    target.format("%A, %-d %B %Y at %H:%M").to_string()
}
